use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    Config {
        message: String,
    },
    DocumentAIAuth,
    DocumentAIInvalidArgument,
    DocumentAIServer {
        message: String,
    },
    EmptyDocument,
    GCPCredentials {
        message: String,
    },
    InferenceClient {
        message: String,
    },
    InvalidRequest {
        message: String,
    },
    JsonRequest {
        message: String,
    },
    Observability {
        message: String,
    },
    RouteNotFound {
        path: String,
        method: String,
    },
    VertexClient {
        message: String,
        status_code: StatusCode,
    },
    VertexServer {
        message: String,
    },
    VertexUnexpectedResponse,
}

impl Error {
    /// Defines the error level for logging this error
    fn level(&self) -> tracing::Level {
        match self {
            Error::Config { .. } => tracing::Level::ERROR,
            Error::DocumentAIAuth => tracing::Level::WARN,
            Error::DocumentAIInvalidArgument => tracing::Level::WARN,
            Error::DocumentAIServer { .. } => tracing::Level::ERROR,
            Error::EmptyDocument => tracing::Level::WARN,
            Error::GCPCredentials { .. } => tracing::Level::ERROR,
            Error::InferenceClient { .. } => tracing::Level::ERROR,
            Error::InvalidRequest { .. } => tracing::Level::WARN,
            Error::JsonRequest { .. } => tracing::Level::WARN,
            Error::Observability { .. } => tracing::Level::ERROR,
            Error::RouteNotFound { .. } => tracing::Level::WARN,
            Error::VertexClient { .. } => tracing::Level::WARN,
            Error::VertexServer { .. } => tracing::Level::ERROR,
            Error::VertexUnexpectedResponse => tracing::Level::ERROR,
        }
    }

    /// Defines the HTTP status code for responses involving this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::DocumentAIAuth => StatusCode::FORBIDDEN,
            Error::DocumentAIInvalidArgument => StatusCode::BAD_REQUEST,
            Error::DocumentAIServer { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::EmptyDocument => StatusCode::BAD_REQUEST,
            Error::GCPCredentials { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InferenceClient { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Error::JsonRequest { .. } => StatusCode::BAD_REQUEST,
            Error::Observability { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Error::VertexClient { status_code, .. } => *status_code,
            Error::VertexServer { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::VertexUnexpectedResponse => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the error using the `tracing` library
    pub fn log(&self) {
        match self.level() {
            tracing::Level::ERROR => tracing::error!("{self}"),
            tracing::Level::WARN => tracing::warn!("{self}"),
            tracing::Level::INFO => tracing::info!("{self}"),
            tracing::Level::DEBUG => tracing::debug!("{self}"),
            tracing::Level::TRACE => tracing::trace!("{self}"),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config { message } => {
                write!(f, "{message}")
            }
            Error::DocumentAIAuth => {
                write!(
                    f,
                    "Access denied. Please check your authentication and permissions."
                )
            }
            Error::DocumentAIInvalidArgument => {
                write!(
                    f,
                    "Invalid request to Document AI. Please check your processor endpoint and project configuration."
                )
            }
            Error::DocumentAIServer { message } => {
                write!(f, "Document processing failed: {message}")
            }
            Error::EmptyDocument => {
                write!(
                    f,
                    "No text extracted from document. Please ensure the PDF contains readable text."
                )
            }
            Error::GCPCredentials { message } => {
                write!(f, "Error in acquiring GCP credentials: {message}")
            }
            Error::InferenceClient { message } => write!(f, "{message}"),
            Error::InvalidRequest { message } => write!(f, "{message}"),
            Error::JsonRequest { message } => write!(f, "{message}"),
            Error::Observability { message } => write!(f, "{message}"),
            Error::RouteNotFound { path, method } => {
                write!(f, "Route not found: {method} {path}")
            }
            Error::VertexClient { message, .. } => write!(f, "{message}"),
            Error::VertexServer { message } => write!(f, "{message}"),
            Error::VertexUnexpectedResponse => {
                write!(
                    f,
                    "Authentication error with Vertex AI. Please check your credentials and project configuration."
                )
            }
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    /// Log the error and convert it into an Axum response
    fn into_response(self) -> Response {
        self.log();
        let body = json!({"error": self.to_string()});
        (self.status_code(), Json(body)).into_response()
    }
}
