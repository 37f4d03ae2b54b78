use axum::debug_handler;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const GATEWAY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A handler for a simple liveness check
#[debug_handler]
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: GATEWAY_VERSION.to_string(),
    })
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}

/// A handler for a health check
///
/// The gateway holds no stateful backends, so health matches liveness. Kept
/// as a separate route so orchestration probes don't need reconfiguring if
/// one is added later.
#[debug_handler]
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "gateway": "ok",
    }))
}
