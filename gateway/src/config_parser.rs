use std::net::SocketAddr;

use crate::error::Error;
use crate::gcp::GCPCredentials;
use crate::inference::providers::document_ai::DocumentAIProvider;
use crate::inference::providers::dummy::{DummyGenerationProvider, DummyOcrProvider};
use crate::inference::providers::gcp_vertex::GCPVertexGeminiProvider;
use crate::model::{GenerationProviderConfig, OcrProviderConfig};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_PROMETHEUS_ADDRESS: &str = "0.0.0.0:9090";
const DEFAULT_VERTEX_LOCATION: &str = "us-central1";
const DEFAULT_VERTEX_MODEL: &str = "gemini-2.5-pro";

/// The gateway's whole runtime configuration, assembled from environment
/// variables once at startup.
#[derive(Debug)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub ocr: OcrProviderConfig,
    pub generation: GenerationProviderConfig,
}

#[derive(Debug)]
pub struct GatewayConfig {
    pub bind_address: SocketAddr,
    pub prometheus_address: SocketAddr,
}

impl Config {
    pub fn load() -> Result<Config, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a key/value lookup.
    ///
    /// Missing processor or credential settings are not startup errors; the
    /// affected provider reports them when a request actually needs them.
    /// Malformed values (bad addresses, unparseable credentials) fail here.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, Error> {
        let bind_address = parse_address(
            &lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            "BIND_ADDRESS",
        )?;
        let prometheus_address = parse_address(
            &lookup("PROMETHEUS_ADDRESS")
                .unwrap_or_else(|| DEFAULT_PROMETHEUS_ADDRESS.to_string()),
            "PROMETHEUS_ADDRESS",
        )?;

        let credentials = resolve_credentials(&lookup)?;

        let ocr = if lookup("OCR_PROVIDER").as_deref() == Some("dummy") {
            OcrProviderConfig::Dummy(DummyOcrProvider::new(
                lookup("DUMMY_OCR_SCENARIO").unwrap_or_else(|| "good".to_string()),
            ))
        } else {
            OcrProviderConfig::DocumentAI(DocumentAIProvider::new(
                resolve_processor_name(&lookup),
                credentials.clone(),
            ))
        };

        let generation = if lookup("GENERATION_PROVIDER").as_deref() == Some("dummy") {
            GenerationProviderConfig::Dummy(DummyGenerationProvider::new(
                lookup("DUMMY_GENERATION_SCENARIO").unwrap_or_else(|| "good".to_string()),
            ))
        } else {
            let location =
                lookup("VERTEX_LOCATION").unwrap_or_else(|| DEFAULT_VERTEX_LOCATION.to_string());
            let model = lookup("VERTEX_MODEL").unwrap_or_else(|| DEFAULT_VERTEX_MODEL.to_string());
            GenerationProviderConfig::GCPVertexGemini(GCPVertexGeminiProvider::new(
                lookup("PROJECT_ID"),
                &location,
                &model,
                credentials,
            ))
        };

        Ok(Config {
            gateway: GatewayConfig {
                bind_address,
                prometheus_address,
            },
            ocr,
            generation,
        })
    }
}

fn parse_address(value: &str, key: &str) -> Result<SocketAddr, Error> {
    value.parse().map_err(|_| Error::Config {
        message: format!("Invalid {key}: `{value}` is not a socket address"),
    })
}

/// A full processor resource name in `PROCESSOR_ENDPOINT` wins over the
/// `PROJECT_ID` / `LOCATION` / `PROCESSOR_ID` triple.
fn resolve_processor_name(lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    if let Some(endpoint) = lookup("PROCESSOR_ENDPOINT") {
        return Some(endpoint);
    }
    match (lookup("PROJECT_ID"), lookup("LOCATION"), lookup("PROCESSOR_ID")) {
        (Some(project_id), Some(location), Some(processor_id)) => Some(format!(
            "projects/{project_id}/locations/{location}/processors/{processor_id}"
        )),
        _ => None,
    }
}

/// Inline JSON in `GCP_SERVICE_ACCOUNT_JSON` wins over a key file path in
/// `GOOGLE_APPLICATION_CREDENTIALS`.
fn resolve_credentials(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<GCPCredentials>, Error> {
    if let Some(json) = lookup("GCP_SERVICE_ACCOUNT_JSON") {
        return GCPCredentials::from_json_str(&json).map(Some);
    }
    if let Some(path) = lookup("GOOGLE_APPLICATION_CREDENTIALS") {
        return GCPCredentials::from_file(&path).map(Some);
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;
    use crate::gcp::tests::test_service_account_json;

    fn lookup_from(entries: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(
            config.gateway.bind_address,
            "0.0.0.0:3000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            config.gateway.prometheus_address,
            "0.0.0.0:9090".parse::<SocketAddr>().unwrap()
        );
        assert!(matches!(config.ocr, OcrProviderConfig::DocumentAI(_)));
        assert!(matches!(
            config.generation,
            GenerationProviderConfig::GCPVertexGemini(_)
        ));
    }

    #[test]
    fn test_invalid_bind_address() {
        let error =
            Config::from_lookup(lookup_from(&[("BIND_ADDRESS", "not-an-address")])).unwrap_err();
        assert_eq!(
            error,
            Error::Config {
                message: "Invalid BIND_ADDRESS: `not-an-address` is not a socket address"
                    .to_string()
            }
        );
    }

    #[test]
    fn test_processor_endpoint_wins() {
        let lookup = lookup_from(&[
            ("PROCESSOR_ENDPOINT", "projects/a/locations/eu/processors/b"),
            ("PROJECT_ID", "other"),
            ("LOCATION", "us"),
            ("PROCESSOR_ID", "c"),
        ]);
        assert_eq!(
            resolve_processor_name(&lookup).as_deref(),
            Some("projects/a/locations/eu/processors/b")
        );
    }

    #[test]
    fn test_processor_name_from_triple() {
        let lookup = lookup_from(&[
            ("PROJECT_ID", "my-project"),
            ("LOCATION", "us"),
            ("PROCESSOR_ID", "abc123"),
        ]);
        assert_eq!(
            resolve_processor_name(&lookup).as_deref(),
            Some("projects/my-project/locations/us/processors/abc123")
        );
    }

    #[test]
    fn test_incomplete_triple_is_none() {
        let lookup = lookup_from(&[("PROJECT_ID", "my-project"), ("LOCATION", "us")]);
        assert_eq!(resolve_processor_name(&lookup), None);
    }

    #[test]
    fn test_inline_credentials_win_over_file() {
        let json = test_service_account_json();
        let lookup = |key: &str| match key {
            "GCP_SERVICE_ACCOUNT_JSON" => Some(json.clone()),
            "GOOGLE_APPLICATION_CREDENTIALS" => Some("/nonexistent/key.json".to_string()),
            _ => None,
        };
        let credentials = resolve_credentials(&lookup).unwrap();
        assert!(credentials.is_some());
    }

    #[test]
    fn test_malformed_inline_credentials_fail_startup() {
        let lookup = lookup_from(&[("GCP_SERVICE_ACCOUNT_JSON", "{not json")]);
        assert!(resolve_credentials(&lookup).is_err());
    }

    #[test]
    fn test_missing_credentials_are_deferred() {
        let credentials = resolve_credentials(&lookup_from(&[])).unwrap();
        assert!(credentials.is_none());
    }

    #[test]
    fn test_dummy_providers() {
        let config = Config::from_lookup(lookup_from(&[
            ("OCR_PROVIDER", "dummy"),
            ("GENERATION_PROVIDER", "dummy"),
            ("DUMMY_OCR_SCENARIO", "empty"),
        ]))
        .unwrap();
        assert!(matches!(config.ocr, OcrProviderConfig::Dummy(_)));
        assert!(matches!(
            config.generation,
            GenerationProviderConfig::Dummy(_)
        ));
    }
}
