//! Externally reachable base URL for the agent card.
//!
//! Precedence, first match wins:
//! 1. An explicit override (`A2A_BASE_URL`), returned verbatim
//! 2. The first route in `VCAP_APPLICATION.application_uris`, as `https://`
//! 3. `http://{host}:{port}`

use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::models::Config;

/// Environment variable holding an explicit base URL.
pub const A2A_BASE_URL: &str = "A2A_BASE_URL";

/// Environment variable Cloud Foundry populates with application metadata.
pub const VCAP_APPLICATION: &str = "VCAP_APPLICATION";

#[derive(Debug, Deserialize)]
struct VcapApplication {
    #[serde(default)]
    application_uris: Option<serde_json::Value>,
}

/// Resolve the base URL from already-read inputs.
///
/// Never fails: malformed platform metadata is logged and skipped.
pub fn resolve_base_url(
    override_url: Option<&str>,
    vcap_application: Option<&str>,
    host: &str,
    port: u16,
) -> String {
    if let Some(url) = override_url.filter(|url| !url.is_empty()) {
        info!(base_url = %url, "Using base URL from {A2A_BASE_URL}");
        return url.to_string();
    }

    if let Some(raw) = vcap_application {
        if let Some(route) = first_route(raw) {
            let base_url = format!("https://{route}");
            info!(base_url = %base_url, "Detected platform route from {VCAP_APPLICATION}");
            return base_url;
        }
    }

    let base_url = format!("http://{host}:{port}");
    info!(base_url = %base_url, "Using default base URL");
    base_url
}

/// Resolve the base URL for a loaded configuration.
///
/// The override comes from `config.a2a_base_url`, which the config loader
/// fills from `A2A_BASE_URL`. Platform metadata is read from the process
/// environment.
pub fn base_url_for(config: &Config) -> String {
    let vcap_application = std::env::var(VCAP_APPLICATION).ok();
    resolve_base_url(
        config.a2a_base_url.as_deref(),
        vcap_application.as_deref(),
        &config.host,
        config.port,
    )
}

fn first_route(raw: &str) -> Option<String> {
    let app: VcapApplication = match serde_json::from_str(raw) {
        Ok(app) => app,
        Err(e) => {
            warn!(error = %e, "Failed to parse {VCAP_APPLICATION}");
            return None;
        }
    };

    match app.application_uris {
        Some(serde_json::Value::Array(uris)) => match uris.first() {
            Some(serde_json::Value::String(route)) => Some(route.clone()),
            Some(other) => {
                warn!(entry = %other, "First application_uris entry is not a string");
                None
            }
            None => None,
        },
        Some(other) => {
            warn!(value = %other, "application_uris is not an array");
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let vcap = r#"{"application_uris": ["summarizer.apps.example.com"]}"#;
        assert_eq!(
            resolve_base_url(Some("https://custom.example"), Some(vcap), "0.0.0.0", 8080),
            "https://custom.example"
        );
    }

    #[test]
    fn test_override_returned_verbatim() {
        assert_eq!(
            resolve_base_url(Some("https://custom.example/"), None, "0.0.0.0", 8080),
            "https://custom.example/"
        );
    }

    #[test]
    fn test_empty_override_is_ignored() {
        assert_eq!(
            resolve_base_url(Some(""), None, "localhost", 9000),
            "http://localhost:9000"
        );
    }

    #[test]
    fn test_platform_route_uses_first_uri() {
        let vcap = r#"{"application_uris": ["a.apps.example.com", "b.apps.example.com"]}"#;
        assert_eq!(
            resolve_base_url(None, Some(vcap), "0.0.0.0", 8080),
            "https://a.apps.example.com"
        );
    }

    #[test]
    fn test_malformed_vcap_falls_through() {
        assert_eq!(
            resolve_base_url(None, Some("{not json"), "0.0.0.0", 8080),
            "http://0.0.0.0:8080"
        );
    }

    #[test]
    fn test_empty_or_missing_uris_fall_through() {
        for vcap in [
            r#"{"application_uris": []}"#,
            r#"{"application_name": "summarizer"}"#,
            r#"{"application_uris": "a.apps.example.com"}"#,
            r#"{"application_uris": [42]}"#,
        ] {
            assert_eq!(
                resolve_base_url(None, Some(vcap), "127.0.0.1", 8081),
                "http://127.0.0.1:8081",
                "input: {vcap}"
            );
        }
    }

    #[test]
    fn test_fallback_without_inputs() {
        assert_eq!(
            resolve_base_url(None, None, "0.0.0.0", 8080),
            "http://0.0.0.0:8080"
        );
    }
}
