//! Connection details for the upstream completion endpoint.

use serde::{Deserialize, Serialize};

/// Resolved connection parameters for one OpenAI-compatible endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub api_base: String,
    pub api_key: String,
    pub model_name: String,
}

impl CredentialRecord {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            model_name: model_name.into(),
        }
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("api_base", &self.api_base)
            .field("api_key", &"[REDACTED]")
            .field("model_name", &self.model_name)
            .finish()
    }
}

/// Model entry advertised by a GenAI service's config endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisedModel {
    pub name: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let record = CredentialRecord::new("https://genai.example/openai/v1", "sk-secret", "gpt-oss");
        let printed = format!("{record:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("gpt-oss"));
    }

    #[test]
    fn test_advertised_model_defaults_capabilities() {
        let model: AdvertisedModel = serde_json::from_str(r#"{"name": "llama"}"#).unwrap();
        assert_eq!(model.name, "llama");
        assert!(model.capabilities.is_empty());
    }
}
