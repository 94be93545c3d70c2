//! GenAI service credentials from a Cloud Foundry binding.

use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::vcap::VcapServices;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AdvertisedModel, CredentialRecord};

/// `endpoint` block of a GenAI binding's credentials.
#[derive(Clone, Deserialize)]
pub struct GenAiEndpoint {
    pub api_base: Option<String>,
    pub api_key: Option<String>,
    pub config_url: Option<String>,
}

impl std::fmt::Debug for GenAiEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiEndpoint")
            .field("api_base", &self.api_base)
            .field("config_url", &self.config_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ModelConfigResponse {
    #[serde(default, rename = "advertisedModels")]
    advertised_models: Vec<AdvertisedModel>,
}

/// A resolved GenAI service binding.
#[derive(Clone)]
pub struct GenAiService {
    name: String,
    api_base: String,
    api_key: String,
    config_url: Option<String>,
    client: Client,
}

impl std::fmt::Debug for GenAiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiService")
            .field("name", &self.name)
            .field("api_base", &self.api_base)
            .field("config_url", &self.config_url)
            .finish_non_exhaustive()
    }
}

impl GenAiService {
    /// Resolve `service_name` from `VCAP_SERVICES`.
    pub fn resolve(service_name: &str, accept_invalid_certs: bool) -> DomainResult<Self> {
        let services = VcapServices::from_env()?;
        Self::from_services(&services, service_name, accept_invalid_certs)
    }

    /// Resolve `service_name` from an already parsed registry.
    pub fn from_services(
        services: &VcapServices,
        service_name: &str,
        accept_invalid_certs: bool,
    ) -> DomainResult<Self> {
        let binding = services.find(service_name).ok_or_else(|| {
            DomainError::Configuration(format!(
                "Service '{service_name}' not found in VCAP_SERVICES"
            ))
        })?;

        let endpoint = binding
            .credentials
            .get("endpoint")
            .filter(|value| value.is_object())
            .ok_or_else(|| {
                DomainError::Configuration(format!(
                    "Service '{service_name}' has no endpoint block in its credentials"
                ))
            })?;
        let endpoint: GenAiEndpoint = serde_json::from_value(endpoint.clone()).map_err(|e| {
            DomainError::Configuration(format!(
                "Service '{service_name}' has a malformed endpoint block: {e}"
            ))
        })?;

        let api_base = endpoint.api_base.ok_or_else(|| {
            DomainError::Configuration(format!("Service '{service_name}' endpoint has no api_base"))
        })?;
        let api_key = endpoint.api_key.ok_or_else(|| {
            DomainError::Configuration(format!("Service '{service_name}' endpoint has no api_key"))
        })?;

        let client = Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| {
                DomainError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        debug!(service = %service_name, api_base = %api_base, "resolved GenAI service binding");

        Ok(Self {
            name: service_name.to_string(),
            api_base,
            api_key,
            config_url: endpoint.config_url,
            client,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch the models advertised by the service's config endpoint.
    #[instrument(skip(self), fields(service = %self.name))]
    pub async fn list_models(&self) -> DomainResult<Vec<AdvertisedModel>> {
        let config_url = self.config_url.as_deref().ok_or_else(|| {
            DomainError::Configuration(format!(
                "No config_url found in credentials for service '{}'",
                self.name
            ))
        })?;

        let response = self
            .client
            .get(config_url)
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                DomainError::Configuration(format!("Failed to reach config endpoint: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Configuration(format!(
                "Config endpoint returned {status}: {body}"
            )));
        }

        let config: ModelConfigResponse = response.json().await.map_err(|e| {
            DomainError::Configuration(format!("Failed to parse config endpoint response: {e}"))
        })?;

        Ok(config.advertised_models)
    }

    /// Build the credential record for the first advertised model.
    ///
    /// `api_path` is appended to the service `api_base` to reach the
    /// OpenAI-compatible API.
    pub async fn credential_record(&self, api_path: &str) -> DomainResult<CredentialRecord> {
        let models = self.list_models().await?;

        info!(service = %self.name, count = models.len(), "available models");
        for model in &models {
            info!(
                model = %model.name,
                capabilities = %model.capabilities.join(", "),
                "advertised model"
            );
        }

        let model = models.into_iter().next().ok_or_else(|| {
            DomainError::Configuration(format!(
                "Service '{}' advertises no models",
                self.name
            ))
        })?;

        Ok(CredentialRecord::new(
            format!("{}{api_path}", self.api_base),
            self.api_key.clone(),
            model.name,
        ))
    }
}
