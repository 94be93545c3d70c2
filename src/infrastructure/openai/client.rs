//! HTTP client for OpenAI-compatible chat completion endpoints.

use reqwest::Client as ReqwestClient;
use tracing::{debug, instrument};

use super::error::OpenAiApiError;
use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::domain::models::CredentialRecord;

/// Configuration for the OpenAI-compatible client
#[derive(Clone)]
pub struct OpenAiClientConfig {
    /// Base URL including the API version path, e.g. `https://host/openai/v1`
    pub api_base: String,

    /// Bearer token
    pub api_key: String,

    /// Skip TLS certificate validation (self-signed endpoints)
    pub accept_invalid_certs: bool,
}

impl OpenAiClientConfig {
    pub fn from_credentials(credentials: &CredentialRecord, accept_invalid_certs: bool) -> Self {
        Self {
            api_base: credentials.api_base.clone(),
            api_key: credentials.api_key.clone(),
            accept_invalid_certs,
        }
    }
}

impl std::fmt::Debug for OpenAiClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClientConfig")
            .field("api_base", &self.api_base)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish_non_exhaustive()
    }
}

/// Client for one OpenAI-compatible endpoint
///
/// Requests use the transport's default timeout and are never retried.
#[derive(Clone)]
pub struct OpenAiClient {
    http_client: ReqwestClient,
    api_base: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: OpenAiClientConfig) -> Result<Self, OpenAiApiError> {
        let http_client = ReqwestClient::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Send one chat completion request
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiApiError> {
        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(OpenAiApiError::from_status(status, body));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion finished"
            );
        }

        Ok(completion)
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}
