//! Summarization chain: a fixed prompt template bound to one completion endpoint.

use async_trait::async_trait;
use minijinja::{context, Environment};
use tracing::{debug, info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CredentialRecord, GenAiConfig};
use crate::domain::ports::Summarizer;
use crate::infrastructure::openai::{
    ChatCompletionRequest, ChatMessage, OpenAiApiError, OpenAiClient, OpenAiClientConfig,
};

const TEMPLATE_NAME: &str = "summarize";

/// Instruction prompt wrapping the text to summarize.
pub const PROMPT_TEMPLATE: &str = "<s>[INST]
You are a helpful, respectful and honest assistant.
Always assist with care, respect, and truth. Respond with utmost utility yet securely.
Avoid harmful, unethical, prejudiced, or negative content. Ensure replies promote fairness and positivity.
I will give you a text that you must summarize as best as you can.

### TEXT:
{{ input }}

### SUMMARY:
[/INST]
";

/// Tunables applied when building a chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainOptions {
    pub temperature: f32,
    pub accept_invalid_certs: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            accept_invalid_certs: true,
        }
    }
}

impl From<&GenAiConfig> for ChainOptions {
    fn from(config: &GenAiConfig) -> Self {
        Self {
            temperature: config.temperature,
            accept_invalid_certs: config.accept_invalid_certs,
        }
    }
}

/// Prompt template plus completion client.
///
/// Stateless across invocations; one instance is shared by every task.
pub struct SummarizationChain {
    templates: Environment<'static>,
    client: OpenAiClient,
    model: String,
    temperature: f32,
}

impl SummarizationChain {
    /// Build a chain from resolved credentials.
    pub fn build(credentials: &CredentialRecord, options: ChainOptions) -> DomainResult<Self> {
        let mut templates = Environment::new();
        templates.set_keep_trailing_newline(true);
        templates.add_template(TEMPLATE_NAME, PROMPT_TEMPLATE)?;

        let client = OpenAiClient::new(OpenAiClientConfig::from_credentials(
            credentials,
            options.accept_invalid_certs,
        ))
        .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        info!(
            api_base = %credentials.api_base,
            model = %credentials.model_name,
            temperature = options.temperature,
            "Summarization chain created"
        );

        Ok(Self {
            templates,
            client,
            model: credentials.model_name.clone(),
            temperature: options.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Render the prompt for `text`.
    pub fn render_prompt(&self, text: &str) -> DomainResult<String> {
        let template = self.templates.get_template(TEMPLATE_NAME)?;
        Ok(template.render(context! { input => text })?)
    }
}

#[async_trait]
impl Summarizer for SummarizationChain {
    #[instrument(skip(self, text), fields(model = %self.model, input_len = text.len()))]
    async fn run(&self, text: &str) -> DomainResult<String> {
        let prompt = self.render_prompt(text)?;

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(self.temperature),
            stream: false,
        };

        let response = self.client.chat_completion(&request).await?;
        let summary = response
            .first_content()
            .ok_or(OpenAiApiError::EmptyResponse)?
            .to_string();

        debug!(summary_len = summary.len(), "summary generated");
        Ok(summary)
    }
}

impl std::fmt::Debug for SummarizationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizationChain")
            .field("client", &self.client)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}
