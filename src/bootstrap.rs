//! Server bootstrap: wires credentials, chain, executor and gateway.

use std::sync::Arc;
use tracing::info;

use crate::adapters::a2a::{
    build_agent_card, A2AGateway, A2AHttpConfig, InMemoryTaskStore, RequestHandler,
};
use crate::application::SummarizationAgentExecutor;
use crate::domain::errors::DomainResult;
use crate::domain::models::Config;
use crate::domain::ports::Summarizer;
use crate::infrastructure::credentials::GenAiService;
use crate::services::{base_url_for, ChainOptions, SummarizationChain};

/// Resolve everything the server needs and return a gateway ready to serve.
///
/// Fails with a configuration error when the GenAI binding cannot be
/// resolved; the process must not start in that case.
pub async fn create_a2a_server(config: &Config) -> DomainResult<A2AGateway> {
    info!("Creating A2A server...");

    let base_url = base_url_for(config);

    let summarizer = build_summarizer(config).await?;
    let gateway = build_gateway(config, &base_url, summarizer);

    info!(base_url = %base_url, "A2A server created");
    Ok(gateway)
}

/// Resolve the GenAI binding and build the shared summarization chain.
pub async fn build_summarizer(config: &Config) -> DomainResult<Arc<dyn Summarizer>> {
    let service = GenAiService::resolve(
        &config.genai.service_name,
        config.genai.accept_invalid_certs,
    )?;
    let credentials = service.credential_record(&config.genai.api_path).await?;
    let chain = SummarizationChain::build(&credentials, ChainOptions::from(&config.genai))?;
    Ok(Arc::new(chain))
}

/// Assemble the gateway around an already built summarizer.
pub fn build_gateway(
    config: &Config,
    base_url: &str,
    summarizer: Arc<dyn Summarizer>,
) -> A2AGateway {
    let executor = Arc::new(SummarizationAgentExecutor::new(summarizer));
    let handler = RequestHandler::new(executor, Arc::new(InMemoryTaskStore::new()));
    A2AGateway::new(
        A2AHttpConfig::from(config),
        build_agent_card(base_url),
        handler,
    )
}
