//! A2A Summarizer - text summarization agent
//!
//! Exposes a single LLM-backed summarization skill over the agent-to-agent
//! (A2A) JSON-RPC protocol. Each task moves submitted → working → completed;
//! failures complete the task with the error text.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Protocol models, errors and port traits
//! - **Application Layer** (`application`): Task executor and event queue
//! - **Service Layer** (`services`): Summarization chain, base URL resolution
//! - **Infrastructure Layer** (`infrastructure`): Config, logging, credentials, HTTP client
//! - **Adapters Layer** (`adapters`): A2A HTTP gateway
//!
//! # Example
//!
//! ```ignore
//! use a2a_summarizer::{bootstrap, ConfigLoader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let gateway = bootstrap::create_a2a_server(&config).await?;
//!     gateway.serve_with_shutdown(async {}).await.map_err(|e| anyhow::anyhow!("{e}"))?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::a2a::{A2AGateway, A2AHttpConfig, InMemoryTaskStore, RequestHandler};
pub use application::{
    AgentExecutor, CancellationStatus, EventQueue, RequestContext, SummarizationAgentExecutor,
};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{AgentCard, Config, CredentialRecord, Message, Task, TaskState};
pub use domain::ports::{Summarizer, TaskStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{resolve_base_url, ChainOptions, SummarizationChain};
