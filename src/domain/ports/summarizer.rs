//! Summarizer port - interface for the text summarization backend.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// A stateless callable that turns input text into a summary.
///
/// One instance is built at startup and shared by every task execution,
/// so implementations must not keep per-call state.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` with exactly one round trip to the backend.
    async fn run(&self, text: &str) -> DomainResult<String>;
}
