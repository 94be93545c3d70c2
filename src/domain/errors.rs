//! Domain errors for the summarization agent.

use thiserror::Error;

/// Domain-level errors that can occur in the summarization agent.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The backing GenAI service is missing or malformed. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A single summarization call against the completion endpoint failed.
    #[error("Upstream call failed: {0}")]
    UpstreamCall(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// The task cannot accept the requested change in its current state.
    #[error("Task {task_id} is in terminal state: {state}")]
    TaskTerminal { task_id: String, state: String },

    #[error("Event queue closed for task {0}")]
    QueueClosed(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Returns true for errors that must stop the process from starting.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<minijinja::Error> for DomainError {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}
