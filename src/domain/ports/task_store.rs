//! Task store port - persistence for A2A tasks.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentEvent, Message, Task};

/// Storage for tasks, mutated only by applying executor events.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Get a task by ID
    async fn get(&self, task_id: &str) -> DomainResult<Option<Task>>;

    /// Insert or replace a task
    async fn save(&self, task: Task) -> DomainResult<()>;

    /// Apply an executor event and return the resulting task
    async fn apply(&self, event: &AgentEvent) -> DomainResult<Task>;

    /// Append a follow-up message to a non-terminal task in one step
    ///
    /// Fails with `TaskNotFound` for unknown ids and `TaskTerminal` once the
    /// task has finished.
    async fn append_history(&self, task_id: &str, message: Message) -> DomainResult<Task>;
}
