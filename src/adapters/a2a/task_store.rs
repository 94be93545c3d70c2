//! In-memory task store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AgentEvent, Message, Task};
use crate::domain::ports::TaskStore;

/// Process-lifetime task storage; tasks are never evicted.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<String, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn get(&self, task_id: &str) -> DomainResult<Option<Task>> {
        Ok(self.tasks.read().await.get(task_id).cloned())
    }

    async fn save(&self, task: Task) -> DomainResult<()> {
        self.tasks.write().await.insert(task.id.clone(), task);
        Ok(())
    }

    async fn apply(&self, event: &AgentEvent) -> DomainResult<Task> {
        let mut tasks = self.tasks.write().await;
        match event {
            AgentEvent::Task(task) => {
                debug!(task_id = %task.id, state = %task.status.state, "storing task");
                tasks.insert(task.id.clone(), task.clone());
                Ok(task.clone())
            }
            AgentEvent::StatusUpdate(update) => {
                let task = tasks
                    .get_mut(&update.task_id)
                    .ok_or_else(|| DomainError::TaskNotFound(update.task_id.clone()))?;
                debug!(task_id = %task.id, state = %update.status.state, "applying status update");
                task.apply_status(update.status.clone());
                Ok(task.clone())
            }
        }
    }

    async fn append_history(&self, task_id: &str, message: Message) -> DomainResult<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(task_id)
            .ok_or_else(|| DomainError::TaskNotFound(task_id.to_string()))?;

        if task.status.state.is_terminal() {
            return Err(DomainError::TaskTerminal {
                task_id: task.id.clone(),
                state: task.status.state.to_string(),
            });
        }

        task.append_message(message);
        debug!(task_id = %task.id, history_len = task.history.len(), "appended follow-up");
        Ok(task.clone())
    }
}
