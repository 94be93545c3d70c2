//! Channel carrying executor events to the request handler.

use tokio::sync::mpsc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::AgentEvent;

/// Publishing side of an executor's event stream.
///
/// Unbounded: executors never wait on slow consumers.
#[derive(Debug, Clone)]
pub struct EventQueue {
    sender: mpsc::UnboundedSender<AgentEvent>,
}

impl EventQueue {
    /// Create a queue and the receiver that drains it.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AgentEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Publish one event.
    pub fn enqueue(&self, event: AgentEvent) -> DomainResult<()> {
        let task_id = event.task_id().to_string();
        self.sender
            .send(event)
            .map_err(|_| DomainError::QueueClosed(task_id))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
