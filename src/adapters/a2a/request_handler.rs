//! Protocol-level request handling on top of an executor and a task store.
//!
//! Each request gets its own event queue. A driver task drains the queue,
//! applies every event to the store and forwards it to the caller, so the
//! store reaches the final state even when the client goes away.

use futures::stream::{self, Stream};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::jsonrpc::{MessageSendParams, RpcError, TaskIdParams, TaskQueryParams};
use crate::application::{AgentExecutor, EventQueue, RequestContext};
use crate::domain::errors::DomainError;
use crate::domain::models::{AgentEvent, Task};
use crate::domain::ports::TaskStore;

/// Dispatches A2A methods to the executor and task store.
#[derive(Clone)]
pub struct RequestHandler {
    executor: Arc<dyn AgentExecutor>,
    store: Arc<dyn TaskStore>,
}

impl RequestHandler {
    pub fn new(executor: Arc<dyn AgentExecutor>, store: Arc<dyn TaskStore>) -> Self {
        Self { executor, store }
    }

    pub fn store(&self) -> Arc<dyn TaskStore> {
        Arc::clone(&self.store)
    }

    /// `message/send`: run the executor to its final event and return the task.
    pub async fn on_message_send(&self, params: MessageSendParams) -> Result<Task, RpcError> {
        let history_length = params.history_length();
        let context = self.prepare(params).await?;
        let task_id = context.task_id.clone();

        let mut events = self.dispatch(context);
        while events.recv().await.is_some() {}

        let task = self
            .store
            .get(&task_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| RpcError::Internal(format!("Executor produced no task {task_id}")))?;

        Ok(task.with_history_limit(history_length))
    }

    /// `message/stream`: events in publication order, ending after the final one.
    pub async fn on_message_stream(
        &self,
        params: MessageSendParams,
    ) -> Result<impl Stream<Item = AgentEvent> + Send + 'static, RpcError> {
        let context = self.prepare(params).await?;
        let events = self.dispatch(context);

        Ok(stream::unfold(events, |mut events| async move {
            events.recv().await.map(|event| (event, events))
        }))
    }

    /// `tasks/get`
    pub async fn on_get_task(&self, params: TaskQueryParams) -> Result<Task, RpcError> {
        let task = self
            .store
            .get(&params.id)
            .await
            .map_err(internal)?
            .ok_or(RpcError::TaskNotFound(params.id))?;
        Ok(task.with_history_limit(params.history_length))
    }

    /// `tasks/cancel`: hand the request to the executor and echo the task.
    ///
    /// The stored task is left untouched; the returned copy carries the
    /// executor's cancellation status in its metadata.
    pub async fn on_cancel_task(&self, params: TaskIdParams) -> Result<Task, RpcError> {
        let task = self
            .store
            .get(&params.id)
            .await
            .map_err(internal)?
            .ok_or_else(|| RpcError::TaskNotFound(params.id.clone()))?;

        let latest = task.history.last().cloned().ok_or_else(|| {
            RpcError::Internal(format!("Task {} has no history", task.id))
        })?;
        let context = RequestContext::new(latest, Some(task.clone()));
        let (queue, _events) = EventQueue::new();

        let status = self
            .executor
            .cancel(&context, &queue)
            .await
            .map_err(internal)?;
        info!(task_id = %task.id, status = status.as_str(), "Cancel handled");

        let mut response = task;
        let mut metadata = match response.metadata.take() {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        metadata.insert("cancellation".to_string(), json!(status.as_str()));
        response.metadata = Some(Value::Object(metadata));
        Ok(response)
    }

    /// Resolve the task a message continues and build its request context.
    async fn prepare(&self, params: MessageSendParams) -> Result<RequestContext, RpcError> {
        let mut message = params.message;
        if message.metadata.is_none() {
            message.metadata = params.metadata;
        }

        let current_task = match message.task_id.as_deref() {
            Some(task_id) => Some(
                self.store
                    .append_history(task_id, message.clone())
                    .await
                    .map_err(|e| match e {
                        DomainError::TaskNotFound(task_id) => RpcError::TaskNotFound(task_id),
                        DomainError::TaskTerminal { task_id, state } => RpcError::InvalidParams(
                            format!("Task {task_id} is in terminal state: {state}"),
                        ),
                        other => internal(other),
                    })?,
            ),
            None => None,
        };

        Ok(RequestContext::new(message, current_task))
    }

    /// Start the executor and the driver that feeds the store.
    fn dispatch(&self, context: RequestContext) -> mpsc::UnboundedReceiver<AgentEvent> {
        let (queue, mut events) = EventQueue::new();
        let (forward, receiver) = mpsc::unbounded_channel();
        let executor = Arc::clone(&self.executor);
        let store = Arc::clone(&self.store);
        let task_id = context.task_id.clone();

        tokio::spawn(async move {
            let run = tokio::spawn(async move { executor.execute(&context, &queue).await });

            while let Some(event) = events.recv().await {
                if let Err(e) = store.apply(&event).await {
                    warn!(task_id = %event.task_id(), error = %e, "Failed to apply event");
                }
                let is_final = event.is_final();
                // The caller may have disconnected; the store is already updated.
                let _ = forward.send(event);
                if is_final {
                    break;
                }
            }

            match run.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(task_id = %task_id, error = %e, "Executor failed"),
                Err(e) => error!(task_id = %task_id, error = %e, "Executor task aborted"),
            }
        });

        receiver
    }
}

fn internal(err: DomainError) -> RpcError {
    RpcError::Internal(err.to_string())
}

impl std::fmt::Debug for RequestHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestHandler").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::a2a::InMemoryTaskStore;
    use crate::application::SummarizationAgentExecutor;
    use crate::domain::errors::DomainResult;
    use crate::domain::models::{Message, TaskState};
    use crate::domain::ports::Summarizer;
    use async_trait::async_trait;
    use futures::StreamExt;

    struct Echo;

    #[async_trait]
    impl Summarizer for Echo {
        async fn run(&self, text: &str) -> DomainResult<String> {
            Ok(format!("summary of {text}"))
        }
    }

    fn handler() -> RequestHandler {
        RequestHandler::new(
            Arc::new(SummarizationAgentExecutor::new(Arc::new(Echo))),
            Arc::new(InMemoryTaskStore::new()),
        )
    }

    fn send_params(message: Message) -> MessageSendParams {
        MessageSendParams {
            message,
            configuration: None,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_send_returns_completed_task() {
        let handler = handler();
        let task = handler
            .on_message_send(send_params(Message::user_text("hello")))
            .await
            .unwrap();

        assert_eq!(task.status.state, TaskState::Completed);
        let reply = task.status.message.as_ref().unwrap();
        assert_eq!(reply.text_content(), "summary of hello");
        // user message plus the working update
        assert_eq!(task.history.len(), 2);
    }

    #[tokio::test]
    async fn test_stream_yields_lifecycle_in_order() {
        let handler = handler();
        let events: Vec<AgentEvent> = handler
            .on_message_stream(send_params(Message::user_text("hello")))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], AgentEvent::Task(_)));
        assert!(!events[1].is_final());
        assert!(events[2].is_final());

        let stored = handler.store().get(events[0].task_id()).await.unwrap().unwrap();
        assert_eq!(stored.status.state, TaskState::Completed);
    }

    #[tokio::test]
    async fn test_follow_up_on_completed_task_is_rejected() {
        let handler = handler();
        let task = handler
            .on_message_send(send_params(Message::user_text("hello")))
            .await
            .unwrap();

        let mut follow_up = Message::user_text("again");
        follow_up.task_id = Some(task.id.clone());
        let err = handler
            .on_message_send(send_params(follow_up))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::InvalidParams(_)));

        let stored = handler.store().get(&task.id).await.unwrap().unwrap();
        assert_eq!(stored, task);
    }

    #[tokio::test]
    async fn test_follow_up_on_working_task_runs_again() {
        let handler = handler();
        let mut task = Task::from_message(&Message::user_text("first"));
        task.status = crate::domain::models::TaskStatus::now(TaskState::Working, None);
        handler.store().save(task.clone()).await.unwrap();

        let mut follow_up = Message::user_text("second");
        follow_up.task_id = Some(task.id.clone());
        let done = handler
            .on_message_send(send_params(follow_up))
            .await
            .unwrap();

        assert_eq!(done.id, task.id);
        assert_eq!(done.status.state, TaskState::Completed);
        assert_eq!(
            done.status.message.as_ref().unwrap().text_content(),
            "summary of second"
        );
        let texts: Vec<String> = done.history.iter().map(Message::text_content).collect();
        assert_eq!(
            texts,
            vec!["first", "second", "Processing your text for summarization..."]
        );
    }

    #[tokio::test]
    async fn test_unknown_task_id_on_send() {
        let mut message = Message::user_text("hello");
        message.task_id = Some("missing".to_string());
        let err = handler()
            .on_message_send(send_params(message))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::TaskNotFound(_)));
    }

    #[tokio::test]
    async fn test_cancel_leaves_task_unchanged() {
        let handler = handler();
        let task = handler
            .on_message_send(send_params(Message::user_text("hello")))
            .await
            .unwrap();

        let canceled = handler
            .on_cancel_task(TaskIdParams { id: task.id.clone() })
            .await
            .unwrap();
        assert_eq!(canceled.status.state, TaskState::Completed);
        assert_eq!(
            canceled.metadata.unwrap()["cancellation"],
            json!("accepted-no-op")
        );

        let stored = handler.store().get(&task.id).await.unwrap().unwrap();
        assert!(stored.metadata.is_none());
    }

    #[tokio::test]
    async fn test_get_with_history_length() {
        let handler = handler();
        let task = handler
            .on_message_send(send_params(Message::user_text("hello")))
            .await
            .unwrap();

        let fetched = handler
            .on_get_task(TaskQueryParams {
                id: task.id.clone(),
                history_length: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(fetched.history.len(), 1);

        let err = handler
            .on_get_task(TaskQueryParams {
                id: "missing".to_string(),
                history_length: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::TaskNotFound(_)));
    }
}
