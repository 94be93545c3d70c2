use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::event_queue::EventQueue;
use crate::domain::errors::DomainResult;
use crate::domain::models::{
    AgentEvent, Message, Task, TaskState, TaskStatus, TaskStatusUpdateEvent,
};
use crate::domain::ports::Summarizer;

/// Progress text published when work starts.
pub const WORKING_MESSAGE: &str = "Processing your text for summarization...";

/// Prefix of the completion text reported when summarization fails.
pub const ERROR_PREFIX: &str = "Error during summarization: ";

const INPUT_PREVIEW_CHARS: usize = 100;

/// Everything an executor needs to know about one incoming request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Latest user message, stamped with `task_id` and `context_id`
    pub message: Message,

    /// Task the message continues, if any
    pub current_task: Option<Task>,

    pub task_id: String,
    pub context_id: String,
}

impl RequestContext {
    /// Build a context, settling the task and context identifiers.
    ///
    /// An existing task wins; otherwise ids carried by the message are reused
    /// and missing ones generated.
    pub fn new(mut message: Message, current_task: Option<Task>) -> Self {
        let (task_id, context_id) = match &current_task {
            Some(task) => (task.id.clone(), task.context_id.clone()),
            None => (
                message
                    .task_id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
                message
                    .context_id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
            ),
        };

        message.task_id = Some(task_id.clone());
        message.context_id = Some(context_id.clone());

        Self {
            message,
            current_task,
            task_id,
            context_id,
        }
    }

    /// Text of the user's message.
    pub fn user_input(&self) -> String {
        self.message.text_content()
    }
}

/// Result of a cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationStatus {
    /// Acknowledged; in-flight work keeps running and nothing is recorded.
    AcceptedNoOp,
}

impl CancellationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AcceptedNoOp => "accepted-no-op",
        }
    }
}

/// Agent business logic behind the protocol surface.
///
/// Implementations report progress only through the event queue.
#[async_trait]
pub trait AgentExecutor: Send + Sync + 'static {
    async fn execute(&self, context: &RequestContext, queue: &EventQueue) -> DomainResult<()>;

    async fn cancel(
        &self,
        context: &RequestContext,
        queue: &EventQueue,
    ) -> DomainResult<CancellationStatus>;
}

/// Executor that runs one summarization per task.
///
/// Lifecycle: submitted (new tasks only), working, then completed. Failures
/// also end in `completed`, carrying the error text.
pub struct SummarizationAgentExecutor {
    summarizer: Arc<dyn Summarizer>,
}

impl SummarizationAgentExecutor {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self { summarizer }
    }

    fn status_update(
        context: &RequestContext,
        state: TaskState,
        text: impl Into<String>,
        is_final: bool,
    ) -> AgentEvent {
        let message = Message::agent_text(text, &context.context_id, &context.task_id);
        AgentEvent::StatusUpdate(TaskStatusUpdateEvent::new(
            &context.task_id,
            &context.context_id,
            TaskStatus::now(state, Some(message)),
            is_final,
        ))
    }
}

#[async_trait]
impl AgentExecutor for SummarizationAgentExecutor {
    #[instrument(skip(self, context, queue), fields(task_id = %context.task_id))]
    async fn execute(&self, context: &RequestContext, queue: &EventQueue) -> DomainResult<()> {
        let query = context.user_input();
        let preview: String = query.chars().take(INPUT_PREVIEW_CHARS).collect();
        info!(input_preview = %preview, "Received summarization request");

        if context.current_task.is_none() {
            queue.enqueue(AgentEvent::Task(Task::from_message(&context.message)))?;
        }

        queue.enqueue(Self::status_update(
            context,
            TaskState::Working,
            WORKING_MESSAGE,
            false,
        ))?;

        // Run the chain on its own task so a panic surfaces as a JoinError.
        let summarizer = Arc::clone(&self.summarizer);
        let outcome = tokio::spawn(async move { summarizer.run(&query).await }).await;

        let text = match outcome {
            Ok(Ok(summary)) => {
                info!(summary_len = summary.len(), "Summarization completed");
                summary
            }
            Ok(Err(e)) => {
                error!(error = %e, "Summarization failed");
                format!("{ERROR_PREFIX}{e}")
            }
            Err(e) => {
                let reason = join_error_reason(e);
                error!(error = %reason, "Summarization worker aborted");
                format!("{ERROR_PREFIX}{reason}")
            }
        };

        queue.enqueue(Self::status_update(context, TaskState::Completed, text, true))
    }

    async fn cancel(
        &self,
        context: &RequestContext,
        _queue: &EventQueue,
    ) -> DomainResult<CancellationStatus> {
        info!(task_id = %context.task_id, "Task cancellation requested");
        Ok(CancellationStatus::AcceptedNoOp)
    }
}

fn join_error_reason(err: JoinError) -> String {
    if err.is_panic() {
        let payload = err.into_panic();
        panic_message(payload.as_ref())
    } else {
        err.to_string()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "summarization worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use tokio::sync::mpsc::UnboundedReceiver;

    struct FixedSummarizer(&'static str);

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn run(&self, text: &str) -> DomainResult<String> {
            Ok(format!("{}: {}", self.0, text.len()))
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn run(&self, _text: &str) -> DomainResult<String> {
            Err(DomainError::UpstreamCall("connection refused".to_string()))
        }
    }

    struct PanickingSummarizer;

    #[async_trait]
    impl Summarizer for PanickingSummarizer {
        async fn run(&self, _text: &str) -> DomainResult<String> {
            panic!("model exploded")
        }
    }

    async fn run_executor(
        summarizer: Arc<dyn Summarizer>,
        context: &RequestContext,
    ) -> Vec<AgentEvent> {
        let executor = SummarizationAgentExecutor::new(summarizer);
        let (queue, mut receiver): (EventQueue, UnboundedReceiver<AgentEvent>) =
            EventQueue::new();
        executor.execute(context, &queue).await.unwrap();
        drop(queue);

        let mut events = Vec::new();
        while let Some(event) = receiver.recv().await {
            events.push(event);
        }
        events
    }

    fn status_text(event: &AgentEvent) -> String {
        match event {
            AgentEvent::StatusUpdate(update) => update
                .status
                .message
                .as_ref()
                .map(Message::text_content)
                .unwrap_or_default(),
            AgentEvent::Task(_) => panic!("expected a status update"),
        }
    }

    fn state_of(event: &AgentEvent) -> TaskState {
        match event {
            AgentEvent::StatusUpdate(update) => update.status.state,
            AgentEvent::Task(task) => task.status.state,
        }
    }

    #[test]
    fn test_context_generates_missing_ids() {
        let context = RequestContext::new(Message::user_text("hi"), None);
        assert!(!context.task_id.is_empty());
        assert_eq!(context.message.task_id.as_deref(), Some(context.task_id.as_str()));
        assert_eq!(
            context.message.context_id.as_deref(),
            Some(context.context_id.as_str())
        );
    }

    #[test]
    fn test_context_prefers_existing_task() {
        let task = Task::from_message(&Message::user_text("first"));
        let mut follow_up = Message::user_text("second");
        follow_up.context_id = Some("other".to_string());

        let context = RequestContext::new(follow_up, Some(task.clone()));
        assert_eq!(context.task_id, task.id);
        assert_eq!(context.context_id, task.context_id);
    }

    #[tokio::test]
    async fn test_success_lifecycle() {
        let context = RequestContext::new(Message::user_text("some long text"), None);
        let events = run_executor(Arc::new(FixedSummarizer("summary")), &context).await;

        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], AgentEvent::Task(task) if task.status.state == TaskState::Submitted));
        assert_eq!(state_of(&events[1]), TaskState::Working);
        assert_eq!(status_text(&events[1]), WORKING_MESSAGE);
        assert!(!events[1].is_final());
        assert_eq!(state_of(&events[2]), TaskState::Completed);
        assert_eq!(status_text(&events[2]), "summary: 14");
        assert!(events[2].is_final());

        for event in &events {
            assert_eq!(event.task_id(), context.task_id);
        }
    }

    #[tokio::test]
    async fn test_failure_completes_with_error_text() {
        let context = RequestContext::new(Message::user_text("text"), None);
        let events = run_executor(Arc::new(FailingSummarizer), &context).await;

        let last = events.last().unwrap();
        assert_eq!(state_of(last), TaskState::Completed);
        assert!(last.is_final());
        let text = status_text(last);
        assert!(text.starts_with(ERROR_PREFIX));
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_panic_completes_with_error_text() {
        let context = RequestContext::new(Message::user_text("text"), None);
        let events = run_executor(Arc::new(PanickingSummarizer), &context).await;

        let last = events.last().unwrap();
        assert_eq!(state_of(last), TaskState::Completed);
        assert_eq!(status_text(last), format!("{ERROR_PREFIX}model exploded"));
    }

    #[tokio::test]
    async fn test_existing_task_is_not_republished() {
        let task = Task::from_message(&Message::user_text("first"));
        let context = RequestContext::new(Message::user_text("again"), Some(task.clone()));
        let events = run_executor(Arc::new(FixedSummarizer("s")), &context).await;

        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|event| matches!(event, AgentEvent::StatusUpdate(_))));
        assert_eq!(events[1].task_id(), task.id);
    }

    #[tokio::test]
    async fn test_empty_input_is_still_summarized() {
        let context = RequestContext::new(Message::user_text(""), None);
        let events = run_executor(Arc::new(FixedSummarizer("empty")), &context).await;
        assert_eq!(status_text(events.last().unwrap()), "empty: 0");
    }

    #[tokio::test]
    async fn test_cancel_is_accepted_no_op() {
        let executor = SummarizationAgentExecutor::new(Arc::new(FixedSummarizer("s")));
        let (queue, mut receiver) = EventQueue::new();
        let context = RequestContext::new(Message::user_text("x"), None);

        let status = executor.cancel(&context, &queue).await.unwrap();
        assert_eq!(status, CancellationStatus::AcceptedNoOp);
        assert_eq!(status.as_str(), "accepted-no-op");

        drop(queue);
        assert!(receiver.recv().await.is_none());
    }
}
