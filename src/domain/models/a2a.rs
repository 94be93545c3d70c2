//! Agent-to-Agent (A2A) protocol domain models.
//!
//! Wire shapes for tasks, messages, status updates and the agent card,
//! serialized the way A2A clients expect them (camelCase, `kind` tags).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// Task lifecycle state matching the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    InputRequired,
    Completed,
    Canceled,
    Failed,
    Rejected,
    AuthRequired,
    Unknown,
}

impl TaskState {
    /// Whether no further transitions are expected from this state.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Canceled | Self::Failed | Self::Rejected
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Working => "working",
            Self::InputRequired => "input-required",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Failed => "failed",
            Self::Rejected => "rejected",
            Self::AuthRequired => "auth-required",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File payload carried by a file part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Base64 encoded content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Message part for multimodal content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },
    Data {
        data: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },
    File {
        file: FileContent,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            metadata: None,
        }
    }
}

fn message_kind() -> String {
    "message".to_string()
}

fn task_kind() -> String {
    "task".to_string()
}

fn status_update_kind() -> String {
    "status-update".to_string()
}

/// A2A protocol message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default = "message_kind")]
    pub kind: String,
}

impl Message {
    /// Create a single-part text message authored by the agent.
    pub fn agent_text(
        text: impl Into<String>,
        context_id: impl Into<String>,
        task_id: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Agent,
            parts: vec![Part::text(text)],
            message_id: Uuid::new_v4().to_string(),
            task_id: Some(task_id.into()),
            context_id: Some(context_id.into()),
            metadata: None,
            kind: message_kind(),
        }
    }

    /// Create a single-part text message authored by the user.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::text(text)],
            message_id: Uuid::new_v4().to_string(),
            task_id: None,
            context_id: None,
            metadata: None,
            kind: message_kind(),
        }
    }

    /// Concatenated text of all text parts, newline separated.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Current status of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl TaskStatus {
    /// Status stamped with the current time.
    pub fn now(state: TaskState, message: Option<Message>) -> Self {
        Self {
            state,
            message,
            timestamp: Some(Utc::now().to_rfc3339()),
        }
    }
}

/// A2A task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub context_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub history: Vec<Message>,
    /// Always empty; results travel in the final status message.
    #[serde(default)]
    pub artifacts: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default = "task_kind")]
    pub kind: String,
}

impl Task {
    /// Create a submitted task seeded with the request message.
    ///
    /// Identifiers carried by the message are reused; missing ones are
    /// generated.
    pub fn from_message(message: &Message) -> Self {
        let id = message
            .task_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let context_id = message
            .context_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut seed = message.clone();
        seed.task_id = Some(id.clone());
        seed.context_id = Some(context_id.clone());

        Self {
            id,
            context_id,
            status: TaskStatus::now(TaskState::Submitted, None),
            history: vec![seed],
            artifacts: Vec::new(),
            metadata: None,
            kind: task_kind(),
        }
    }

    /// Apply a status update, moving the previous status message into history.
    pub fn apply_status(&mut self, status: TaskStatus) {
        if let Some(previous) = self.status.message.take() {
            self.history.push(previous);
        }
        self.status = status;
    }

    /// Record a follow-up message under this task's identifiers.
    pub fn append_message(&mut self, mut message: Message) {
        message.task_id = Some(self.id.clone());
        message.context_id = Some(self.context_id.clone());
        self.history.push(message);
    }

    /// Copy of the task keeping only the last `len` history entries.
    ///
    /// `None` and `Some(0)` both mean no limit.
    pub fn with_history_limit(&self, len: Option<usize>) -> Self {
        let mut task = self.clone();
        if let Some(len) = len.filter(|len| *len > 0) {
            let start = task.history.len().saturating_sub(len);
            task.history.drain(..start);
        }
        task
    }
}

/// Status change notification published by an executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusUpdateEvent {
    pub task_id: String,
    pub context_id: String,
    pub status: TaskStatus,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default = "status_update_kind")]
    pub kind: String,
}

impl TaskStatusUpdateEvent {
    pub fn new(
        task_id: impl Into<String>,
        context_id: impl Into<String>,
        status: TaskStatus,
        is_final: bool,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            context_id: context_id.into(),
            status,
            is_final,
            metadata: None,
            kind: status_update_kind(),
        }
    }
}

/// Event flowing from an executor through the event queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentEvent {
    Task(Task),
    StatusUpdate(TaskStatusUpdateEvent),
}

impl AgentEvent {
    pub fn task_id(&self) -> &str {
        match self {
            Self::Task(task) => &task.id,
            Self::StatusUpdate(update) => &update.task_id,
        }
    }

    /// Whether this event ends the executor's stream for its task.
    pub fn is_final(&self) -> bool {
        match self {
            Self::Task(task) => task.status.state.is_terminal(),
            Self::StatusUpdate(update) => update.is_final,
        }
    }
}

/// Skill advertised in the agent card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Capabilities in the agent card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    pub streaming: bool,
    #[serde(default)]
    pub push_notifications: bool,
    #[serde(default)]
    pub state_transition_history: bool,
}

/// Discovery document served at `/.well-known/agent.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    pub default_input_modes: Vec<String>,
    pub default_output_modes: Vec<String>,
    pub capabilities: AgentCapabilities,
    pub skills: Vec<AgentSkill>,
}
