//! Domain models: protocol shapes, credentials and configuration.

pub mod a2a;
pub mod config;
pub mod credentials;

pub use a2a::{
    AgentCapabilities, AgentCard, AgentEvent, AgentSkill, FileContent, Message, Part, Role, Task,
    TaskState, TaskStatus, TaskStatusUpdateEvent,
};
pub use config::{Config, GenAiConfig, LoggingConfig, ServerConfig};
pub use credentials::{AdvertisedModel, CredentialRecord};
