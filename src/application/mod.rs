pub mod agent_executor;
pub mod event_queue;

pub use agent_executor::{
    AgentExecutor, CancellationStatus, RequestContext, SummarizationAgentExecutor,
    ERROR_PREFIX, WORKING_MESSAGE,
};
pub use event_queue::EventQueue;
