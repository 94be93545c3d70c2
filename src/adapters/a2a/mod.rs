//! A2A protocol surface
//!
//! - JSON-RPC envelopes and error codes
//! - In-memory task store
//! - Request handler driving the executor
//! - Axum gateway with agent card discovery

pub mod agent_card;
pub mod gateway;
pub mod jsonrpc;
pub mod request_handler;
pub mod task_store;

pub use agent_card::build_agent_card;
pub use gateway::{A2AGateway, A2AHttpConfig, A2AState};
pub use jsonrpc::{A2AErrorCode, JsonRpcRequest, JsonRpcResponse, RpcError};
pub use request_handler::RequestHandler;
pub use task_store::InMemoryTaskStore;
