//! OpenAI-compatible chat completion client
//!
//! - Bearer-token authentication
//! - Optional acceptance of self-signed certificates
//! - Status-code error classification

pub mod client;
pub mod error;
pub mod types;

pub use client::{OpenAiClient, OpenAiClientConfig};
pub use error::OpenAiApiError;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
