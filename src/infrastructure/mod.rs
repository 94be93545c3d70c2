//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Configuration management
//! - Logging infrastructure
//! - Credentials (Cloud Foundry service bindings)
//! - OpenAI-compatible API client
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod credentials;
pub mod logging;
pub mod openai;
