//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - Summarizer: the prompt-templated completion call
//! - TaskStore: storage for A2A tasks
//!
//! These traits let the executor be tested without a network or a server.

pub mod summarizer;
pub mod task_store;

pub use summarizer::Summarizer;
pub use task_store::TaskStore;
