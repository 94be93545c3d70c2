//! Adapters layer
//!
//! Inbound adapters that expose the agent to the network.

pub mod a2a;
