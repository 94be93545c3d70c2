//! Credentials management infrastructure
//!
//! Resolves the GenAI service bound to the application:
//! - `VCAP_SERVICES` registry lookup
//! - Endpoint block validation
//! - Advertised model discovery

pub mod genai;
pub mod vcap;

pub use genai::{GenAiEndpoint, GenAiService};
pub use vcap::{ServiceBinding, VcapServices, VCAP_SERVICES};
