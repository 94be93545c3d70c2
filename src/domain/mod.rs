//! Domain layer: protocol models, errors and ports.

pub mod errors;
pub mod models;
pub mod ports;
