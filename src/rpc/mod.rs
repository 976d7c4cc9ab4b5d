//! Client for the external code-execution service.

pub mod client;
pub mod types;

// Re-export main types
pub use client::{interpret_response, ExecutionClient};
pub use types::ExecutionRequest;
