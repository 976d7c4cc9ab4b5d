//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Shape-level anomalies inside a single trace step (malformed values,
//! dangling references, unknown heap kinds) are never errors: the graph
//! builder absorbs them. Only the absence of a usable trace is an error.

use thiserror::Error;

/// Errors that can occur while talking to the code-execution service
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid execution service response: {0}")]
    InvalidResponse(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Execution service returned no trace steps")]
    EmptyTrace,
}

/// Errors that can occur during trace parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Trace contains no steps")]
    EmptyTrace,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur when looking up step graphs
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Step {index} out of range (trace has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },

    #[error("Trace has no step {step_index} (it was missing or failed to parse)")]
    StepNotFound { step_index: usize },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
