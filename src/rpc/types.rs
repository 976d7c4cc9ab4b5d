//! Types for communicating with the code-execution service.

use serde::{Deserialize, Serialize};

/// Request body sent to the execution service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

impl ExecutionRequest {
    pub fn new(
        code: impl Into<String>,
        language: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            session_id: session_id.into(),
        }
    }
}

/// Raw response from the execution service (parsed later)
///
/// Kept as `serde_json::Value` because the service returns either the wire
/// trace document or an error object; the client tells them apart.
pub type RawExecutionResponse = serde_json::Value;
