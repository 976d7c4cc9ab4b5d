//! Blocking HTTP client for the external code-execution service.

use super::types::{ExecutionRequest, RawExecutionResponse};
use crate::parser::{parse_trace, ExecutionTrace};
use crate::utils::config::DEFAULT_EXEC_TIMEOUT;
use crate::utils::error::{ParseError, RpcError};
use log::{debug, info};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// Client that submits code and receives an execution trace
pub struct ExecutionClient {
    client: Client,
    endpoint: String,
}

impl ExecutionClient {
    /// Create a new client with the default timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RpcError> {
        Self::with_timeout(endpoint, DEFAULT_EXEC_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RpcError::RequestFailed)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Run code remotely and return its parsed trace
    ///
    /// # Errors
    /// * `RpcError::RequestFailed` - Transport failure
    /// * `RpcError::InvalidResponse` - Non-2xx status or unparseable body
    /// * `RpcError::ExecutionFailed` - The service reported an error
    /// * `RpcError::EmptyTrace` - The service returned no steps
    pub fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionTrace, RpcError> {
        info!(
            "Requesting trace from {} (language: {}, session: {})",
            self.endpoint, request.language, request.session_id
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(RpcError::RequestFailed)?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(RpcError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        let body: RawExecutionResponse = response.json().map_err(RpcError::RequestFailed)?;

        interpret_response(&body)
    }
}

/// Turn a service response body into a trace, or an explicit failure
///
/// A failed run is never turned into an empty trace.
pub fn interpret_response(body: &Value) -> Result<ExecutionTrace, RpcError> {
    if let Some(message) = service_error(body) {
        return Err(RpcError::ExecutionFailed(message));
    }

    match parse_trace(body) {
        Ok(trace) => {
            debug!("Execution service returned {} steps", trace.steps.len());
            Ok(trace)
        }
        Err(ParseError::EmptyTrace) => Err(RpcError::EmptyTrace),
        Err(e) => Err(RpcError::InvalidResponse(e.to_string())),
    }
}

/// Error message from `{"error": ..}` or `{"exception": ..}` bodies
fn service_error(body: &Value) -> Option<String> {
    let error = ["error", "exception"]
        .iter()
        .filter_map(|field| body.get(*field))
        .find(|value| !value.is_null())?;
    match error {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(
            other
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        ),
    }
}
