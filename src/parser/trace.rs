//! Main trace parser for execution-service output.
//!
//! Parses the raw `{code, trace}` JSON document into an [`ExecutionTrace`].
//! Individual malformed steps are logged and skipped; a document with no
//! usable step at all is an error, never an empty trace.

use super::schema::{ExecutionTrace, TraceStep};
use crate::utils::config::TRACE_FIELD_NAMES;
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Parse a raw execution trace document
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw_trace` - Either `{"code": .., "trace": [..]}` or a bare array of steps
///
/// # Returns
/// Parsed trace ready for graph building
///
/// # Errors
/// * `ParseError::InvalidFormat` - Not an object/array, or every step failed to parse
/// * `ParseError::EmptyTrace` - No steps present
pub fn parse_trace(raw_trace: &Value) -> Result<ExecutionTrace, ParseError> {
    let (code, steps_array) = extract_parts(raw_trace)?;

    let steps = parse_steps_array(steps_array)?;

    debug!("Parsed {} trace steps", steps.len());

    Ok(ExecutionTrace { code, steps })
}

/// Check the structure of a raw trace without keeping the result
///
/// **Public** - used by the validate command
pub fn validate_trace_format(raw_trace: &Value) -> Result<usize, ParseError> {
    parse_trace(raw_trace).map(|trace| trace.steps.len())
}

/// Read and parse a trace file from disk
///
/// **Public** - used by commands
pub fn load_trace_file(path: impl AsRef<Path>) -> Result<ExecutionTrace, ParseError> {
    let path = path.as_ref();

    info!("Loading trace from: {}", path.display());

    let contents = std::fs::read_to_string(path)?;
    let raw: Value = serde_json::from_str(&contents)?;

    parse_trace(&raw)
}

/// Split the document into source code and the raw step array
///
/// **Private** - internal helper for parse_trace
fn extract_parts(raw_trace: &Value) -> Result<(String, &[Value]), ParseError> {
    match raw_trace {
        Value::Object(obj) => {
            let code = obj
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            // Try multiple possible field names
            let steps = TRACE_FIELD_NAMES
                .iter()
                .find_map(|field| obj.get(*field).and_then(Value::as_array));

            match steps {
                Some(steps) => Ok((code, steps.as_slice())),
                None => {
                    warn!("No trace array found in document");
                    Err(ParseError::EmptyTrace)
                }
            }
        }

        Value::Array(steps) => {
            debug!("Trace is a bare step array");
            Ok((String::new(), steps.as_slice()))
        }

        _ => Err(ParseError::InvalidFormat(
            "Trace must be a JSON object or array".to_string(),
        )),
    }
}

/// Parse array of trace steps
///
/// **Private** - internal parsing logic
fn parse_steps_array(steps_array: &[Value]) -> Result<Vec<TraceStep>, ParseError> {
    if steps_array.is_empty() {
        return Err(ParseError::EmptyTrace);
    }

    let mut steps = Vec::with_capacity(steps_array.len());

    for (index, step_value) in steps_array.iter().enumerate() {
        match TraceStep::deserialize(step_value) {
            Ok(mut step) => {
                step.index = index;
                steps.push(step);
            }
            Err(e) => {
                // Log but don't fail - some steps may be malformed
                warn!("Failed to parse step {}: {}", index, e);
            }
        }
    }

    if steps.is_empty() {
        return Err(ParseError::InvalidFormat(
            "All trace steps failed to parse".to_string(),
        ));
    }

    Ok(steps)
}
