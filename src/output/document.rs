//! Output document schema.
//!
//! This module defines the structure of the JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::graph::StepGraph;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level graph document written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Where the trace came from (file path or service endpoint)
    pub source: String,

    /// Traced source code
    #[serde(default)]
    pub code: String,

    /// Number of steps in the full trace
    pub step_count: usize,

    /// Index of the rendered step when only one was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_step: Option<usize>,

    /// Step graphs, in trace order
    pub steps: Vec<StepGraph>,

    /// Timestamp when the document was generated
    pub generated_at: String,
}

/// Assemble an output document
///
/// **Public** - used by commands to create final output
pub fn to_document(
    source: impl Into<String>,
    code: impl Into<String>,
    step_count: usize,
    selected_step: Option<usize>,
    steps: Vec<StepGraph>,
) -> GraphDocument {
    use chrono::Utc;

    GraphDocument {
        version: SCHEMA_VERSION.to_string(),
        source: source.into(),
        code: code.into(),
        step_count,
        selected_step,
        steps,
        generated_at: Utc::now().to_rfc3339(),
    }
}
