//! Output writers for graph documents.
//!
//! This module handles:
//! - The versioned graph document schema
//! - JSON documents (write and read back)
//! - Text summaries for the terminal

pub mod document;
pub mod json;
pub mod text;

// Re-export main functions
pub use document::{to_document, GraphDocument};
pub use json::{document_to_string, read_graph_document, write_graph_document};
pub use text::render_step_summary;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
