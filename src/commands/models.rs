use crate::utils::config::{DEFAULT_EXEC_URL, DEFAULT_LANGUAGE};
use std::path::PathBuf;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Trace JSON file to render (mutually exclusive with `code_file`)
    pub trace_file: Option<PathBuf>,

    /// Source file to run through the execution service
    pub code_file: Option<PathBuf>,

    /// Language sent to the execution service
    pub language: String,

    /// Session id sent to the execution service (generated when absent)
    pub session_id: Option<String>,

    /// Execution service endpoint
    pub exec_url: String,

    /// Output path for the JSON graph document
    pub output_json: PathBuf,

    /// Render only this step (all steps when None)
    pub step: Option<usize>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            trace_file: None,
            code_file: None,
            language: DEFAULT_LANGUAGE.to_string(),
            session_id: None,
            exec_url: DEFAULT_EXEC_URL.to_string(),
            output_json: PathBuf::from("graph.json"),
            step: None,
            print_summary: false,
        }
    }
}
