//! Configuration and constants for the CLI and the graph compiler.

use std::time::Duration;

/// Default timeout for execution service requests
pub const DEFAULT_EXEC_TIMEOUT: Duration = Duration::from_secs(30);

/// Default execution service endpoint
pub const DEFAULT_EXEC_URL: &str = "http://localhost:4000/execute";

/// Language sent to the execution service when none is given
pub const DEFAULT_LANGUAGE: &str = "python";

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Tags found in the first slot of encoded values
pub const TAG_C_DATA: &str = "C_DATA";
pub const TAG_REF: &str = "REF";

// Tags found in the first slot of heap objects
pub const TAG_LIST: &str = "LIST";
pub const TAG_TUPLE: &str = "TUPLE";
pub const TAG_DICT: &str = "DICT";
pub const TAG_INSTANCE: &str = "INSTANCE";
pub const TAG_FUNCTION: &str = "FUNCTION";

/// Sentinel the tracer writes into a C_DATA value slot for unset variables
pub const UNINITIALIZED_MARKER: &str = "<UNINITIALIZED>";

/// Slot of the C_DATA array holding the uninitialized sentinel
pub const C_DATA_VALUE_SLOT: usize = 3;

/// Display string for uninitialized variables
pub const UNINITIALIZED_DISPLAY: &str = "uninitialized";

/// Prefix for synthesized reference display strings
pub const REFERENCE_ARROW: &str = "→ ";

/// Shown when a raw structured value cannot be stringified
pub const UNRENDERABLE_PLACEHOLDER: &str = "[unrenderable value]";

/// Shown for a declared variable that has no encoded value
pub const MISSING_VALUE_PLACEHOLDER: &str = "<missing>";

// Node id prefixes
pub const FRAME_ID_PREFIX: &str = "frame-";
pub const OBJECT_ID_PREFIX: &str = "object-";

/// Suffix distinguishing frame→function call edges from variable edges
pub const CALL_EDGE_SUFFIX: &str = "#call";
pub const CALL_EDGE_LABEL: &str = "call";

// Default layout (pixels)
pub const FRAME_COLUMN_X: f64 = 0.0;
pub const OBJECT_COLUMN_X: f64 = 400.0;
pub const ROW_SPACING: f64 = 150.0;

// Field names for trace parsing
pub const TRACE_FIELD_NAMES: &[&str] = &["trace", "steps", "result"];
