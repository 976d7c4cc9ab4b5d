//! Trace parsing and wire decoding.
//!
//! This module handles:
//! - Parsing raw JSON from the execution service
//! - Decoding encoded values (scalars, references, C data)
//! - Classifying heap objects into a closed set of kinds

pub mod heap;
pub mod schema;
pub mod trace;
pub mod value;

// Re-export main types
pub use heap::{HeapObject, ObjectKind};
pub use schema::{ExecutionTrace, Frame, TraceStep};
pub use trace::{load_trace_file, parse_trace, validate_trace_format};
pub use value::{decode, EncodedValue, ValueKind};
