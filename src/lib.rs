//! Trace Graph Studio
//!
//! Compiles program-execution traces (call stacks and heaps captured by an
//! external tracer) into node/edge graphs that a presentation layer can
//! draw and animate step by step.
//!
//! ## Getting Started
//!
//! ```ignore
//! use trace_graph_studio::graph::build_graph;
//! use trace_graph_studio::parser::parse_trace;
//!
//! let trace = parse_trace(&raw_json)?;
//! let graph = build_graph(&trace.steps[0]);
//! ```
//!
//! The CLI wraps the same pipeline:
//!
//! ```bash
//! trace-graph render --trace trace.json --output graph.json --summary
//! ```

pub mod commands;
pub mod graph;
pub mod output;
pub mod parser;
pub mod rpc;
pub mod utils;
