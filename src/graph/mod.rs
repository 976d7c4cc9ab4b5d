//! Compilation of trace steps into node/edge graphs.
//!
//! This module transforms parsed trace steps into:
//! - Frame nodes (one per stack frame)
//! - Object nodes (one per heap address)
//! - Reference and call edges between them
//! - A per-step cache for playback

pub mod builder;
pub mod cache;
pub mod frames;
pub mod linker;
pub mod model;
pub mod objects;

// Re-export main types and functions
pub use builder::{apply_default_layout, build_graph};
pub use cache::StepGraphCache;
pub use frames::materialize_frames;
pub use linker::link_references;
pub use model::{
    EdgeKind, Field, FrameView, GraphEdge, GraphNode, NodeData, NodeKind, ObjectView, Position,
    StepGraph,
};
pub use objects::materialize_objects;
