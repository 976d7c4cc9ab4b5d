//! Step graph builder.
//!
//! Orchestrates the frame materializer, object materializer and reference
//! linker for a single trace step. The result is a pure function of the
//! step: calling [`build_graph`] again on the same step yields the same
//! graph.

use super::frames::materialize_frames;
use super::linker::link_references;
use super::model::{frame_node_id, GraphNode, NodeKind, Position, StepGraph};
use super::objects::materialize_objects;
use crate::parser::TraceStep;
use crate::utils::config::{FRAME_COLUMN_X, OBJECT_COLUMN_X, ROW_SPACING};
use log::debug;

/// Build the node/edge graph for one trace step
///
/// **Public** - main entry point for graph compilation
///
/// # Arguments
/// * `step` - One snapshot of stack and heap
///
/// # Returns
/// Frame nodes (stack order) followed by object nodes (heap order), and the
/// edges linking them. Never fails: uninterpretable data is rendered as
/// placeholders.
pub fn build_graph(step: &TraceStep) -> StepGraph {
    let mut nodes = materialize_frames(&step.stack);
    nodes.extend(materialize_objects(&step.heap));

    let edges = link_references(&nodes);

    apply_default_layout(&mut nodes);

    let highlighted = step.stack.iter().position(|frame| frame.is_current);

    // Current line comes from the highlighted frame when it reports one
    let line = highlighted
        .and_then(|i| step.stack[i].line)
        .or(step.line);

    debug!(
        "Built step graph: {} nodes, {} edges",
        nodes.len(),
        edges.len()
    );

    StepGraph {
        step_index: step.index,
        line,
        event: step.event.clone(),
        current_frame: highlighted.map(frame_node_id),
        stdout: step.stdout.clone(),
        exception_msg: step.exception_msg.clone(),
        nodes,
        edges,
    }
}

/// Stack frames in one column and objects in a second, top to bottom.
///
/// Layout is a rendering convenience; downstream consumers may replace it.
pub fn apply_default_layout(nodes: &mut [GraphNode]) {
    let mut frame_row = 0usize;
    let mut object_row = 0usize;

    for node in nodes {
        let (x, row) = match node.kind {
            NodeKind::Frame => (FRAME_COLUMN_X, &mut frame_row),
            NodeKind::Object => (OBJECT_COLUMN_X, &mut object_row),
        };
        node.position = Position {
            x,
            y: *row as f64 * ROW_SPACING,
        };
        *row += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn step(value: serde_json::Value) -> TraceStep {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_layout_columns() {
        let graph = build_graph(&step(json!({
            "stack_to_render": [{"func_name": "a"}, {"func_name": "b"}],
            "heap": {"1": ["LIST", []], "2": ["LIST", []]}
        })));

        let positions: Vec<(f64, f64)> = graph
            .nodes
            .iter()
            .map(|n| (n.position.x, n.position.y))
            .collect();

        assert_eq!(
            positions,
            vec![
                (FRAME_COLUMN_X, 0.0),
                (FRAME_COLUMN_X, ROW_SPACING),
                (OBJECT_COLUMN_X, 0.0),
                (OBJECT_COLUMN_X, ROW_SPACING),
            ]
        );
    }

    #[test]
    fn test_current_line_prefers_highlighted_frame() {
        let graph = build_graph(&step(json!({
            "line": 10,
            "stack_to_render": [
                {"func_name": "<module>", "line": 10},
                {"func_name": "f", "is_highlighted": true, "line": 3}
            ]
        })));

        assert_eq!(graph.line, Some(3));
        assert_eq!(graph.current_frame.as_deref(), Some("frame-1"));
    }

    #[test]
    fn test_current_line_falls_back_to_step_line() {
        let graph = build_graph(&step(json!({
            "line": 10,
            "event": "step_line",
            "stack_to_render": [{"func_name": "f", "is_highlighted": true}]
        })));

        assert_eq!(graph.line, Some(10));
        assert_eq!(graph.event.as_deref(), Some("step_line"));
    }

    #[test]
    fn test_no_highlight_means_no_current_frame() {
        let graph = build_graph(&step(json!({
            "line": 1,
            "stack_to_render": [{"func_name": "f"}]
        })));

        assert_eq!(graph.current_frame, None);
        assert_eq!(graph.line, Some(1));
    }

    #[test]
    fn test_empty_step() {
        let graph = build_graph(&TraceStep::default());
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}
