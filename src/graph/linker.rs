//! Reference linker: turns reference-valued variables and fields into edges.
//!
//! Edges are emitted in a fixed order (frame variables in stack order, then
//! object fields in heap order, then call edges) so the output for a given
//! node set is always the same.

use super::model::{
    call_edge_id, object_node_id, reference_edge_id, EdgeKind, Field, GraphEdge, GraphNode,
};
use crate::parser::ObjectKind;
use crate::utils::config::CALL_EDGE_LABEL;
use log::{debug, warn};
use std::collections::HashMap;

/// Resolve every reference in `nodes` into an edge
///
/// **Public** - called by the step graph builder
///
/// # Arguments
/// * `nodes` - Complete frame and object node set for one step
///
/// # Returns
/// Edges with unique ids. References to addresses with no object node are
/// dropped; self references produce self loops.
pub fn link_references(nodes: &[GraphNode]) -> Vec<GraphEdge> {
    let objects: HashMap<&str, ObjectKind> = nodes
        .iter()
        .filter_map(|node| node.as_object().map(|view| (node.id.as_str(), view.kind)))
        .collect();

    let mut linker = Linker {
        objects,
        seen: HashMap::new(),
        edges: Vec::new(),
    };

    // Frame variables first, then object fields; node order already follows
    // stack order and heap order.
    for node in nodes {
        let fields = match (node.as_frame(), node.as_object()) {
            (Some(frame), _) => &frame.variables,
            (_, Some(object)) => &object.fields,
            _ => continue,
        };
        for field in fields {
            linker.link_field(&node.id, field);
        }
    }

    linker.link_calls(nodes);

    debug!("Linked {} edges across {} nodes", linker.edges.len(), nodes.len());

    linker.edges
}

struct Linker<'a> {
    objects: HashMap<&'a str, ObjectKind>,
    /// Edge id -> position in `edges`
    seen: HashMap<String, usize>,
    edges: Vec<GraphEdge>,
}

impl<'a> Linker<'a> {
    fn link_field(&mut self, source: &str, field: &Field) {
        let Some(address) = field.target.as_deref() else {
            return;
        };

        let target = object_node_id(address);
        if !self.objects.contains_key(target.as_str()) {
            debug!(
                "Dropping dangling reference {} -> {} ({})",
                source, address, field.name
            );
            return;
        }

        self.push(GraphEdge {
            id: reference_edge_id(source, &target, &field.name),
            source: source.to_string(),
            target,
            label: field.name.clone(),
            kind: EdgeKind::Reference,
        });
    }

    /// Pair frames with the function objects they run.
    ///
    /// A frame carrying a resolvable `closure_address` links to that object.
    /// Otherwise the i-th frame is paired with the i-th FUNCTION node in heap
    /// order. The positional pairing is best-effort: it breaks if the tracer
    /// reorders the heap or omits a function object.
    fn link_calls(&mut self, nodes: &'a [GraphNode]) {
        let functions: Vec<&str> = nodes
            .iter()
            .filter(|node| {
                node.as_object()
                    .is_some_and(|view| view.kind == ObjectKind::Function)
            })
            .map(|node| node.id.as_str())
            .collect();

        let frames = nodes.iter().filter_map(|node| node.as_frame().map(|f| (node, f)));

        for (position, (node, frame)) in frames.enumerate() {
            let explicit = frame
                .closure_address
                .as_deref()
                .map(object_node_id)
                .filter(|id| self.objects.get(id.as_str()) == Some(&ObjectKind::Function));

            let target = match explicit {
                Some(id) => id,
                None => match functions.get(position) {
                    Some(id) => id.to_string(),
                    None => continue,
                },
            };

            self.push(GraphEdge {
                id: call_edge_id(&node.id, &target),
                source: node.id.clone(),
                target,
                label: CALL_EDGE_LABEL.to_string(),
                kind: EdgeKind::Call,
            });
        }
    }

    /// Record `edge`, collapsing exact repeats.
    ///
    /// Ids are joined with `-`, so addresses or names containing `-` can
    /// produce the same id for two different edges. The later edge then gets
    /// a numeric suffix; emission order is fixed, so the suffix is stable.
    fn push(&mut self, mut edge: GraphEdge) {
        let base = edge.id.clone();
        let mut n = 1usize;

        while let Some(existing) = self.seen.get(&edge.id).copied() {
            let other = &self.edges[existing];
            if (&other.source, &other.target, &other.label, other.kind)
                == (&edge.source, &edge.target, &edge.label, edge.kind)
            {
                debug!("Skipping duplicate edge {}", edge.id);
                return;
            }
            n += 1;
            edge.id = format!("{}~{}", base, n);
        }

        if n > 1 {
            warn!(
                "Edge id {} already used by a different edge; using {}",
                base, edge.id
            );
        }

        self.seen.insert(edge.id.clone(), self.edges.len());
        self.edges.push(edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::frames::materialize_frames;
    use crate::graph::objects::materialize_objects;
    use crate::parser::Frame;
    use serde_json::{json, Value};

    fn nodes(stack: Value, heap: Value) -> Vec<GraphNode> {
        let stack: Vec<Frame> = serde_json::from_value(stack).unwrap();
        let heap = heap.as_object().cloned().unwrap();
        let mut nodes = materialize_frames(&stack);
        nodes.extend(materialize_objects(&heap));
        nodes
    }

    #[test]
    fn test_frame_reference_edge() {
        let nodes = nodes(
            json!([{"func_name": "main", "ordered_varnames": ["x"], "encoded_locals": {"x": ["REF", "1"]}}]),
            json!({"1": ["LIST", []]}),
        );

        let edges = link_references(&nodes);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].id, "frame-0-object-1-x");
        assert_eq!(edges[0].source, "frame-0");
        assert_eq!(edges[0].target, "object-1");
        assert_eq!(edges[0].label, "x");
        assert_eq!(edges[0].kind, EdgeKind::Reference);
    }

    #[test]
    fn test_dangling_reference_dropped() {
        let nodes = nodes(
            json!([{"func_name": "main", "ordered_varnames": ["x"], "encoded_locals": {"x": ["REF", "404"]}}]),
            json!({"1": ["LIST", [["REF", "405"]]]}),
        );

        assert!(link_references(&nodes).is_empty());
    }

    #[test]
    fn test_self_loop() {
        let nodes = nodes(
            json!([]),
            json!({"A": ["INSTANCE", "Node", {"next": ["REF", "A"]}]}),
        );

        let edges = link_references(&nodes);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "object-A");
        assert_eq!(edges[0].target, "object-A");
        assert_eq!(edges[0].label, "next");
    }

    #[test]
    fn test_positional_call_edges() {
        let nodes = nodes(
            json!([
                {"func_name": "<module>"},
                {"func_name": "f"},
                {"func_name": "g"}
            ]),
            json!({
                "10": ["FUNCTION", "f", null],
                "11": ["LIST", []],
                "12": ["FUNCTION", "g", null]
            }),
        );

        let edges = link_references(&nodes);
        let calls: Vec<(&str, &str)> = edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Call)
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();

        // Third frame has no third function object
        assert_eq!(calls, vec![("frame-0", "object-10"), ("frame-1", "object-12")]);
        assert_eq!(edges[0].id, "frame-0-object-10#call");
        assert_eq!(edges[0].label, "call");
    }

    #[test]
    fn test_explicit_closure_address_wins() {
        let nodes = nodes(
            json!([{"func_name": "g", "closure_address": "12"}]),
            json!({
                "10": ["FUNCTION", "f", null],
                "12": ["FUNCTION", "g", null]
            }),
        );

        let edges = link_references(&nodes);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].target, "object-12");
    }

    #[test]
    fn test_call_edge_does_not_collide_with_variable_named_call() {
        let nodes = nodes(
            json!([{"func_name": "main", "ordered_varnames": ["call"], "encoded_locals": {"call": ["REF", "1"]}}]),
            json!({"1": ["FUNCTION", "main", null]}),
        );

        let edges = link_references(&nodes);

        assert_eq!(edges.len(), 2);
        assert_ne!(edges[0].id, edges[1].id);
    }

    #[test]
    fn test_duplicate_edge_ids_are_collapsed() {
        // Pair-form keys 1 and "1" both render as "1"
        let nodes = nodes(
            json!([]),
            json!({
                "d": ["DICT", [1, ["REF", "t"]], ["1", ["REF", "t"]]],
                "t": ["LIST", []]
            }),
        );

        let edges = link_references(&nodes);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].id, "object-d-object-t-1");
    }

    #[test]
    fn test_colliding_edge_ids_keep_both_edges() {
        // "object-d-object-a-b-c" reads as (a, "b-c") and as (a-b, "c")
        let nodes = nodes(
            json!([]),
            json!({
                "d": ["DICT", {"b-c": ["REF", "a"], "c": ["REF", "a-b"]}],
                "a": ["LIST", []],
                "a-b": ["LIST", []]
            }),
        );

        let edges = link_references(&nodes);

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].id, "object-d-object-a-b-c");
        assert_eq!(edges[0].target, "object-a");
        assert_eq!(edges[1].id, "object-d-object-a-b-c~2");
        assert_eq!(edges[1].target, "object-a-b");
        assert_eq!(edges[1].label, "c");
    }
}
