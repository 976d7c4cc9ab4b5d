use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use trace_graph_studio::graph::{build_graph, materialize_frames, materialize_objects, EdgeKind};
use trace_graph_studio::parser::{ObjectKind, TraceStep, ValueKind};

fn step(value: Value) -> TraceStep {
    serde_json::from_value(value).unwrap()
}

fn edge_triples(step: &TraceStep) -> Vec<(String, String, String)> {
    build_graph(step)
        .edges
        .into_iter()
        .map(|e| (e.source, e.target, e.label))
        .collect()
}

#[test]
fn test_concrete_list_instance_scenario() {
    let step = step(json!({
        "line": 3,
        "stack_to_render": [{
            "func_name": "main",
            "is_highlighted": true,
            "ordered_varnames": ["x"],
            "encoded_locals": {"x": ["REF", "100"]}
        }],
        "heap": {
            "100": ["LIST", [1, ["REF", "200"]]],
            "200": ["INSTANCE", "Node", {"val": 5}]
        }
    }));

    let graph = build_graph(&step);

    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["frame-0", "object-100", "object-200"]);

    let frame = graph.node("frame-0").unwrap().as_frame().unwrap();
    assert_eq!(frame.variables[0].name, "x");
    assert_eq!(frame.variables[0].value_kind, ValueKind::Reference);

    let list = graph.node("object-100").unwrap().as_object().unwrap();
    assert_eq!(list.kind, ObjectKind::List);
    let fields: Vec<(&str, &str)> = list
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.display.as_str()))
        .collect();
    assert_eq!(fields, vec![("[0]", "1"), ("[1]", "→ 200")]);

    let node = graph.node("object-200").unwrap().as_object().unwrap();
    assert_eq!(node.kind, ObjectKind::Instance);
    assert_eq!(node.fields[0].name, "val");
    assert_eq!(node.fields[0].display, "5");

    assert_eq!(
        edge_triples(&step),
        vec![
            ("frame-0".to_string(), "object-100".to_string(), "x".to_string()),
            ("object-100".to_string(), "object-200".to_string(), "[1]".to_string()),
        ]
    );
}

#[test]
fn test_frame_count_matches_stack_depth() {
    for depth in 0..5 {
        let frames: Vec<Value> = (0..depth)
            .map(|i| json!({"func_name": format!("f{}", i)}))
            .collect();
        let step = step(json!({"stack_to_render": frames}));

        let nodes = materialize_frames(&step.stack);

        assert_eq!(nodes.len(), depth);
        for (i, node) in nodes.iter().enumerate() {
            assert_eq!(node.id, format!("frame-{}", i));
            assert_eq!(node.as_frame().unwrap().function_name, format!("f{}", i));
        }
    }
}

#[test]
fn test_object_count_matches_heap_size() {
    let step = step(json!({
        "heap": {
            "1": ["LIST", []],
            "2": ["DICT", {}],
            "3": ["WEIRD"],
            "4": 17
        }
    }));

    let nodes = materialize_objects(&step.heap);

    let ids: BTreeSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(nodes.len(), 4);
    assert_eq!(
        ids,
        BTreeSet::from(["object-1", "object-2", "object-3", "object-4"])
    );
}

#[test]
fn test_build_graph_is_idempotent() {
    let step = step(json!({
        "stack_to_render": [
            {"func_name": "<module>", "ordered_varnames": ["a", "f"], "encoded_locals": {"a": ["REF", "1"], "f": ["REF", "3"]}},
            {"func_name": "f", "is_highlighted": true, "ordered_varnames": ["n"], "encoded_locals": {"n": ["REF", "2"]}}
        ],
        "heap": {
            "1": ["LIST", [["REF", "2"], ["REF", "1"]]],
            "2": ["DICT", {"k": ["REF", "1"]}],
            "3": ["FUNCTION", "f", null]
        }
    }));

    let first = build_graph(&step);
    let second = build_graph(&step);

    assert_eq!(first, second);

    let edge_ids: BTreeSet<&str> = first.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(edge_ids.len(), first.edges.len(), "edge ids must be unique");

    let node_ids: BTreeSet<&str> = first.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids.len(), first.nodes.len(), "node ids must be unique");
}

#[test]
fn test_reference_produces_exactly_one_edge() {
    let step = step(json!({
        "heap": {
            "A": ["INSTANCE", "Holder", {"f": ["REF", "B"]}],
            "B": ["LIST", []]
        }
    }));

    let graph = build_graph(&step);
    let matching: Vec<_> = graph
        .edges
        .iter()
        .filter(|e| e.source == "object-A" && e.target == "object-B" && e.label == "f")
        .collect();

    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].kind, EdgeKind::Reference);
}

#[test]
fn test_dangling_reference_tolerated() {
    let step = step(json!({
        "stack_to_render": [{
            "func_name": "main",
            "ordered_varnames": ["x", "y"],
            "encoded_locals": {"x": ["REF", "X"], "y": ["REF", "1"]}
        }],
        "heap": {"1": ["LIST", [["REF", "X"]]]}
    }));

    let graph = build_graph(&step);

    assert_eq!(graph.nodes.len(), 2);
    assert!(graph.edges.iter().all(|e| e.target != "object-X"));
    assert_eq!(graph.edges.len(), 1);

    // The referencing variable still renders its display string
    let frame = graph.node("frame-0").unwrap().as_frame().unwrap();
    assert_eq!(frame.variables[0].display, "→ X");
}

#[test]
fn test_self_loop() {
    let step = step(json!({"heap": {"A": ["INSTANCE", "Node", {"next": ["REF", "A"]}]}}));

    assert_eq!(
        edge_triples(&step),
        vec![("object-A".to_string(), "object-A".to_string(), "next".to_string())]
    );
}

#[test]
fn test_list_holding_one_reference_links() {
    let step = step(json!({"heap": {"1": ["LIST", ["REF", "2"]], "2": ["LIST", []]}}));

    assert_eq!(
        edge_triples(&step),
        vec![("object-1".to_string(), "object-2".to_string(), "[0]".to_string())]
    );
}

#[test]
fn test_uninitialized_variable() {
    let step = step(json!({
        "stack_to_render": [{
            "func_name": "main",
            "ordered_varnames": ["p"],
            "encoded_locals": {"p": ["C_DATA", "0x10", "int*", "<UNINITIALIZED>"]}
        }],
        "heap": {"0x10": ["LIST", []]}
    }));

    let graph = build_graph(&step);
    let var = &graph.node("frame-0").unwrap().as_frame().unwrap().variables[0];

    assert_eq!(var.value_kind, ValueKind::Uninitialized);
    assert_eq!(var.display, "uninitialized");
    assert!(graph.edges.is_empty());
}

#[test]
fn test_c_data_pointer_links() {
    let step = step(json!({
        "stack_to_render": [{
            "func_name": "main",
            "ordered_varnames": ["p"],
            "encoded_locals": {"p": ["C_DATA", "0x10", "int*", "0x20"]}
        }],
        "heap": {"0x10": ["LIST", [1, 2]]}
    }));

    let graph = build_graph(&step);

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].id, "frame-0-object-0x10-p");
}

#[test]
fn test_node_ids_stable_across_steps() {
    let before = step(json!({
        "stack_to_render": [{"func_name": "main", "ordered_varnames": ["x"], "encoded_locals": {"x": ["REF", "1"]}}],
        "heap": {"1": ["LIST", [1]]}
    }));
    let after = step(json!({
        "stack_to_render": [{"func_name": "main", "ordered_varnames": ["x"], "encoded_locals": {"x": ["REF", "1"]}}],
        "heap": {"1": ["LIST", [1, 2]], "2": ["TUPLE", 3]}
    }));

    let before = build_graph(&before);
    let after = build_graph(&after);

    assert!(before.nodes.iter().all(|n| after.node(&n.id).is_some()));
    assert!(before.edges.iter().all(|e| after.edge(&e.id).is_some()));
}

#[test]
fn test_graph_serializes_for_presentation_layer() {
    let step = step(json!({
        "stack_to_render": [{"func_name": "main", "ordered_varnames": ["x"], "encoded_locals": {"x": ["REF", "1"]}}],
        "heap": {"1": ["FUNCTION", "main", null]}
    }));

    let value = serde_json::to_value(build_graph(&step)).unwrap();

    assert_eq!(value["nodes"][0]["kind"], json!("frame"));
    assert_eq!(value["nodes"][1]["data"]["kind"], json!("FUNCTION"));
    assert_eq!(value["nodes"][1]["data"]["function_name"], json!("main()"));
    assert_eq!(value["edges"][1]["kind"], json!("call"));

    let back: trace_graph_studio::graph::StepGraph = serde_json::from_value(value).unwrap();
    assert_eq!(back, build_graph(&step));
}
