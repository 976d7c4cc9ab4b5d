//! Plain-text rendering of a step graph for terminal output.

use crate::graph::{EdgeKind, NodeData, StepGraph};

/// Describe frames, objects and edges of one step
///
/// **Public** - used by the render command's `--summary`
pub fn render_step_summary(graph: &StepGraph) -> String {
    let mut lines = Vec::new();

    let line = graph
        .line
        .map(|l| l.to_string())
        .unwrap_or_else(|| "?".to_string());
    let event = graph.event.as_deref().unwrap_or("-");
    lines.push(format!("line {} ({})", line, event));

    for node in &graph.nodes {
        match &node.data {
            NodeData::Frame(frame) => {
                let marker = if graph.current_frame.as_deref() == Some(node.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                lines.push(format!("{} [{}] {}", marker, node.id, frame.function_name));
                lines.extend(
                    frame
                        .variables
                        .iter()
                        .map(|var| format!("      {} = {}", var.name, var.display)),
                );
            }
            NodeData::Object(object) => {
                lines.push(format!("  [{}] {}", node.id, object.label()));
                lines.extend(
                    object
                        .fields
                        .iter()
                        .map(|field| format!("      {} = {}", field.name, field.display)),
                );
            }
        }
    }

    if !graph.edges.is_empty() {
        lines.push("edges:".to_string());
        for edge in &graph.edges {
            let arrow = match edge.kind {
                EdgeKind::Reference => "-->",
                EdgeKind::Call => "..>",
            };
            lines.push(format!(
                "  {} {} {} ({})",
                edge.source, arrow, edge.target, edge.label
            ));
        }
    }

    if let Some(msg) = &graph.exception_msg {
        lines.push(format!("exception: {}", msg));
    }

    lines.push(String::new());
    lines.join("\n")
}
