//! Frame materializer: one node per call-stack frame.

use super::model::{Field, FrameView, GraphNode};
use crate::parser::{decode, EncodedValue, Frame};
use crate::utils::config::MISSING_VALUE_PLACEHOLDER;
use log::{debug, warn};

/// Materialize frame nodes from a call stack
///
/// **Public** - called by the step graph builder
///
/// # Arguments
/// * `stack` - Frames, outermost first
///
/// # Returns
/// Exactly one node per frame, ids `frame-0..frame-(N-1)` in stack order.
/// Frames without variables still get a node.
pub fn materialize_frames(stack: &[Frame]) -> Vec<GraphNode> {
    debug!("Materializing {} frames", stack.len());

    stack
        .iter()
        .enumerate()
        .map(|(index, frame)| GraphNode::frame(frame_view(index, frame)))
        .collect()
}

fn frame_view(index: usize, frame: &Frame) -> FrameView {
    let variables = frame
        .variables()
        .map(|(name, raw)| {
            let value = match raw {
                Some(raw) => decode(raw),
                None => {
                    warn!(
                        "Frame {} ({}) declares '{}' without a value",
                        index, frame.function_name, name
                    );
                    EncodedValue::RawStructured(MISSING_VALUE_PLACEHOLDER.to_string())
                }
            };
            Field::new(name, &value)
        })
        .collect();

    FrameView {
        index,
        function_name: frame.function_name.clone(),
        is_current: frame.is_current,
        line: frame.line,
        closure_address: frame.closure_address.clone(),
        variables,
    }
}
