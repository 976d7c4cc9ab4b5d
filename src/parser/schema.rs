//! Wire schema for execution traces.
//!
//! These types mirror the JSON produced by the external code-execution
//! tracer. Encoded values and heap objects stay as raw `serde_json::Value`
//! here; they are classified later by [`super::value`] and [`super::heap`].

use super::value::address_of;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A fully parsed execution trace: the traced source plus its steps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionTrace {
    /// Source code that was executed
    #[serde(default)]
    pub code: String,

    /// Snapshots in execution order
    #[serde(rename = "trace")]
    pub steps: Vec<TraceStep>,
}

/// One snapshot of program state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceStep {
    /// Position of this step in the wire trace array. Steps that fail to
    /// parse are skipped, so this can run ahead of the step's position in
    /// [`ExecutionTrace::steps`].
    #[serde(skip)]
    pub index: usize,

    /// Line being executed
    #[serde(default)]
    pub line: Option<u32>,

    /// Tracer event name (step_line, call, return, exception, ...)
    #[serde(default)]
    pub event: Option<String>,

    /// Call stack, outermost (oldest) to innermost (current)
    #[serde(default, rename = "stack_to_render")]
    pub stack: Vec<Frame>,

    /// Heap objects keyed by address, in wire order
    #[serde(default)]
    pub heap: Map<String, Value>,

    /// Program output accumulated so far
    #[serde(default)]
    pub stdout: Option<String>,

    /// Message attached to exception steps
    #[serde(default)]
    pub exception_msg: Option<String>,
}

/// One active call-stack entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "func_name")]
    pub function_name: String,

    /// Whether this is the actively executing frame
    #[serde(default, rename = "is_highlighted")]
    pub is_current: bool,

    /// Variable names in declaration order
    #[serde(default)]
    pub ordered_varnames: Vec<String>,

    #[serde(default)]
    pub encoded_locals: Map<String, Value>,

    /// Line this frame is stopped at, when the tracer reports it
    #[serde(default)]
    pub line: Option<u32>,

    /// Explicit address of the function object this frame runs
    #[serde(
        default,
        deserialize_with = "deserialize_address",
        skip_serializing_if = "Option::is_none"
    )]
    pub closure_address: Option<String>,
}

impl Frame {
    /// Iterate variables in declared order, paired with their encoded value.
    ///
    /// A name listed in `ordered_varnames` without an entry in
    /// `encoded_locals` yields `None`.
    pub fn variables(&self) -> impl Iterator<Item = (&str, Option<&Value>)> + '_ {
        self.ordered_varnames
            .iter()
            .map(move |name| (name.as_str(), self.encoded_locals.get(name)))
    }
}

/// Accept addresses written either as strings or as bare numbers
fn deserialize_address<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(address_of))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_frame_variables_keep_declared_order() {
        let frame: Frame = serde_json::from_value(json!({
            "func_name": "f",
            "ordered_varnames": ["z", "a", "m"],
            "encoded_locals": {"a": 1, "m": 2, "z": 3}
        }))
        .unwrap();

        let names: Vec<&str> = frame.variables().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_frame_missing_local_is_none() {
        let frame: Frame = serde_json::from_value(json!({
            "func_name": "f",
            "ordered_varnames": ["ghost"],
            "encoded_locals": {}
        }))
        .unwrap();

        let vars: Vec<_> = frame.variables().collect();
        assert_eq!(vars, vec![("ghost", None)]);
    }

    #[test]
    fn test_closure_address_accepts_numbers() {
        let frame: Frame = serde_json::from_value(json!({
            "func_name": "f",
            "closure_address": 42
        }))
        .unwrap();

        assert_eq!(frame.closure_address.as_deref(), Some("42"));
        assert!(!frame.is_current);
    }

    #[test]
    fn test_step_defaults() {
        let step: TraceStep = serde_json::from_value(json!({"line": 3})).unwrap();
        assert_eq!(step.line, Some(3));
        assert!(step.stack.is_empty());
        assert!(step.heap.is_empty());
    }
}
