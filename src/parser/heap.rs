//! Closed decoding of heap objects.
//!
//! Heap objects arrive as arrays whose first slot is a kind tag. They are
//! decoded once into [`HeapObject`], a borrowed variant per known kind plus
//! an explicit [`HeapObject::Other`] fallback, so the materializer matches
//! exhaustively instead of poking at untyped arrays.

use super::value::{decode, primitive_display};
use crate::utils::config::{
    TAG_C_DATA, TAG_DICT, TAG_FUNCTION, TAG_INSTANCE, TAG_LIST, TAG_REF, TAG_TUPLE,
};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a heap object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    List,
    Tuple,
    Dict,
    Instance,
    Function,
    Other,
}

/// A decoded heap object borrowing its payload from the wire value
#[derive(Debug, Clone, PartialEq)]
pub enum HeapObject<'a> {
    List(Vec<&'a Value>),
    Tuple(Vec<&'a Value>),
    Dict(Vec<(String, &'a Value)>),
    Instance {
        class_name: String,
        fields: Vec<(String, &'a Value)>,
    },
    Function {
        name: String,
    },
    /// Unrecognized tag (or no tag at all)
    Other {
        tag: Option<String>,
    },
}

impl<'a> HeapObject<'a> {
    /// Decode one heap entry
    ///
    /// **Public** - main entry point for heap classification
    ///
    /// Accepted shapes:
    /// * `["LIST", [..]]`, falling back to `["LIST", a, b, ..]`; a single
    ///   `REF`/`C_DATA` slot is one flat element, not a nested list
    /// * `["TUPLE", a, b, ..]`
    /// * `["DICT", {..}]`, falling back to `["DICT", [k, v], ..]`
    /// * `["INSTANCE", class, {..}]`, falling back to `["INSTANCE", class, [k, v], ..]`
    /// * `["FUNCTION", name, ..]`
    ///
    /// Anything else decodes to `Other`.
    pub fn decode(raw: &'a Value) -> Self {
        let Value::Array(items) = raw else {
            return Self::Other { tag: None };
        };

        let Some(tag) = items.first().and_then(Value::as_str) else {
            return Self::Other { tag: None };
        };

        let tail = &items[1..];

        match tag {
            TAG_LIST => match tail {
                [Value::Array(elements)] if !is_encoded_value(elements) => {
                    Self::List(elements.iter().collect())
                }
                _ => Self::List(tail.iter().collect()),
            },
            TAG_TUPLE => Self::Tuple(tail.iter().collect()),
            TAG_DICT => Self::Dict(entries(tail)),
            TAG_INSTANCE => {
                let class_name = tail.first().map(primitive_display).unwrap_or_default();
                let fields = tail.get(1..).map(entries).unwrap_or_default();
                Self::Instance { class_name, fields }
            }
            TAG_FUNCTION => Self::Function {
                name: tail.first().map(primitive_display).unwrap_or_default(),
            },
            other => Self::Other {
                tag: Some(other.to_string()),
            },
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::List(_) => ObjectKind::List,
            Self::Tuple(_) => ObjectKind::Tuple,
            Self::Dict(_) => ObjectKind::Dict,
            Self::Instance { .. } => ObjectKind::Instance,
            Self::Function { .. } => ObjectKind::Function,
            Self::Other { .. } => ObjectKind::Other,
        }
    }
}

/// Whether an array slot is itself one encoded value (`["REF", ..]`,
/// `["C_DATA", ..]`) rather than a list of elements
fn is_encoded_value(items: &[Value]) -> bool {
    matches!(
        items.first().and_then(Value::as_str),
        Some(TAG_REF) | Some(TAG_C_DATA)
    )
}

/// Key/value entries from either a mapping slot or a list of pairs
///
/// **Private** - shared by DICT and INSTANCE
fn entries(slots: &[Value]) -> Vec<(String, &Value)> {
    if let [Value::Object(map)] = slots {
        return map.iter().map(|(k, v)| (k.clone(), v)).collect();
    }

    slots
        .iter()
        .filter_map(|slot| match slot.as_array().map(Vec::as_slice) {
            Some([key, value]) => Some((decode(key).display().to_string(), value)),
            _ => {
                warn!("Skipping malformed key/value entry: {}", slot);
                None
            }
        })
        .collect()
}
