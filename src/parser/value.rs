//! Decoding of encoded trace values.
//!
//! An encoded value is either a JSON scalar or a tagged array whose first
//! slot names its shape. Decoding never fails: anything unrecognized becomes
//! [`EncodedValue::RawStructured`] with a literal rendering.

use crate::utils::config::{
    C_DATA_VALUE_SLOT, REFERENCE_ARROW, TAG_C_DATA, TAG_REF, UNINITIALIZED_DISPLAY,
    UNINITIALIZED_MARKER, UNRENDERABLE_PLACEHOLDER,
};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic classification of an encoded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedValue {
    /// A scalar shown verbatim
    Primitive(String),

    /// A pointer to a heap object
    Reference { target: String, display: String },

    /// Declared but never assigned
    Uninitialized,

    /// A shape the decoder does not recognize, rendered literally
    RawStructured(String),
}

/// Kind tag recorded on materialized fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Primitive,
    Reference,
    Uninitialized,
    RawStructured,
}

impl EncodedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Primitive(_) => ValueKind::Primitive,
            Self::Reference { .. } => ValueKind::Reference,
            Self::Uninitialized => ValueKind::Uninitialized,
            Self::RawStructured(_) => ValueKind::RawStructured,
        }
    }

    /// Text to show for this value
    pub fn display(&self) -> &str {
        match self {
            Self::Primitive(s) | Self::RawStructured(s) => s,
            Self::Reference { display, .. } => display,
            Self::Uninitialized => UNINITIALIZED_DISPLAY,
        }
    }

    /// Address this value points at, if it is a reference
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Reference { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// Decode one encoded value
///
/// **Public** - used by both materializers
///
/// # Arguments
/// * `raw` - Value exactly as it appears in the trace
///
/// # Returns
/// The classified value. Pure; never fails.
pub fn decode(raw: &Value) -> EncodedValue {
    let Value::Array(items) = raw else {
        return EncodedValue::Primitive(primitive_display(raw));
    };

    match items.first().and_then(Value::as_str) {
        Some(TAG_C_DATA) => decode_c_data(raw, items),
        Some(TAG_REF) => match items.get(1).and_then(address_of) {
            Some(target) => EncodedValue::Reference {
                display: format!("{}{}", REFERENCE_ARROW, target),
                target,
            },
            None => EncodedValue::RawStructured(raw_display(raw)),
        },
        _ => EncodedValue::RawStructured(raw_display(raw)),
    }
}

/// `["C_DATA", address, display, value]`
fn decode_c_data(raw: &Value, items: &[Value]) -> EncodedValue {
    let sentinel = items.get(C_DATA_VALUE_SLOT).and_then(Value::as_str);
    if sentinel == Some(UNINITIALIZED_MARKER) {
        return EncodedValue::Uninitialized;
    }

    let Some(target) = items.get(1).and_then(address_of) else {
        return EncodedValue::RawStructured(raw_display(raw));
    };

    let display = items
        .get(2)
        .map(primitive_display)
        .unwrap_or_else(|| format!("{}{}", REFERENCE_ARROW, target));

    EncodedValue::Reference { target, display }
}

/// Read an address from a string or numeric JSON value
pub fn address_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// String coercion of a non-array value
///
/// Strings are shown without quotes; everything else uses its JSON text.
pub fn primitive_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => raw_display(value),
    }
}

/// JSON-style rendering of a whole value, with a fixed fallback
fn raw_display(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        warn!("Failed to stringify trace value: {}", e);
        UNRENDERABLE_PLACEHOLDER.to_string()
    })
}
