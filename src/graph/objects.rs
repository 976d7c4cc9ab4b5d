//! Object materializer: one node per heap address.

use super::model::{Field, GraphNode, ObjectView};
use crate::parser::{decode, HeapObject};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Materialize object nodes from a step heap
///
/// **Public** - called by the step graph builder
///
/// # Arguments
/// * `heap` - Address → wire object, in wire order
///
/// # Returns
/// One node per heap entry, id `object-<address>`, in heap order.
/// Unrecognized entries become `OTHER` nodes with no fields.
pub fn materialize_objects(heap: &Map<String, Value>) -> Vec<GraphNode> {
    debug!("Materializing {} heap objects", heap.len());

    heap.iter()
        .map(|(address, raw)| GraphNode::object(object_view(address, raw)))
        .collect()
}

fn object_view(address: &str, raw: &Value) -> ObjectView {
    let object = HeapObject::decode(raw);
    let kind = object.kind();

    let mut type_name = None;
    let mut function_name = None;

    let fields = match object {
        HeapObject::List(elements) | HeapObject::Tuple(elements) => indexed_fields(&elements),
        HeapObject::Dict(entries) => keyed_fields(&entries),
        HeapObject::Instance { class_name, fields } => {
            type_name = Some(class_name);
            keyed_fields(&fields)
        }
        HeapObject::Function { name } => {
            function_name = Some(format!("{}()", name));
            Vec::new()
        }
        HeapObject::Other { tag } => {
            warn!(
                "Heap object {} has unrecognized kind {:?}, rendering without fields",
                address, tag
            );
            type_name = tag;
            Vec::new()
        }
    };

    ObjectView {
        address: address.to_string(),
        kind,
        type_name,
        function_name,
        fields,
    }
}

/// `[0]`, `[1]`, ... for sequence elements
fn indexed_fields(elements: &[&Value]) -> Vec<Field> {
    elements
        .iter()
        .enumerate()
        .map(|(i, raw)| Field::new(format!("[{}]", i), &decode(raw)))
        .collect()
}

fn keyed_fields(entries: &[(String, &Value)]) -> Vec<Field> {
    entries
        .iter()
        .map(|(key, raw)| Field::new(key.as_str(), &decode(raw)))
        .collect()
}
