//! Graph data model produced for each trace step.
//!
//! Node and edge ids are derived purely from the step contents, so the same
//! frame position or heap address keeps the same id from one step to the
//! next. Consumers can diff consecutive step graphs by id.

use crate::parser::{EncodedValue, ObjectKind, ValueKind};
use crate::utils::config::{CALL_EDGE_SUFFIX, FRAME_ID_PREFIX, OBJECT_ID_PREFIX};
use serde::{Deserialize, Serialize};

/// Id of the frame node at stack position `index`
pub fn frame_node_id(index: usize) -> String {
    format!("{}{}", FRAME_ID_PREFIX, index)
}

/// Id of the object node for heap `address`
pub fn object_node_id(address: &str) -> String {
    format!("{}{}", OBJECT_ID_PREFIX, address)
}

/// Id of the edge produced by variable/field `label`
pub fn reference_edge_id(source: &str, target: &str, label: &str) -> String {
    format!("{}-{}-{}", source, target, label)
}

/// Id of the frame→function call edge
pub fn call_edge_id(source: &str, target: &str) -> String {
    format!("{}-{}{}", source, target, CALL_EDGE_SUFFIX)
}

/// One materialized variable or field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Variable name, dict key, attribute name, or `[index]`
    pub name: String,

    /// Text to show for the value
    pub display: String,

    pub value_kind: ValueKind,

    /// Heap address when `value_kind` is `reference`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: &EncodedValue) -> Self {
        Self {
            name: name.into(),
            display: value.display().to_string(),
            value_kind: value.kind(),
            target: value.target().map(str::to_string),
        }
    }
}

/// Frame node payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    /// Position in the stack, 0 = outermost
    pub index: usize,
    pub function_name: String,
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closure_address: Option<String>,
    /// Variables in declared order
    pub variables: Vec<Field>,
}

/// Object node payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    pub address: String,
    pub kind: ObjectKind,

    /// Class name for instances, raw tag for unrecognized kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// Display name (`"name()"`) for functions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,

    pub fields: Vec<Field>,
}

impl ObjectView {
    /// Header label for the node
    pub fn label(&self) -> String {
        match self.kind {
            ObjectKind::List => "list".to_string(),
            ObjectKind::Tuple => "tuple".to_string(),
            ObjectKind::Dict => "dict".to_string(),
            ObjectKind::Instance | ObjectKind::Other => self
                .type_name
                .clone()
                .unwrap_or_else(|| "object".to_string()),
            ObjectKind::Function => self
                .function_name
                .clone()
                .unwrap_or_else(|| "function".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Frame,
    Object,
}

/// Node payload; the two views are distinguished by their fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeData {
    Frame(FrameView),
    Object(ObjectView),
}

/// Default layout position (rendering convenience only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    pub data: NodeData,
    pub position: Position,
}

impl GraphNode {
    pub fn frame(view: FrameView) -> Self {
        Self {
            id: frame_node_id(view.index),
            kind: NodeKind::Frame,
            data: NodeData::Frame(view),
            position: Position::default(),
        }
    }

    pub fn object(view: ObjectView) -> Self {
        Self {
            id: object_node_id(&view.address),
            kind: NodeKind::Object,
            data: NodeData::Object(view),
            position: Position::default(),
        }
    }

    pub fn as_frame(&self) -> Option<&FrameView> {
        match &self.data {
            NodeData::Frame(view) => Some(view),
            NodeData::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectView> {
        match &self.data {
            NodeData::Object(view) => Some(view),
            NodeData::Frame(_) => None,
        }
    }
}

/// Edge kind: plain pointer, or the distinguished frame→function link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Reference,
    Call,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Variable/field name that produced the edge
    pub label: String,
    pub kind: EdgeKind,
}

/// The finished graph for one trace step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepGraph {
    /// Position of the source step in the wire trace
    pub step_index: usize,

    /// Current line: the highlighted frame's line if known, else the step's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    /// Id of the highlighted frame node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_frame: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_msg: Option<String>,

    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl StepGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Edges leaving node `id`, in emission order
    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    pub fn frame_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Frame).count()
    }

    pub fn object_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Object).count()
    }
}
