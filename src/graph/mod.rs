//! Graph model handed to the visualization consumer
//!
//! `GraphLayout` is the entire contract with the viewer: positioned nodes,
//! typed edges, canvas dimensions, and the fixed column positions. The
//! viewer never reaches back into `ComponentAnalysis`.

pub mod layout;

pub use layout::build_graph;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of layout columns, left to right: independent (ref-like), state,
/// variable (reserved), effect/callback, element
pub const COLUMN_COUNT: usize = 5;

/// X position of a layout column
pub fn column_x(index: usize) -> f32 {
    80.0 + 220.0 * index as f32
}

/// Fixed node box size
pub const NODE_WIDTH: f32 = 120.0;
pub const NODE_HEIGHT: f32 = 32.0;

/// Canvas height when there are no nodes at all
pub const FALLBACK_HEIGHT: f32 = 800.0;

/// What a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Ref-like values with no reactive flow of their own
    Independent,
    State,
    /// Reserved; the variable column is currently unused
    Variable,
    Effect,
    Jsx,
    /// Reserved for values resolved outside the component
    External,
}

/// Relationship category of an edge. Structural parent/child containment is
/// its own variant, distinct from any data-flow relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// UI-structural parent -> child containment
    Structural,
    /// Sequential pairing between independent and state nodes
    Flow,
    /// A state/ref value feeding an effect or element
    StateDependency,
    /// An effect/callback writing a state value
    StateMutation,
    /// Reserved
    External,
}

/// One positioned node. `x`/`y` are the box center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    /// Free-form metadata carried from the source fact. Ordered so identical
    /// input serializes identically.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl GraphNode {
    /// Right-edge vertical center, where outgoing edges start
    pub fn right_anchor(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y)
    }

    /// Left-edge vertical center, where incoming edges end
    pub fn left_anchor(&self) -> (f32, f32) {
        (self.x - self.width / 2.0, self.y)
    }
}

/// An edge endpoint: node identity plus the absolute anchor point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub node: String,
    pub x: f32,
    pub y: f32,
}

/// One typed edge between two layout nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub kind: EdgeKind,
    pub source: Endpoint,
    pub target: Endpoint,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The positioned node/edge structure handed to the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLayout {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub width: f32,
    pub height: f32,

    /// Fixed x positions of the five layout columns
    pub columns: [f32; COLUMN_COUNT],
}
