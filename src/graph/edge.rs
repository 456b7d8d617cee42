//! Edge implementation
//!
//! One `Edge` struct covers both directed and undirected connections; the
//! `EdgeKind` tag decides how a graph indexes it. Edges are told apart by
//! their `EdgeId`, so any number of distinct edges may join the same pair.

use super::annotation::{Annotated, Annotations};
use super::types::{EdgeId, NodeName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directedness of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Directed,
    Undirected,
}

impl EdgeKind {
    pub fn is_directed(&self) -> bool {
        matches!(self, EdgeKind::Directed)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Directed => write!(f, "directed"),
            EdgeKind::Undirected => write!(f, "undirected"),
        }
    }
}

/// A connection between two nodes
///
/// For a directed edge `node1` is the source and `node2` the destination.
/// For an undirected edge the order is fixed but carries no meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Never read back from serialized input: a deserialized edge draws a
    /// fresh id so it cannot collide with ids handed out by this process.
    #[serde(skip_deserializing, default = "EdgeId::next")]
    id: EdgeId,
    kind: EdgeKind,
    node1: NodeName,
    node2: NodeName,

    /// Optional numeric weight
    pub weight: Option<f64>,

    /// Metadata attached to this edge, independent of its endpoints
    pub annotations: Annotations,
}

impl Edge {
    /// Create an edge of the given kind with a fresh id
    pub fn new(kind: EdgeKind, node1: impl Into<NodeName>, node2: impl Into<NodeName>) -> Self {
        Edge {
            id: EdgeId::next(),
            kind,
            node1: node1.into(),
            node2: node2.into(),
            weight: None,
            annotations: Annotations::new(),
        }
    }

    pub fn directed(source: impl Into<NodeName>, destination: impl Into<NodeName>) -> Self {
        Self::new(EdgeKind::Directed, source, destination)
    }

    pub fn undirected(node1: impl Into<NodeName>, node2: impl Into<NodeName>) -> Self {
        Self::new(EdgeKind::Undirected, node1, node2)
    }

    /// Builder-style weight setter
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    pub fn node1(&self) -> &NodeName {
        &self.node1
    }

    pub fn node2(&self) -> &NodeName {
        &self.node2
    }

    /// Both endpoints, in construction order
    pub fn nodes(&self) -> (&NodeName, &NodeName) {
        (&self.node1, &self.node2)
    }

    /// Source of a directed edge
    pub fn source(&self) -> Option<&NodeName> {
        self.is_directed().then_some(&self.node1)
    }

    /// Destination of a directed edge
    pub fn destination(&self) -> Option<&NodeName> {
        self.is_directed().then_some(&self.node2)
    }

    /// Check if `node` is one of the endpoints
    pub fn contains(&self, node: impl AsRef<str>) -> bool {
        let node = node.as_ref();
        self.node1.as_str() == node || self.node2.as_str() == node
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn set_weight(&mut self, weight: Option<f64>) {
        self.weight = weight;
    }
}

impl Annotated for Edge {
    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EdgeKind::Directed => write!(f, "({}, {})", self.node1, self.node2),
            EdgeKind::Undirected => write!(f, "{{{}, {}}}", self.node1, self.node2),
        }
    }
}
