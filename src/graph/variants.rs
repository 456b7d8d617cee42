//! Directed/undirected and simple/multi graph variants
//!
//! A variant is a [`Graph`] pinned to one edge kind and one multiplicity
//! policy at the type level. Read-only queries come through `Deref`; every
//! mutation goes through the variant so that neither the kind nor the policy
//! can be bypassed.

use super::edge::{Edge, EdgeKind};
use super::node::Node;
use super::store::{Graph, GraphError, GraphResult, Multiplicity};
use super::types::EdgeId;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use tracing::debug;

/// Edge kind a variant creates and accepts
pub trait Direction {
    const KIND: EdgeKind;
}

/// Multiplicity policy of a variant
pub trait ParallelEdges {
    const MULTIPLICITY: Multiplicity;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Directed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Undirected;

/// At most one edge per node pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Simple;

/// Any number of edges per node pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Multi;

impl Direction for Directed {
    const KIND: EdgeKind = EdgeKind::Directed;
}

impl Direction for Undirected {
    const KIND: EdgeKind = EdgeKind::Undirected;
}

impl ParallelEdges for Simple {
    const MULTIPLICITY: Multiplicity = Multiplicity::SingleOnly;
}

impl ParallelEdges for Multi {
    const MULTIPLICITY: Multiplicity = Multiplicity::AllowParallel;
}

pub type DirectedGraph = VariantGraph<Directed, Simple>;
pub type UndirectedGraph = VariantGraph<Undirected, Simple>;
pub type DirectedMultiGraph = VariantGraph<Directed, Multi>;
pub type UndirectedMultiGraph = VariantGraph<Undirected, Multi>;

/// Graph restricted to edges of kind `D` under multiplicity policy `M`
pub struct VariantGraph<D, M> {
    graph: Graph,
    _policy: PhantomData<(D, M)>,
}

impl<D: Direction, M: ParallelEdges> VariantGraph<D, M> {
    pub fn new() -> Self {
        VariantGraph {
            graph: Graph::with_multiplicity(M::MULTIPLICITY),
            _policy: PhantomData,
        }
    }

    /// Build a structural copy of `source`
    ///
    /// The copy has fresh nodes with the same names and fresh edges (new
    /// ids) with the same endpoints and weights. Annotations are not copied.
    /// Fails if `source` holds an edge the copy cannot take, which only
    /// happens when `source` is inconsistent.
    pub fn copy_from(source: &Self) -> GraphResult<Self> {
        let mut copy = Self::new();
        for node in source.all_nodes() {
            copy.graph.add_node(node.name());
        }
        for edge in source.all_edges() {
            let mut fresh = Edge::new(D::KIND, edge.node1(), edge.node2());
            fresh.weight = edge.weight();
            copy.graph.add_edge(fresh)?;
        }
        debug!(
            "Copied graph with {} nodes and {} edges",
            copy.node_count(),
            copy.edge_count()
        );
        Ok(copy)
    }

    pub fn as_graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn add_node(&mut self, node: impl Into<Node>) -> Option<&mut Node> {
        self.graph.add_node(node)
    }

    pub fn remove_node(&mut self, node: impl AsRef<str>) -> bool {
        self.graph.remove_node(node)
    }

    pub fn node_mut(&mut self, name: impl AsRef<str>) -> Option<&mut Node> {
        self.graph.node_mut(name)
    }

    /// Insert a prebuilt edge, which must be of this variant's kind
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<bool> {
        if edge.kind() != D::KIND {
            return Err(GraphError::EdgeKindMismatch {
                expected: D::KIND,
                found: edge.kind(),
            });
        }
        self.graph.add_edge(edge)
    }

    /// Create and insert an edge of this variant's kind
    ///
    /// Returns the new edge's id, or `None` when the policy rejects it (a
    /// simple variant whose pair is already connected). Multi variants always
    /// create a new edge.
    pub fn add_edge_between(
        &mut self,
        source: impl AsRef<str>,
        destination: impl AsRef<str>,
    ) -> GraphResult<Option<EdgeId>> {
        let edge = Edge::new(D::KIND, source.as_ref(), destination.as_ref());
        let id = edge.id();
        Ok(self.graph.add_edge(edge)?.then_some(id))
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.graph.edge_mut(id)
    }

    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        self.graph.remove_edge(edge)
    }

    pub fn remove_edge_by_id(&mut self, id: EdgeId) -> Option<Edge> {
        self.graph.remove_edge_by_id(id)
    }

    pub fn remove_edge_between(
        &mut self,
        source: impl AsRef<str>,
        destination: impl AsRef<str>,
    ) -> Option<Edge> {
        self.graph.remove_edge_between(source, destination)
    }
}

impl<M: ParallelEdges> VariantGraph<Undirected, M> {
    /// Edges touching `node`; the same as its outgoing edges since
    /// undirected edges are mirrored
    pub fn incident_edges(&self, node: impl AsRef<str>) -> GraphResult<Vec<&Edge>> {
        self.graph.outgoing_edges(node)
    }

    pub fn degree(&self, node: impl AsRef<str>) -> GraphResult<usize> {
        self.graph.out_degree(node)
    }
}

impl<D: Direction, M: ParallelEdges> Default for VariantGraph<D, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, M> Deref for VariantGraph<D, M> {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        &self.graph
    }
}

impl<D, M> Clone for VariantGraph<D, M> {
    fn clone(&self) -> Self {
        VariantGraph {
            graph: self.graph.clone(),
            _policy: PhantomData,
        }
    }
}

impl<D, M> fmt::Debug for VariantGraph<D, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantGraph")
            .field("graph", &self.graph)
            .finish()
    }
}

impl<D, M> From<VariantGraph<D, M>> for Graph {
    fn from(variant: VariantGraph<D, M>) -> Self {
        variant.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::annotation::Annotated;

    fn pair<D: Direction, M: ParallelEdges>() -> VariantGraph<D, M> {
        let mut graph = VariantGraph::new();
        graph.add_node("A");
        graph.add_node("B");
        graph
    }

    #[test]
    fn test_simple_add_edge_between_once() {
        let mut graph: DirectedGraph = pair();
        assert!(graph.add_edge_between("A", "B").unwrap().is_some());
        assert_eq!(graph.add_edge_between("A", "B").unwrap(), None);
        assert_eq!(graph.edge_count(), 1);

        // The reverse direction is a different pair for a directed graph.
        assert!(graph.add_edge_between("B", "A").unwrap().is_some());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_undirected_simple_rejects_reverse_pair() {
        let mut graph: UndirectedGraph = pair();
        assert!(graph.add_edge_between("A", "B").unwrap().is_some());
        assert_eq!(graph.add_edge_between("B", "A").unwrap(), None);
        assert_eq!(graph.degree("A").unwrap(), 1);
        assert_eq!(graph.degree("B").unwrap(), 1);
        assert_eq!(graph.incident_edges("B").unwrap().len(), 1);
    }

    #[test]
    fn test_multi_add_edge_between_always_creates() {
        let mut graph: UndirectedMultiGraph = pair();
        let first = graph.add_edge_between("A", "B").unwrap().unwrap();
        let second = graph.add_edge_between("A", "B").unwrap().unwrap();
        assert_ne!(first, second);
        assert_eq!(graph.get_edges("A", "B").len(), 2);
        assert_eq!(graph.get_edges("B", "A").len(), 2);
        assert_eq!(graph.degree("A").unwrap(), 2);
    }

    #[test]
    fn test_add_edge_between_unknown_node() {
        let mut graph: DirectedMultiGraph = pair();
        let err = graph.add_edge_between("A", "Z").unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(ref n) if n.as_str() == "Z"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_rejects_wrong_kind() {
        let mut graph: DirectedGraph = pair();
        let err = graph.add_edge(Edge::undirected("A", "B")).unwrap_err();
        assert_eq!(
            err,
            GraphError::EdgeKindMismatch {
                expected: EdgeKind::Directed,
                found: EdgeKind::Undirected,
            }
        );
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.add_edge(Edge::directed("A", "B")), Ok(true));
    }

    #[test]
    fn test_copy_from_drops_annotations_and_keeps_weights() {
        let mut graph: DirectedGraph = pair();
        graph.node_mut("A").unwrap().set_annotation("colour", "red");
        let id = graph.add_edge_between("A", "B").unwrap().unwrap();
        let edge = graph.edge_mut(id).unwrap();
        edge.weight = Some(1.5);
        edge.set_annotation("label", "x");

        let copy = DirectedGraph::copy_from(&graph).unwrap();
        assert_eq!(copy.node_count(), 2);
        assert_eq!(copy.edge_count(), 1);
        assert!(!copy.get_node_by_name("A").unwrap().has_annotations());

        let copied = copy.get_edge("A", "B").unwrap();
        assert_eq!(copied.weight(), Some(1.5));
        assert!(!copied.has_annotations());
        assert_ne!(copied.id(), id);
        copy.validate().unwrap();
    }

    #[test]
    fn test_copy_from_reports_broken_source() {
        let mut graph: DirectedGraph = pair();
        graph.add_edge_between("A", "B").unwrap();
        graph.graph.insert_edge_record(Edge::directed("A", "ghost"));

        let err = DirectedGraph::copy_from(&graph).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(ref n) if n.as_str() == "ghost"));
    }

    #[test]
    fn test_variant_policies() {
        assert_eq!(DirectedGraph::new().multiplicity(), Multiplicity::SingleOnly);
        assert_eq!(UndirectedMultiGraph::new().multiplicity(), Multiplicity::AllowParallel);
        let graph: Graph = DirectedMultiGraph::default().into();
        assert_eq!(graph.node_count(), 0);
    }
}
