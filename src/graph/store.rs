//! In-memory graph storage
//!
//! `Graph` keeps the node table, the edge table and two adjacency indices:
//! - outgoing: node -> neighbour -> ids of edges from node to neighbour
//! - incoming: node -> neighbour -> ids of edges from neighbour to node
//!
//! An undirected edge is mirrored, i.e. it is indexed from both endpoints in
//! both indices. Node maps keep insertion order. Edge ids are allocated in
//! creation order, so the edge table and the per-pair id sets are ordered
//! trees keyed by id and edges always come back oldest first.

use super::edge::Edge;
use super::node::Node;
use super::types::{EdgeId, NodeName};
use super::FxIndexMap;
use indexmap::map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeName),

    #[error("Edge kind mismatch: expected {expected} edge, got {found} edge")]
    EdgeKindMismatch {
        expected: super::edge::EdgeKind,
        found: super::edge::EdgeKind,
    },

    #[error("Graph is inconsistent: {0}")]
    Inconsistent(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// How many edges may join the same ordered pair of nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Multiplicity {
    /// Any number of distinct edges (multigraph)
    #[default]
    AllowParallel,
    /// At most one edge (simple graph)
    SingleOnly,
}

type EdgeIdSet = BTreeSet<EdgeId>;
type AdjacencyRow = FxIndexMap<NodeName, EdgeIdSet>;
type AdjacencyIndex = FxIndexMap<NodeName, AdjacencyRow>;

/// In-memory graph
///
/// Multigraph by default; see [`Graph::simple`] for the single-edge policy.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: FxIndexMap<NodeName, Node>,

    edges: BTreeMap<EdgeId, Edge>,

    outgoing: AdjacencyIndex,

    incoming: AdjacencyIndex,

    multiplicity: Multiplicity,
}

impl Graph {
    /// Create an empty multigraph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph that allows at most one edge per node pair
    pub fn simple() -> Self {
        Self::with_multiplicity(Multiplicity::SingleOnly)
    }

    pub fn with_multiplicity(multiplicity: Multiplicity) -> Self {
        Graph {
            multiplicity,
            ..Self::default()
        }
    }

    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    // ---- nodes ----

    pub fn contains_node(&self, node: impl AsRef<str>) -> bool {
        self.nodes.contains_key(node.as_ref())
    }

    /// Look a node up by name
    ///
    /// Names are node identities, so there is at most one match.
    pub fn get_node_by_name(&self, name: impl AsRef<str>) -> Option<&Node> {
        self.nodes.get(name.as_ref())
    }

    pub fn node_mut(&mut self, name: impl AsRef<str>) -> Option<&mut Node> {
        self.nodes.get_mut(name.as_ref())
    }

    /// Add a node, or a bare name wrapped into one
    ///
    /// Returns the inserted node, or `None` if a node with that name already
    /// exists (the existing node is left untouched).
    pub fn add_node(&mut self, node: impl Into<Node>) -> Option<&mut Node> {
        let node = node.into();
        match self.nodes.entry(node.name().clone()) {
            Entry::Occupied(_) => {
                trace!("Node {} already present, ignoring", node.name());
                None
            }
            Entry::Vacant(slot) => {
                let name = slot.key().clone();
                self.outgoing.insert(name.clone(), AdjacencyRow::default());
                self.incoming.insert(name.clone(), AdjacencyRow::default());
                debug!("Added node {}", name);
                Some(slot.insert(node))
            }
        }
    }

    /// Remove a node together with every edge touching it
    pub fn remove_node(&mut self, node: impl AsRef<str>) -> bool {
        let Some((name, _)) = self.nodes.shift_remove_entry(node.as_ref()) else {
            return false;
        };

        let out_row = self.outgoing.shift_remove(&name).unwrap_or_default();
        let in_row = self.incoming.shift_remove(&name).unwrap_or_default();

        let mut dropped = 0usize;
        for (neighbour, ids) in &out_row {
            if let Some(row) = self.incoming.get_mut(neighbour) {
                row.shift_remove(&name);
            }
            for id in ids {
                dropped += usize::from(self.edges.remove(id).is_some());
            }
        }
        for (neighbour, ids) in &in_row {
            if let Some(row) = self.outgoing.get_mut(neighbour) {
                row.shift_remove(&name);
            }
            for id in ids {
                dropped += usize::from(self.edges.remove(id).is_some());
            }
        }

        debug!("Removed node {} and {} incident edges", name, dropped);
        true
    }

    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ---- edges ----

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Mutable access to an edge's weight and annotations
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    /// Check that this very edge (by id) is stored between its endpoints
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edge_ids_between(edge.node1().as_str(), edge.node2().as_str())
            .is_some_and(|ids| ids.contains(&edge.id()))
    }

    /// Insert an edge between two existing nodes
    ///
    /// Fails without touching the graph if an endpoint is missing. Returns
    /// `Ok(false)` if the edge is already present, or if the graph is simple
    /// and the pair is already connected.
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<bool> {
        for endpoint in [edge.node1(), edge.node2()] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::NodeNotFound(endpoint.clone()));
            }
        }

        if self.edges.contains_key(&edge.id()) {
            trace!("Edge {} already present, ignoring", edge.id());
            return Ok(false);
        }

        if self.multiplicity == Multiplicity::SingleOnly
            && self.contains_edge_between(edge.node1(), edge.node2())
        {
            trace!("{} already connected in simple graph, ignoring {}", edge, edge.id());
            return Ok(false);
        }

        let id = edge.id();
        let (a, b) = (edge.node1().clone(), edge.node2().clone());
        Self::slot(&mut self.outgoing, &a, &b).insert(id);
        Self::slot(&mut self.incoming, &b, &a).insert(id);
        if !edge.is_directed() {
            Self::slot(&mut self.outgoing, &b, &a).insert(id);
            Self::slot(&mut self.incoming, &a, &b).insert(id);
        }

        debug!("Added {} edge {} {}", edge.kind(), id, edge);
        self.edges.insert(id, edge);
        Ok(true)
    }

    /// Edges from `source` to `dest`; empty when either is unknown
    pub fn get_edges(&self, source: impl AsRef<str>, dest: impl AsRef<str>) -> Vec<&Edge> {
        self.edge_ids_between(source.as_ref(), dest.as_ref())
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default()
    }

    /// First edge from `source` to `dest`, the only one in a simple graph
    pub fn get_edge(&self, source: impl AsRef<str>, dest: impl AsRef<str>) -> Option<&Edge> {
        self.edge_ids_between(source.as_ref(), dest.as_ref())
            .and_then(|ids| ids.first())
            .and_then(|id| self.edges.get(id))
    }

    pub fn contains_edge_between(&self, source: impl AsRef<str>, dest: impl AsRef<str>) -> bool {
        self.edge_ids_between(source.as_ref(), dest.as_ref())
            .is_some_and(|ids| !ids.is_empty())
    }

    /// Remove this very edge; `false` if it is not in the graph
    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        self.contains_edge(edge) && self.remove_edge_by_id(edge.id()).is_some()
    }

    /// Remove an edge by id, handing back the stored record
    pub fn remove_edge_by_id(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&id)?;
        let (a, b) = edge.nodes();
        Self::detach(&mut self.outgoing, a, b, id);
        Self::detach(&mut self.incoming, b, a, id);
        if !edge.is_directed() {
            Self::detach(&mut self.outgoing, b, a, id);
            Self::detach(&mut self.incoming, a, b, id);
        }
        debug!("Removed edge {} {}", id, edge);
        Some(edge)
    }

    /// Remove one edge from `source` to `dest`, the oldest one
    pub fn remove_edge_between(
        &mut self,
        source: impl AsRef<str>,
        dest: impl AsRef<str>,
    ) -> Option<Edge> {
        let id = *self
            .edge_ids_between(source.as_ref(), dest.as_ref())?
            .first()?;
        self.remove_edge_by_id(id)
    }

    /// Every edge once, mirrored undirected edges included only once
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ---- adjacency queries ----

    /// Nodes reachable over one outgoing edge
    pub fn neighbours(&self, node: impl AsRef<str>) -> GraphResult<Vec<&Node>> {
        let row = Self::row(&self.outgoing, node.as_ref())?;
        Ok(self.non_empty_keys(row))
    }

    /// Nodes with an edge leading into `node`
    pub fn predecessors(&self, node: impl AsRef<str>) -> GraphResult<Vec<&Node>> {
        let row = Self::row(&self.incoming, node.as_ref())?;
        Ok(self.non_empty_keys(row))
    }

    pub fn outgoing_edges(&self, node: impl AsRef<str>) -> GraphResult<Vec<&Edge>> {
        let row = Self::row(&self.outgoing, node.as_ref())?;
        Ok(self.row_edges(row))
    }

    pub fn incoming_edges(&self, node: impl AsRef<str>) -> GraphResult<Vec<&Edge>> {
        let row = Self::row(&self.incoming, node.as_ref())?;
        Ok(self.row_edges(row))
    }

    pub fn out_degree(&self, node: impl AsRef<str>) -> GraphResult<usize> {
        let row = Self::row(&self.outgoing, node.as_ref())?;
        Ok(Self::row_ids(row).len())
    }

    pub fn in_degree(&self, node: impl AsRef<str>) -> GraphResult<usize> {
        let row = Self::row(&self.incoming, node.as_ref())?;
        Ok(Self::row_ids(row).len())
    }

    /// Check the adjacency indices against the node and edge tables
    ///
    /// Reports the first violation found.
    pub fn validate(&self) -> GraphResult<()> {
        let fail = |msg: String| -> GraphResult<()> { Err(GraphError::Inconsistent(msg)) };

        if self.outgoing.len() != self.nodes.len() || self.incoming.len() != self.nodes.len() {
            return fail(format!(
                "{} nodes but {} outgoing and {} incoming rows",
                self.nodes.len(),
                self.outgoing.len(),
                self.incoming.len()
            ));
        }

        for (index_name, index, mirror) in [
            ("outgoing", &self.outgoing, &self.incoming),
            ("incoming", &self.incoming, &self.outgoing),
        ] {
            for (node, row) in index {
                if !self.nodes.contains_key(node) {
                    return fail(format!("{} row for unknown node {}", index_name, node));
                }
                for (neighbour, ids) in row {
                    if !self.nodes.contains_key(neighbour) {
                        return fail(format!("{} entry {} -> unknown node {}", index_name, node, neighbour));
                    }
                    for id in ids {
                        let Some(edge) = self.edges.get(id) else {
                            return fail(format!("{} entry {} -> {} holds dangling {}", index_name, node, neighbour, id));
                        };
                        let mirrored = mirror
                            .get(neighbour)
                            .and_then(|r| r.get(node))
                            .is_some_and(|set| set.contains(id));
                        if !mirrored {
                            return fail(format!("{} has no back-reference in the opposite index", id));
                        }
                    }
                }
            }
        }

        for (id, edge) in &self.edges {
            let (a, b) = edge.nodes();
            let mut required = vec![(&self.outgoing, a, b), (&self.incoming, b, a)];
            if !edge.is_directed() {
                required.push((&self.outgoing, b, a));
                required.push((&self.incoming, a, b));
            }
            for (index, from, to) in required {
                let present = index
                    .get(from)
                    .and_then(|row| row.get(to))
                    .is_some_and(|ids| ids.contains(id));
                if !present {
                    return fail(format!("{} {} missing from adjacency {} -> {}", id, edge, from, to));
                }
            }
        }

        Ok(())
    }

    // ---- internals ----

    /// Put an edge into the edge table without indexing it
    #[cfg(test)]
    pub(crate) fn insert_edge_record(&mut self, edge: Edge) {
        self.edges.insert(edge.id(), edge);
    }

    pub(crate) fn edge_ids_between(&self, source: &str, dest: &str) -> Option<&EdgeIdSet> {
        self.outgoing.get(source)?.get(dest)
    }

    fn row<'a>(index: &'a AdjacencyIndex, node: &str) -> GraphResult<&'a AdjacencyRow> {
        index
            .get(node)
            .ok_or_else(|| GraphError::NodeNotFound(NodeName::new(node)))
    }

    fn row_ids(row: &AdjacencyRow) -> EdgeIdSet {
        row.values().flatten().copied().collect()
    }

    fn row_edges(&self, row: &AdjacencyRow) -> Vec<&Edge> {
        Self::row_ids(row)
            .iter()
            .filter_map(|id| self.edges.get(id))
            .collect()
    }

    fn non_empty_keys(&self, row: &AdjacencyRow) -> Vec<&Node> {
        row.iter()
            .filter(|(_, ids)| !ids.is_empty())
            .filter_map(|(name, _)| self.nodes.get(name))
            .collect()
    }

    fn slot<'a>(
        index: &'a mut AdjacencyIndex,
        node: &NodeName,
        neighbour: &NodeName,
    ) -> &'a mut EdgeIdSet {
        index
            .entry(node.clone())
            .or_default()
            .entry(neighbour.clone())
            .or_default()
    }

    fn detach(index: &mut AdjacencyIndex, node: &NodeName, neighbour: &NodeName, id: EdgeId) {
        if let Some(row) = index.get_mut(node) {
            if let Some(ids) = row.get_mut(neighbour) {
                ids.remove(&id);
                if ids.is_empty() {
                    row.shift_remove(neighbour);
                }
            }
        }
    }
}
