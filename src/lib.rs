//! Annograph
//!
//! An in-memory graph library with annotated nodes and edges, directed and
//! undirected edges, simple graphs and multigraphs, plus a key-ordered
//! priority queue for algorithms built on top.
//!
//! # Model
//!
//! - A node is identified by its name. Annotations never affect identity.
//! - An edge joins two existing nodes, is directed or undirected, may carry a
//!   weight, and is identified by its own [`EdgeId`].
//! - A [`Graph`] indexes every edge in an outgoing and an incoming adjacency
//!   index. Undirected edges are mirrored into both directions.
//! - [`DirectedGraph`], [`UndirectedGraph`], [`DirectedMultiGraph`] and
//!   [`UndirectedMultiGraph`] pin a graph to one edge kind and one
//!   multiplicity policy.
//!
//! ## Example Usage
//!
//! ```rust
//! use annograph::graph::{Annotated, DirectedGraph};
//!
//! let mut graph = DirectedGraph::new();
//! graph.add_node("A").unwrap().set_annotation("colour", "red");
//! graph.add_node("B");
//! graph.add_node("C");
//!
//! graph.add_edge_between("A", "B").unwrap();
//! graph.add_edge_between("A", "C").unwrap();
//! // A simple graph ignores a second edge between the same pair.
//! assert_eq!(graph.add_edge_between("A", "B").unwrap(), None);
//!
//! assert_eq!(graph.out_degree("A").unwrap(), 2);
//! assert_eq!(graph.in_degree("C").unwrap(), 1);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod queue;

// Re-export main types for convenience
pub use config::{AdjacencyDocument, BuildConfig, BuiltGraph, ConfigError, ConfigResult};
pub use graph::{
    directed_graph_from_map, undirected_graph_from_map, Annotated, AnnotationMap, AnnotationValue,
    Annotations, DirectedGraph, DirectedMultiGraph, Edge, EdgeId, EdgeKind, Graph, GraphError,
    GraphResult, Multiplicity, Node, NodeName, UndirectedGraph, UndirectedMultiGraph, WeightEntry,
};
pub use queue::PriorityQueue;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
