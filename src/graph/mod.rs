//! Core graph implementation
//!
//! This module implements the annotated graph model with:
//! - Nodes identified by name, carrying annotations
//! - Directed and undirected edges with optional weight and annotations
//! - Multiple edges between the same nodes, or at most one (simple graphs)
//! - In-memory storage with outgoing and incoming adjacency indices

pub mod annotation;
pub mod builder;
pub mod edge;
pub mod node;
pub mod store;
pub mod types;
pub mod variants;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Insertion-ordered map with the fast non-cryptographic hasher
pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

// Re-export main types
pub use annotation::{Annotated, AnnotationMap, AnnotationValue, Annotations};
pub use builder::{directed_graph_from_map, set_weights, undirected_graph_from_map, AdjacencyMap, WeightEntry};
pub use edge::{Edge, EdgeKind};
pub use node::Node;
pub use store::{Graph, GraphError, GraphResult, Multiplicity};
pub use types::{EdgeId, NodeName};
pub use variants::{
    Directed, DirectedGraph, DirectedMultiGraph, Direction, Multi, ParallelEdges, Simple,
    Undirected, UndirectedGraph, UndirectedMultiGraph, VariantGraph,
};
