//! Graph construction from adjacency mappings
//!
//! The builders only use the public graph API and lean on its no-op
//! semantics for duplicates: declaring `A -> B` twice, or `A: [B]` and
//! `B: [A]` for an undirected graph, yields a single edge.

use super::store::{GraphError, GraphResult};
use super::types::{EdgeId, NodeName};
use super::variants::{Direction, ParallelEdges, Simple, VariantGraph};
use super::{DirectedGraph, UndirectedGraph};
use crate::config::BuildConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Node name -> names of its neighbours, in declaration order
pub type AdjacencyMap = IndexMap<String, Vec<String>>;

/// Weight to apply to the edges between two named nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub source: String,
    pub destination: String,
    pub weight: f64,
}

impl WeightEntry {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, weight: f64) -> Self {
        WeightEntry {
            source: source.into(),
            destination: destination.into(),
            weight,
        }
    }
}

/// Build a directed simple graph from an adjacency mapping
pub fn directed_graph_from_map(
    data: &AdjacencyMap,
    weights: Option<&[WeightEntry]>,
) -> GraphResult<DirectedGraph> {
    build_simple(data, weights, &BuildConfig::default())
}

/// Build an undirected simple graph from an adjacency mapping
pub fn undirected_graph_from_map(
    data: &AdjacencyMap,
    weights: Option<&[WeightEntry]>,
) -> GraphResult<UndirectedGraph> {
    build_simple(data, weights, &BuildConfig::default())
}

/// Build a simple graph of either kind
///
/// Every key of `data` becomes a node first. A neighbour that is not a key is
/// an error unless `config.create_missing_nodes` is set.
pub fn build_simple<D: Direction>(
    data: &AdjacencyMap,
    weights: Option<&[WeightEntry]>,
    config: &BuildConfig,
) -> GraphResult<VariantGraph<D, Simple>> {
    let mut graph = VariantGraph::<D, Simple>::new();
    for name in data.keys() {
        graph.add_node(name.as_str());
    }

    for (node, neighbours) in data {
        for neighbour in neighbours {
            if !graph.contains_node(neighbour) {
                if !config.create_missing_nodes {
                    return Err(GraphError::NodeNotFound(NodeName::new(neighbour.as_str())));
                }
                graph.add_node(neighbour.as_str());
            }
            if graph.contains_edge_between(node, neighbour) {
                continue;
            }
            graph.add_edge_between(node, neighbour)?;
        }
    }

    if let Some(weights) = weights {
        set_weights(&mut graph, weights)?;
    }

    info!(
        "Built {} graph with {} nodes and {} edges",
        D::KIND,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Set the weight of every edge between each named pair
///
/// Both nodes must exist; a pair without edges is skipped with a warning.
pub fn set_weights<D: Direction, M: ParallelEdges>(
    graph: &mut VariantGraph<D, M>,
    weights: &[WeightEntry],
) -> GraphResult<()> {
    for entry in weights {
        let source = lookup(graph, &entry.source)?;
        let destination = lookup(graph, &entry.destination)?;

        let ids: Vec<EdgeId> = graph
            .get_edges(&source, &destination)
            .iter()
            .map(|edge| edge.id())
            .collect();
        if ids.is_empty() {
            warn!("No edge between {} and {}, weight {} ignored", source, destination, entry.weight);
            continue;
        }
        for id in ids {
            if let Some(edge) = graph.edge_mut(id) {
                edge.weight = Some(entry.weight);
            }
        }
    }
    Ok(())
}

fn lookup<D: Direction, M: ParallelEdges>(
    graph: &VariantGraph<D, M>,
    name: &str,
) -> GraphResult<NodeName> {
    graph
        .get_node_by_name(name)
        .map(|node| node.name().clone())
        .ok_or_else(|| GraphError::NodeNotFound(NodeName::new(name)))
}
