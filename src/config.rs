//! Build configuration and adjacency documents
//!
//! An adjacency document describes a graph as data, for example in YAML:
//!
//! ```yaml
//! directed: false
//! adjacency:
//!   A: [B, C]
//!   B: [C]
//!   C: []
//! weights:
//!   - { source: A, destination: B, weight: 2.5 }
//! ```
//!
//! The same fields are accepted as JSON.

use crate::graph::builder::{build_simple, AdjacencyMap, WeightEntry};
use crate::graph::{Directed, DirectedGraph, Graph, GraphResult, Undirected, UndirectedGraph};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised while loading an adjacency document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Options for building a graph from an adjacency mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build a directed graph (otherwise undirected)
    pub directed: bool,
    /// Create nodes that only appear as neighbours instead of failing
    pub create_missing_nodes: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            directed: true,
            create_missing_nodes: false,
        }
    }
}

/// Graph description loaded from JSON or YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyDocument {
    #[serde(flatten)]
    pub config: BuildConfig,

    pub adjacency: AdjacencyMap,

    #[serde(default)]
    pub weights: Vec<WeightEntry>,
}

/// Graph produced from a document; the kind follows `BuildConfig::directed`
#[derive(Debug, Clone)]
pub enum BuiltGraph {
    Directed(DirectedGraph),
    Undirected(UndirectedGraph),
}

impl BuiltGraph {
    pub fn is_directed(&self) -> bool {
        matches!(self, BuiltGraph::Directed(_))
    }

    pub fn as_graph(&self) -> &Graph {
        match self {
            BuiltGraph::Directed(g) => g.as_graph(),
            BuiltGraph::Undirected(g) => g.as_graph(),
        }
    }
}

impl AdjacencyDocument {
    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Load a document, picking the format from the file extension
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let input = std::fs::read_to_string(path)?;

        let document = match extension.as_str() {
            "json" => Self::from_json_str(&input)?,
            "yaml" | "yml" => Self::from_yaml_str(&input)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        info!(
            "Loaded adjacency document {:?} ({} nodes declared)",
            path,
            document.adjacency.len()
        );
        Ok(document)
    }

    pub fn build(&self) -> GraphResult<BuiltGraph> {
        let weights = Some(self.weights.as_slice());
        if self.config.directed {
            build_simple::<Directed>(&self.adjacency, weights, &self.config).map(BuiltGraph::Directed)
        } else {
            build_simple::<Undirected>(&self.adjacency, weights, &self.config)
                .map(BuiltGraph::Undirected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert!(config.directed);
        assert!(!config.create_missing_nodes);
    }

    #[test]
    fn test_json_document() {
        let doc = AdjacencyDocument::from_json_str(
            r#"{"adjacency": {"A": ["B", "C"], "B": ["C"], "C": []}}"#,
        )
        .unwrap();
        assert!(doc.config.directed);
        assert!(doc.weights.is_empty());

        let built = doc.build().unwrap();
        assert!(built.is_directed());
        assert_eq!(built.as_graph().out_degree("A").unwrap(), 2);
        assert_eq!(built.as_graph().in_degree("C").unwrap(), 2);
    }

    #[test]
    fn test_yaml_document_keeps_declaration_order() {
        let doc = AdjacencyDocument::from_yaml_str(
            "directed: false\nadjacency:\n  C: [A]\n  A: [B]\n  B: [A]\nweights:\n  - { source: A, destination: B, weight: 2.5 }\n",
        )
        .unwrap();
        let keys: Vec<&str> = doc.adjacency.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["C", "A", "B"]);

        let built = doc.build().unwrap();
        assert!(!built.is_directed());
        let graph = built.as_graph();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.get_edge("B", "A").unwrap().weight(), Some(2.5));
    }

    #[test]
    fn test_missing_adjacency_is_error() {
        let err = AdjacencyDocument::from_json_str(r#"{"directed": true}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
