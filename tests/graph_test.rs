//! Adjacency index behaviour of the base graph
//!
//! Every test ends with `validate()`, which checks the outgoing and incoming
//! indices against each other and against the node and edge tables.

use annograph::graph::{Annotated, Edge, Graph, GraphError, Node, NodeName};

fn graph_with(names: &[&str]) -> Graph {
    let mut graph = Graph::new();
    for name in names {
        graph.add_node(*name);
    }
    graph
}

fn ids(edges: Vec<&Edge>) -> Vec<u64> {
    edges.iter().map(|e| e.id().as_u64()).collect()
}

#[test]
fn test_directed_edge_visible_from_both_indices() {
    let names = ["A", "B", "C", "D"];
    let mut graph = graph_with(&names);

    let mut added = Vec::new();
    for (source, dest) in [("A", "B"), ("B", "C"), ("C", "A"), ("A", "D"), ("D", "D")] {
        let edge = Edge::directed(source, dest);
        added.push(edge.clone());
        assert_eq!(graph.add_edge(edge), Ok(true));
    }

    for edge in &added {
        let (n1, n2) = edge.nodes();
        let id = edge.id().as_u64();
        assert!(ids(graph.get_edges(n1, n2)).contains(&id));
        assert!(ids(graph.outgoing_edges(n1).unwrap()).contains(&id));
        assert!(ids(graph.incoming_edges(n2).unwrap()).contains(&id));
        assert!(graph.contains_edge(edge));
    }
    assert_eq!(graph.edge_count(), added.len());
    graph.validate().unwrap();
}

#[test]
fn test_undirected_symmetry() {
    let mut graph = graph_with(&["A", "B", "C"]);
    let ab = Edge::undirected("A", "B");
    let bc = Edge::undirected("B", "C").with_weight(1.0);
    graph.add_edge(ab.clone()).unwrap();
    graph.add_edge(bc.clone()).unwrap();

    for edge in [&ab, &bc] {
        let (n1, n2) = edge.nodes();
        assert!(ids(graph.get_edges(n1, n2)).contains(&edge.id().as_u64()));
        assert!(ids(graph.get_edges(n2, n1)).contains(&edge.id().as_u64()));
    }
    assert_eq!(graph.out_degree("B").unwrap(), 2);
    assert_eq!(graph.in_degree("B").unwrap(), 2);
    assert_eq!(graph.edge_count(), 2);
    graph.validate().unwrap();
}

#[test]
fn test_remove_node_leaves_no_references() {
    let mut graph = graph_with(&["A", "B", "C", "D"]);
    graph.add_edge(Edge::directed("A", "B")).unwrap();
    graph.add_edge(Edge::directed("B", "C")).unwrap();
    graph.add_edge(Edge::undirected("B", "D")).unwrap();
    graph.add_edge(Edge::directed("D", "B")).unwrap();
    graph.add_edge(Edge::directed("B", "B")).unwrap();
    graph.add_edge(Edge::directed("C", "D")).unwrap();

    assert!(graph.remove_node("B"));

    for node in graph.all_nodes() {
        let name = node.name();
        let neighbours = graph.neighbours(name).unwrap();
        assert!(neighbours.iter().all(|n| n.name().as_str() != "B"));
        for edge in graph.outgoing_edges(name).unwrap() {
            assert!(!edge.contains("B"));
        }
        for edge in graph.incoming_edges(name).unwrap() {
            assert!(!edge.contains("B"));
        }
    }
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.neighbours("B").unwrap_err(), GraphError::NodeNotFound(NodeName::new("B")));
    graph.validate().unwrap();
}

#[test]
fn test_readding_removed_node_starts_clean() {
    let mut graph = graph_with(&["A", "B"]);
    graph.add_edge(Edge::directed("A", "B")).unwrap();
    graph.remove_node("B");

    assert!(graph.add_node("B").is_some());
    assert_eq!(graph.in_degree("B").unwrap(), 0);
    assert!(!graph.contains_edge_between("A", "B"));
    graph.validate().unwrap();
}

#[test]
fn test_node_identity_is_name() {
    let mut graph = Graph::new();
    let mut first = Node::new("A");
    first.set_annotation("v", 1i64);
    graph.add_node(first);

    let mut other = Node::new("A");
    other.set_annotation("v", 2i64);
    assert!(graph.contains_node(&other));
    assert!(graph.add_node(other).is_none());
    assert_eq!(graph.node_count(), 1);
    assert_eq!(
        graph.get_node_by_name("A").unwrap().get_annotation("v").and_then(|v| v.as_integer()),
        Some(1)
    );
}

#[test]
fn test_rejected_edge_leaves_graph_untouched() {
    let mut graph = graph_with(&["A"]);
    assert!(graph.add_edge(Edge::undirected("Z", "A")).is_err());
    assert!(graph.add_edge(Edge::undirected("A", "Z")).is_err());
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.incoming_edges("A").unwrap().is_empty());
    graph.validate().unwrap();
}

#[test]
fn test_mixed_kinds_in_base_graph() {
    let mut graph = graph_with(&["A", "B"]);
    graph.add_edge(Edge::directed("A", "B")).unwrap();
    graph.add_edge(Edge::undirected("A", "B")).unwrap();

    assert_eq!(graph.get_edges("A", "B").len(), 2);
    assert_eq!(graph.get_edges("B", "A").len(), 1);
    assert_eq!(graph.in_degree("B").unwrap(), 2);
    assert_eq!(graph.out_degree("B").unwrap(), 1);
    graph.validate().unwrap();
}

#[test]
fn test_iteration_follows_insertion_order() {
    let mut graph = graph_with(&["C", "A", "B"]);
    graph.add_edge(Edge::directed("C", "B")).unwrap();
    graph.add_edge(Edge::directed("C", "A")).unwrap();

    let nodes: Vec<&str> = graph.all_nodes().map(|n| n.name().as_str()).collect();
    assert_eq!(nodes, vec!["C", "A", "B"]);
    let neighbours: Vec<&str> = graph
        .neighbours("C")
        .unwrap()
        .iter()
        .map(|n| n.name().as_str())
        .collect();
    assert_eq!(neighbours, vec!["B", "A"]);
}
