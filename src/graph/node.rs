//! Node implementation
//!
//! A node is a named vertex. Its name is its identity: equality and hashing
//! look at the name only, so two nodes carrying different annotations but the
//! same name are interchangeable as map keys.

use super::annotation::{Annotated, Annotations};
use super::types::NodeName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A vertex in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    name: NodeName,

    /// Metadata attached to this node
    pub annotations: Annotations,
}

impl Node {
    pub fn new(name: impl Into<NodeName>) -> Self {
        Node {
            name: name.into(),
            annotations: Annotations::new(),
        }
    }

    pub fn name(&self) -> &NodeName {
        &self.name
    }
}

impl Annotated for Node {
    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

impl From<NodeName> for Node {
    fn from(name: NodeName) -> Self {
        Node::new(name)
    }
}

impl From<&NodeName> for Node {
    fn from(name: &NodeName) -> Self {
        Node::new(name.clone())
    }
}

impl From<&str> for Node {
    fn from(name: &str) -> Self {
        Node::new(name)
    }
}

impl From<String> for Node {
    fn from(name: String) -> Self {
        Node::new(name)
    }
}

impl AsRef<str> for Node {
    fn as_ref(&self) -> &str {
        self.name.as_str()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.annotations.has_any() {
            write!(f, "{} {}", self.name, self.annotations)
        } else {
            write!(f, "{}", self.name)
        }
    }
}
