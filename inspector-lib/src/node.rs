//! Nodes of the inspected element tree.

use serde::{Deserialize, Serialize};

/// Stable, unique identifier of a node in the tree store.
///
/// Identity is opaque to the core: it is only compared, hashed and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new node ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single `name=value` attribute on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One entry in the inspected hierarchy.
///
/// Nodes are owned by the tree store. The core only ever reads them; every
/// flatten pass takes its own snapshot reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub children: Vec<NodeId>,
    #[serde(default)]
    pub expanded: bool,
    /// Tag used to pick an icon for the row, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoration: Option<String>,
}

impl Node {
    /// Create a collapsed leaf node.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            expanded: false,
            decoration: None,
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Append a child reference.
    pub fn with_child(mut self, child: impl Into<NodeId>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Replace the child references.
    pub fn with_children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<NodeId>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Set the expansion flag.
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Set the decoration tag.
    pub fn with_decoration(mut self, tag: impl Into<String>) -> Self {
        self.decoration = Some(tag.into());
        self
    }

    /// Whether this node has at least one child reference.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Look up the first attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}
