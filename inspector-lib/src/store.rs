//! Tree store: the node data the core reads from.
//!
//! The core only needs [`TreeStore::get_node`]. [`MemoryStore`] is the store
//! used by [`TreeView`](crate::view::TreeView) and the terminal host; it hands
//! out `Arc` snapshots so a projection built from it stays valid while the
//! store is being mutated (mutation is copy-on-write per node).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::node::{Node, NodeId};

/// Read interface over the inspected tree.
pub trait TreeStore {
    /// Look up a node. Absent nodes are not an error.
    fn get_node(&self, id: &NodeId) -> Option<Arc<Node>>;
}

/// In-memory tree store keyed by node identity.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    nodes: HashMap<NodeId, Arc<Node>>,
}

impl TreeStore for MemoryStore {
    fn get_node(&self, id: &NodeId) -> Option<Arc<Node>> {
        self.nodes.get(id).cloned()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from nodes. Later duplicates replace earlier ones.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut store = Self::new();
        for node in nodes {
            store.insert(node);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all stored nodes in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<Node>> {
        self.nodes.values()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Insert or replace a node. Returns the previous node with that ID.
    pub fn insert(&mut self, node: Node) -> Option<Arc<Node>> {
        self.nodes.insert(node.id.clone(), Arc::new(node))
    }

    /// Remove a node.
    ///
    /// Parents keep their (now dangling) child reference; the flattener skips
    /// references to absent nodes.
    pub fn remove(&mut self, id: &NodeId) -> Option<Arc<Node>> {
        self.nodes.remove(id)
    }

    /// Replace the child references of a node.
    pub fn set_children(&mut self, id: &NodeId, children: Vec<NodeId>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) if node.children != children => {
                Arc::make_mut(node).children = children;
                true
            }
            _ => false,
        }
    }

    /// Set the expansion flag of a single node.
    ///
    /// Returns true if the flag changed.
    pub fn set_expanded(&mut self, id: &NodeId, expanded: bool) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) if node.expanded != expanded => {
                Arc::make_mut(node).expanded = expanded;
                true
            }
            _ => false,
        }
    }

    /// Set the expansion flag on a node and every node reachable below it.
    ///
    /// Walks the subtree with an explicit stack and a visited set, so a
    /// malformed (cyclic) tree still terminates. Returns the number of nodes
    /// whose flag changed.
    pub fn set_expanded_deep(&mut self, id: &NodeId, expanded: bool) -> usize {
        let mut changed = 0;
        let mut visited = HashSet::new();
        let mut stack = vec![id.clone()];

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(node) = self.nodes.get_mut(&current) else {
                continue;
            };
            if node.expanded != expanded {
                Arc::make_mut(node).expanded = expanded;
                changed += 1;
            }
            stack.extend(node.children.iter().rev().cloned());
        }

        changed
    }
}

/// Serialized form of a tree: an optional root plus a flat node list.
///
/// ```json
/// {
///   "root": "app",
///   "nodes": [
///     { "id": "app", "name": "App", "children": ["body"], "expanded": true },
///     { "id": "body", "name": "Body", "attributes": [{ "name": "id", "value": "main" }] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeSnapshot {
    #[serde(default)]
    pub root: Option<NodeId>,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl TreeSnapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a store from this snapshot.
    ///
    /// Rejects duplicate node IDs and a root that is not among the nodes.
    /// Child references to unknown nodes are kept.
    pub fn into_store(self) -> Result<(MemoryStore, Option<NodeId>), StoreError> {
        let mut store = MemoryStore::new();
        for node in self.nodes {
            let id = node.id.clone();
            if store.insert(node).is_some() {
                return Err(StoreError::DuplicateNode(id));
            }
        }
        if let Some(root) = &self.root
            && !store.contains(root)
        {
            return Err(StoreError::UnknownRoot(root.clone()));
        }
        log::debug!(
            "loaded tree snapshot: {} nodes, root {:?}",
            store.len(),
            self.root
        );
        Ok((store, self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    #[test]
    fn test_set_expanded_reports_change() {
        let mut store = MemoryStore::from_nodes([Node::new("a", "A")]);
        assert!(store.set_expanded(&id("a"), true));
        assert!(!store.set_expanded(&id("a"), true));
        assert!(!store.set_expanded(&id("missing"), true));
        assert!(store.get_node(&id("a")).is_some_and(|n| n.expanded));
    }

    #[test]
    fn test_set_expanded_deep_covers_subtree() {
        let mut store = MemoryStore::from_nodes([
            Node::new("a", "A").with_children(["b", "c"]),
            Node::new("b", "B").with_child("d"),
            Node::new("c", "C"),
            Node::new("d", "D"),
            Node::new("x", "X"),
        ]);
        assert_eq!(store.set_expanded_deep(&id("a"), true), 4);
        for n in ["a", "b", "c", "d"] {
            assert!(store.get_node(&id(n)).is_some_and(|n| n.expanded), "{n}");
        }
        assert!(store.get_node(&id("x")).is_some_and(|n| !n.expanded));

        assert_eq!(store.set_expanded_deep(&id("b"), false), 2);
        assert!(store.get_node(&id("a")).is_some_and(|n| n.expanded));
    }

    #[test]
    fn test_set_expanded_deep_terminates_on_cycle() {
        let mut store = MemoryStore::from_nodes([
            Node::new("a", "A").with_child("b"),
            Node::new("b", "B").with_children(["a", "b"]),
        ]);
        assert_eq!(store.set_expanded_deep(&id("a"), true), 2);
    }

    #[test]
    fn test_snapshot_keeps_old_arcs_stable() {
        let mut store = MemoryStore::from_nodes([Node::new("a", "A")]);
        let before = store.get_node(&id("a"));
        store.set_expanded(&id("a"), true);
        assert!(before.is_some_and(|n| !n.expanded));
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "root": "app",
            "nodes": [
                { "id": "app", "name": "App", "children": ["body"], "expanded": true },
                { "id": "body", "name": "Body", "decoration": "container",
                  "attributes": [{ "name": "id", "value": "main" }] }
            ]
        }"#;
        let (store, root) = TreeSnapshot::from_json(json)
            .and_then(TreeSnapshot::into_store)
            .unwrap();
        assert_eq!(root, Some(id("app")));
        assert_eq!(store.len(), 2);
        let body = store.get_node(&id("body")).unwrap();
        assert_eq!(body.attribute("id"), Some("main"));
        assert_eq!(body.decoration.as_deref(), Some("container"));
        assert!(!body.expanded);
    }

    #[test]
    fn test_snapshot_rejects_duplicates_and_unknown_root() {
        let dup = TreeSnapshot {
            root: None,
            nodes: vec![Node::new("a", "A"), Node::new("a", "A2")],
        };
        assert!(matches!(dup.into_store(), Err(StoreError::DuplicateNode(n)) if n == id("a")));

        let bad_root = TreeSnapshot {
            root: Some(id("zzz")),
            nodes: vec![Node::new("a", "A")],
        };
        assert!(matches!(bad_root.into_store(), Err(StoreError::UnknownRoot(_))));

        assert!(matches!(
            TreeSnapshot::from_json("{ not json"),
            Err(StoreError::Parse(_))
        ));
    }
}
