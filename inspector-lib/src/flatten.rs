//! Flattening of the tree store into the visible row sequence.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::node::{Node, NodeId};
use crate::store::TreeStore;

/// A visible node in the flattened projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Identity of the node this row shows.
    pub id: NodeId,
    /// Snapshot of the node taken during the flatten pass.
    pub node: Arc<Node>,
    /// Depth in the tree (root = 1).
    pub level: usize,
}

impl FlatRow {
    /// Whether the node was expanded when the projection was built.
    pub fn is_expanded(&self) -> bool {
        self.node.expanded
    }

    /// Whether the node has child references.
    pub fn has_children(&self) -> bool {
        self.node.has_children()
    }
}

/// The ordered list of currently visible rows.
///
/// Always rebuilt wholesale by [`flatten`]; never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedProjection {
    rows: Vec<FlatRow>,
    /// Row identities in row order.
    ids: Vec<NodeId>,
    /// Identity -> row index.
    index: HashMap<NodeId, usize>,
    max_depth: usize,
}

impl FlattenedProjection {
    /// An empty projection.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Get a row by index.
    pub fn row(&self, index: usize) -> Option<&FlatRow> {
        self.rows.get(index)
    }

    /// Find the row index of a node, if it is visible.
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Whether a node is visible.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Deepest level among the visible rows (0 when empty).
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn push(&mut self, row: FlatRow) {
        self.max_depth = self.max_depth.max(row.level);
        self.index.insert(row.id.clone(), self.rows.len());
        self.ids.push(row.id.clone());
        self.rows.push(row);
    }
}

/// Flatten the tree below `root` into the visible row sequence.
///
/// Pre-order walk starting at `root` with level 1. A node's children are
/// visited, in stored order, only if it has children and its expansion flag
/// is set. References to nodes missing from the store are skipped along with
/// their subtree. A node reached a second time (cycle or duplicate child
/// reference) is skipped so every identity appears at most once.
pub fn flatten(store: &impl TreeStore, root: Option<&NodeId>) -> FlattenedProjection {
    let mut projection = FlattenedProjection::empty();
    let Some(root) = root else {
        return projection;
    };

    walk(
        store,
        root,
        |node| node.expanded,
        |id, node, level| projection.push(FlatRow { id, node, level }),
    );

    log::trace!(
        "flattened {} rows from root '{}' (max depth {})",
        projection.len(),
        root,
        projection.max_depth()
    );
    projection
}

/// Pre-order walk from `root` (level 1), calling `visit` for every reachable
/// node. Children are entered only when `descend` allows it. Missing nodes
/// are skipped with their subtree and each identity is visited once.
pub(crate) fn walk(
    store: &impl TreeStore,
    root: &NodeId,
    descend: impl Fn(&Node) -> bool,
    mut visit: impl FnMut(NodeId, Arc<Node>, usize),
) {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<(NodeId, usize)> = vec![(root.clone(), 1)];

    while let Some((id, level)) = stack.pop() {
        let Some(node) = store.get_node(&id) else {
            continue;
        };
        if !visited.insert(id.clone()) {
            log::warn!("node '{}' reached twice while walking the tree; skipping", id);
            continue;
        }

        if node.has_children() && descend(&node) {
            // Reverse so the first child is popped first.
            stack.extend(node.children.iter().rev().map(|c| (c.clone(), level + 1)));
        }

        visit(id, node, level);
    }
}
