//! Selection and focus state.
//!
//! The host owns this state. The navigator only reads it and returns change
//! requests, so the same selection survives any number of rebuilds. Selection
//! uses node IDs rather than row indices for that reason.

use crate::node::NodeId;

/// At most one selected node and at most one hovered (focused) node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<NodeId>,
    focused: Option<NodeId>,
}

impl SelectionState {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a selected node.
    pub fn with_selected(id: impl Into<NodeId>) -> Self {
        Self {
            selected: Some(id.into()),
            focused: None,
        }
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn focused(&self) -> Option<&NodeId> {
        self.focused.as_ref()
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn is_focused(&self, id: &NodeId) -> bool {
        self.focused.as_ref() == Some(id)
    }

    /// Select a node. Returns the previously selected node if it changed.
    pub fn select(&mut self, id: NodeId) -> Option<NodeId> {
        if self.selected.as_ref() == Some(&id) {
            return None;
        }
        self.selected.replace(id)
    }

    /// Clear the selection. Returns the node that was deselected.
    pub fn clear(&mut self) -> Option<NodeId> {
        self.selected.take()
    }

    /// Set or clear the hovered node. Returns true if it changed.
    pub fn set_focused(&mut self, id: Option<NodeId>) -> bool {
        if self.focused == id {
            return false;
        }
        self.focused = id;
        true
    }
}
