//! Keyboard navigation over the flattened projection.
//!
//! [`navigate`] is a pure function of the projection, the current selection
//! and one input. It never mutates anything; it returns the change the host
//! should apply. Whenever the selected node is not a visible row, moves and
//! parent/child jumps are no-ops.

use crate::flatten::FlattenedProjection;
use crate::node::NodeId;

/// A discrete navigation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavInput {
    /// Select the row above.
    Previous,
    /// Select the row below.
    Next,
    /// Select the first row.
    First,
    /// Select the last row.
    Last,
    /// Collapse an expanded node, otherwise jump to its parent.
    CollapseOrParent,
    /// Expand a collapsed node, otherwise jump to its first child.
    ExpandOrChild,
    /// Copy the selected node's name.
    Copy,
}

/// A change request for the host to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRequest {
    /// Make this node the selection.
    Select(NodeId),
    /// Set a node's expansion flag, on the whole subtree when `deep`.
    SetExpanded {
        id: NodeId,
        expanded: bool,
        deep: bool,
    },
    /// Put this text on the clipboard.
    Copy(String),
}

/// Interpret one navigation input.
///
/// Returns `None` when the input has no effect.
pub fn navigate(
    projection: &FlattenedProjection,
    selected: Option<&NodeId>,
    input: NavInput,
) -> Option<NavRequest> {
    match input {
        NavInput::First => return select_at(projection, 0),
        NavInput::Last => return select_at(projection, projection.len().checked_sub(1)?),
        _ => {}
    }

    let index = projection.index_of(selected?)?;
    let row = projection.row(index)?;

    match input {
        NavInput::Previous => select_at(projection, index.checked_sub(1)?),
        NavInput::Next => select_at(projection, index + 1),
        NavInput::CollapseOrParent => {
            if row.is_expanded() {
                return Some(NavRequest::SetExpanded {
                    id: row.id.clone(),
                    expanded: false,
                    deep: false,
                });
            }
            // Jump to the nearest row above at the parent's level.
            let parent_level = row.level.checked_sub(1)?;
            let parent = projection.rows()[..index]
                .iter()
                .rev()
                .find(|r| r.level == parent_level)?;
            Some(NavRequest::Select(parent.id.clone()))
        }
        NavInput::ExpandOrChild => {
            if !row.has_children() {
                return None;
            }
            if !row.is_expanded() {
                return Some(NavRequest::SetExpanded {
                    id: row.id.clone(),
                    expanded: true,
                    deep: false,
                });
            }
            // The first child row shown under this node. Children that are
            // missing or already shown elsewhere have no row here.
            projection
                .row(index + 1)
                .filter(|next| next.level == row.level + 1)
                .map(|next| NavRequest::Select(next.id.clone()))
        }
        NavInput::Copy => Some(NavRequest::Copy(row.node.name.clone())),
        NavInput::First | NavInput::Last => None,
    }
}

fn select_at(projection: &FlattenedProjection, index: usize) -> Option<NavRequest> {
    projection
        .row(index)
        .map(|row| NavRequest::Select(row.id.clone()))
}
