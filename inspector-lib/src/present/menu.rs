//! Context menu entries for a row.

use std::sync::Arc;

use crate::node::{Node, NodeId};

/// Callback run when an extension entry is chosen.
pub type MenuCallback = Arc<dyn Fn(&NodeId) + Send + Sync>;

/// A caller-supplied context menu entry appended after the built-in ones.
#[derive(Clone)]
pub struct MenuExtension {
    pub label: String,
    pub callback: MenuCallback,
}

impl MenuExtension {
    pub fn new(
        label: impl Into<String>,
        callback: impl Fn(&NodeId) + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            callback: Arc::new(callback),
        }
    }
}

impl std::fmt::Debug for MenuExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuExtension")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// What a menu entry does when chosen.
#[derive(Clone)]
pub enum MenuAction {
    /// Write text to the clipboard.
    Copy(String),
    /// Set a node's expansion flag.
    SetExpanded { id: NodeId, expanded: bool },
    /// Run an extension callback for a node.
    Extension { id: NodeId, callback: MenuCallback },
}

impl std::fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copy(text) => f.debug_tuple("Copy").field(text).finish(),
            Self::SetExpanded { id, expanded } => f
                .debug_struct("SetExpanded")
                .field("id", id)
                .field("expanded", expanded)
                .finish(),
            Self::Extension { id, .. } => f
                .debug_struct("Extension")
                .field("id", id)
                .finish_non_exhaustive(),
        }
    }
}

/// One line of a context menu.
#[derive(Debug, Clone)]
pub enum MenuEntry {
    Separator,
    Item { label: String, action: MenuAction },
}

impl MenuEntry {
    /// Label of an item, `None` for separators.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Separator => None,
            Self::Item { label, .. } => Some(label),
        }
    }
}

/// Presents a context menu natively. Chosen actions come back to the host
/// through its own event path, not through this call.
pub trait ContextMenuHost {
    fn show(&mut self, id: &NodeId, entries: Vec<MenuEntry>);
}

/// Text the built-in "Copy" entry puts on the clipboard: the node's name
/// and identity.
pub fn copy_text(node: &Node) -> String {
    format!("{} id={}", node.name, node.id)
}

/// Build the context menu for a node.
///
/// Separator, "Copy", an "Expand"/"Collapse" toggle labelled from the node's
/// expansion flag, then the extensions in order.
pub fn context_menu(node: &Node, extensions: &[MenuExtension]) -> Vec<MenuEntry> {
    let mut entries = vec![
        MenuEntry::Separator,
        MenuEntry::Item {
            label: "Copy".to_string(),
            action: MenuAction::Copy(copy_text(node)),
        },
    ];

    let label = if node.expanded { "Collapse" } else { "Expand" };
    entries.push(MenuEntry::Item {
        label: label.to_string(),
        action: MenuAction::SetExpanded {
            id: node.id.clone(),
            expanded: !node.expanded,
        },
    });

    entries.extend(extensions.iter().map(|ext| MenuEntry::Item {
        label: ext.label.clone(),
        action: MenuAction::Extension {
            id: node.id.clone(),
            callback: Arc::clone(&ext.callback),
        },
    }));

    entries
}
