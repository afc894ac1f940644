//! Popup context menu shown over the tree.

use inspector_lib::node::NodeId;
use inspector_lib::present::{ContextMenuHost, MenuAction, MenuEntry};

/// An open menu with a cursor over its items.
#[derive(Debug, Clone)]
pub struct OpenMenu {
    pub node: NodeId,
    pub entries: Vec<MenuEntry>,
    pub cursor: usize,
}

impl OpenMenu {
    fn first_item(entries: &[MenuEntry]) -> usize {
        entries
            .iter()
            .position(|e| e.label().is_some())
            .unwrap_or(0)
    }

    /// Move the cursor to the next item in `step` direction, skipping
    /// separators. Stays put at either end.
    pub fn move_cursor(&mut self, step: isize) {
        let mut index = self.cursor as isize;
        loop {
            index += step;
            let Some(entry) = usize::try_from(index).ok().and_then(|i| self.entries.get(i)) else {
                return;
            };
            if entry.label().is_some() {
                self.cursor = index as usize;
                return;
            }
        }
    }

    /// The action under the cursor.
    pub fn current_action(&self) -> Option<&MenuAction> {
        match self.entries.get(self.cursor)? {
            MenuEntry::Item { action, .. } => Some(action),
            MenuEntry::Separator => None,
        }
    }
}

/// Holds at most one open menu.
#[derive(Debug, Default)]
pub struct PopupMenu {
    open: Option<OpenMenu>,
}

impl PopupMenu {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&OpenMenu> {
        self.open.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut OpenMenu> {
        self.open.as_mut()
    }

    /// Close the menu, returning the action under the cursor.
    pub fn take_action(&mut self) -> Option<MenuAction> {
        self.open.take()?.current_action().cloned()
    }

    pub fn close(&mut self) {
        self.open = None;
    }
}

impl ContextMenuHost for PopupMenu {
    fn show(&mut self, id: &NodeId, entries: Vec<MenuEntry>) {
        let cursor = OpenMenu::first_item(&entries);
        self.open = Some(OpenMenu {
            node: id.clone(),
            entries,
            cursor,
        });
    }
}
