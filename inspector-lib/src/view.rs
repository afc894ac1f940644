//! Reference host wiring the store, flattener, search, navigator and presenter.
//!
//! `TreeView` owns the tree store, the configured root, the selection and the
//! active query. Every change to the store's shape goes through a method that
//! rebuilds the projection before returning, so readers never see a
//! half-updated projection.

use std::ops::Range;

use log::debug;

use crate::clipboard::Clipboard;
use crate::config::ViewConfig;
use crate::error::StoreError;
use crate::flatten::{flatten, FlattenedProjection};
use crate::keys::{KeyCombo, Keybinds};
use crate::navigate::{navigate, NavInput, NavRequest};
use crate::node::NodeId;
use crate::present::{children_counts, ContextMenuHost, MenuAction, RowFacts, RowPresenter};
use crate::search::{search, SearchResultSet};
use crate::selection::SelectionState;
use crate::store::{MemoryStore, TreeSnapshot, TreeStore};

/// A navigable, searchable view over a [`MemoryStore`].
#[derive(Debug)]
pub struct TreeView {
    store: MemoryStore,
    root: Option<NodeId>,
    /// Visible rows (rebuilt after every shape change).
    projection: FlattenedProjection,
    /// `children_counts` of the current projection.
    counts: Vec<usize>,
    query: Option<String>,
    search: SearchResultSet,
    selection: SelectionState,
    presenter: RowPresenter,
    keybinds: Keybinds,
    /// Scroll offset in rows.
    scroll_offset: usize,
    dirty: bool,
}

impl TreeView {
    /// Create a view over a store rooted at `root`.
    pub fn new(mut store: MemoryStore, root: Option<NodeId>, config: &ViewConfig) -> Self {
        if config.expand_root_on_load
            && let Some(root) = &root
        {
            store.set_expanded(root, true);
        }
        let mut view = Self {
            store,
            root,
            projection: FlattenedProjection::empty(),
            counts: Vec::new(),
            query: None,
            search: SearchResultSet::none(),
            selection: SelectionState::new(),
            presenter: RowPresenter::new(config),
            keybinds: Keybinds::navigation(),
            scroll_offset: 0,
            dirty: true,
        };
        view.rebuild();
        view
    }

    /// Create a view from a parsed snapshot.
    pub fn from_snapshot(snapshot: TreeSnapshot, config: &ViewConfig) -> Result<Self, StoreError> {
        let (store, root) = snapshot.into_store()?;
        Ok(Self::new(store, root, config))
    }

    /// Replace the presenter (decorations, menu extensions).
    pub fn with_presenter(mut self, presenter: RowPresenter) -> Self {
        self.presenter = presenter;
        self
    }

    /// Replace the key bindings.
    pub fn with_keybinds(mut self, keybinds: Keybinds) -> Self {
        self.keybinds = keybinds;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn root(&self) -> Option<&NodeId> {
        self.root.as_ref()
    }

    pub fn projection(&self) -> &FlattenedProjection {
        &self.projection
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn search_results(&self) -> &SearchResultSet {
        &self.search
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Visible descendant count per row, computed once per rebuild.
    pub fn children_counts(&self) -> &[usize] {
        &self.counts
    }

    /// Row index of the selected node, if it is visible.
    pub fn selected_index(&self) -> Option<usize> {
        self.projection.index_of(self.selection.selected()?)
    }

    // -------------------------------------------------------------------------
    // Store mutation
    // -------------------------------------------------------------------------

    /// Change the configured root.
    pub fn set_root(&mut self, root: Option<NodeId>) {
        if self.root != root {
            self.root = root;
            self.rebuild();
        }
    }

    /// Edit the store, then rebuild the projection and re-run the search.
    pub fn mutate<R>(&mut self, edit: impl FnOnce(&mut MemoryStore) -> R) -> R {
        let result = edit(&mut self.store);
        self.rebuild();
        result
    }

    /// Set a node's expansion flag, on its whole subtree when `deep`.
    ///
    /// Returns true if any flag changed.
    pub fn set_expanded(&mut self, id: &NodeId, expanded: bool, deep: bool) -> bool {
        let changed = if deep {
            self.store.set_expanded_deep(id, expanded) > 0
        } else {
            self.store.set_expanded(id, expanded)
        };
        if changed {
            debug!("set_expanded {} -> {} (deep: {})", id, expanded, deep);
            self.rebuild();
        }
        changed
    }

    /// Flip a node's expansion flag from its disclosure control.
    pub fn toggle_disclosure(&mut self, id: &NodeId, deep: bool) -> bool {
        match self.store.get_node(id) {
            Some(node) if node.has_children() => self.set_expanded(id, !node.expanded, deep),
            _ => false,
        }
    }

    fn rebuild(&mut self) {
        self.projection = flatten(&self.store, self.root.as_ref());
        self.counts = children_counts(&self.projection);
        self.search = search(&self.store, self.root.as_ref(), self.query.as_deref());
        let max_offset = self.projection.len().saturating_sub(1);
        if self.scroll_offset > max_offset {
            self.scroll_offset = max_offset;
        }
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Selection and search
    // -------------------------------------------------------------------------

    /// Select a node. Selecting a node that is not visible is allowed; the
    /// navigator ignores it until a visible node is selected.
    pub fn select(&mut self, id: NodeId) -> bool {
        if self.selection.is_selected(&id) {
            return false;
        }
        self.selection.select(id);
        self.dirty = true;
        true
    }

    /// Set or clear the hovered node.
    pub fn hover(&mut self, id: Option<NodeId>) -> bool {
        let changed = self.selection.set_focused(id);
        self.dirty |= changed;
        changed
    }

    /// Set the search query. An empty query disables highlighting.
    pub fn set_query(&mut self, query: Option<&str>) {
        let query = query.filter(|q| !q.is_empty()).map(str::to_string);
        if self.query != query {
            self.query = query;
            self.search = search(&self.store, self.root.as_ref(), self.query.as_deref());
            self.dirty = true;
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle a key press. Returns true if it was bound and had an effect.
    pub fn handle_key(&mut self, key: &KeyCombo, clipboard: &mut dyn Clipboard) -> bool {
        match self.keybinds.get(key) {
            Some(input) => self.handle_input(input, clipboard),
            None => false,
        }
    }

    /// Run one navigation input and apply the resulting request.
    pub fn handle_input(&mut self, input: NavInput, clipboard: &mut dyn Clipboard) -> bool {
        match navigate(&self.projection, self.selection.selected(), input) {
            Some(request) => self.apply(request, clipboard),
            None => false,
        }
    }

    /// Apply a request produced by the navigator.
    pub fn apply(&mut self, request: NavRequest, clipboard: &mut dyn Clipboard) -> bool {
        debug!("apply {:?}", request);
        match request {
            NavRequest::Select(id) => {
                self.selection.select(id);
                self.dirty = true;
                true
            }
            NavRequest::SetExpanded { id, expanded, deep } => {
                self.set_expanded(&id, expanded, deep)
            }
            NavRequest::Copy(text) => copy(clipboard, &text),
        }
    }

    /// Show the context menu for a visible node.
    pub fn open_context_menu(&self, id: &NodeId, host: &mut dyn ContextMenuHost) -> bool {
        let Some(row) = self.projection.index_of(id).and_then(|i| self.projection.row(i)) else {
            return false;
        };
        host.show(id, self.presenter.context_menu(&row.node));
        true
    }

    /// Run a context menu action chosen by the user.
    pub fn activate(&mut self, action: &MenuAction, clipboard: &mut dyn Clipboard) -> bool {
        match action {
            MenuAction::Copy(text) => copy(clipboard, text),
            MenuAction::SetExpanded { id, expanded } => self.set_expanded(id, *expanded, false),
            MenuAction::Extension { id, callback } => {
                callback(id);
                true
            }
        }
    }

    // -------------------------------------------------------------------------
    // Presentation
    // -------------------------------------------------------------------------

    /// Presentation facts for a range of rows.
    pub fn rows(&self, range: Range<usize>) -> Vec<RowFacts> {
        self.presenter.present_with_counts(
            &self.projection,
            &self.counts,
            range,
            &self.search,
            &self.selection,
        )
    }

    /// Row range to show in a viewport of `height` rows, scrolled so the
    /// selected row stays visible.
    pub fn visible_window(&mut self, height: usize) -> Range<usize> {
        if height == 0 || self.projection.is_empty() {
            return 0..0;
        }
        if let Some(index) = self.selected_index() {
            if index < self.scroll_offset {
                self.scroll_offset = index;
            } else if index >= self.scroll_offset + height {
                self.scroll_offset = index + 1 - height;
            }
        }
        let start = self.scroll_offset.min(self.projection.len() - 1);
        start..(start + height).min(self.projection.len())
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the view has changed since the last clear.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

fn copy(clipboard: &mut dyn Clipboard, text: &str) -> bool {
    match clipboard.write_text(text) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("copy to clipboard failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::keys::Key;
    use crate::node::Node;
    use crate::present::MenuEntry;

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    fn view() -> TreeView {
        let store = MemoryStore::from_nodes([
            Node::new("a", "A").with_children(["b", "c"]),
            Node::new("b", "B").with_child("d").with_expanded(true),
            Node::new("c", "C"),
            Node::new("d", "D"),
        ]);
        TreeView::new(store, Some(id("a")), &ViewConfig::default())
    }

    fn visible(view: &TreeView) -> Vec<&str> {
        view.projection().ids().iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn test_root_expanded_on_load() {
        assert_eq!(visible(&view()), vec!["a", "b", "d", "c"]);

        let store =
            MemoryStore::from_nodes([Node::new("a", "A").with_child("b"), Node::new("b", "B")]);
        let config = ViewConfig::new().with_expand_root_on_load(false);
        let view = TreeView::new(store, Some(id("a")), &config);
        assert_eq!(visible(&view), vec!["a"]);
    }

    #[test]
    fn test_keys_drive_navigation() {
        let mut view = view();
        let mut clip = MemoryClipboard::new();
        view.select(id("a"));

        assert!(view.handle_key(&KeyCombo::key(Key::Down), &mut clip));
        assert_eq!(view.selection().selected(), Some(&id("b")));

        // Left on expanded b collapses it.
        assert!(view.handle_key(&KeyCombo::key(Key::Left), &mut clip));
        assert_eq!(visible(&view), vec!["a", "b", "c"]);

        // Right expands again, then moves to the child.
        assert!(view.handle_key(&KeyCombo::key(Key::Right), &mut clip));
        assert!(view.handle_key(&KeyCombo::key(Key::Right), &mut clip));
        assert_eq!(view.selection().selected(), Some(&id("d")));

        assert!(view.handle_key(&KeyCombo::key(Key::Char('c')).ctrl(), &mut clip));
        assert_eq!(clip.contents(), Some("D"));

        assert!(!view.handle_key(&KeyCombo::key(Key::Char('x')), &mut clip));
    }

    #[test]
    fn test_collapsed_selection_blocks_navigation() {
        let mut view = view();
        let mut clip = MemoryClipboard::new();
        view.select(id("d"));
        view.set_expanded(&id("b"), false, false);
        assert_eq!(view.selected_index(), None);
        assert!(!view.handle_input(NavInput::Next, &mut clip));
        assert_eq!(view.selection().selected(), Some(&id("d")));
    }

    #[test]
    fn test_deep_toggle_expands_subtree() {
        let store = MemoryStore::from_nodes([
            Node::new("a", "A").with_child("b"),
            Node::new("b", "B").with_child("c"),
            Node::new("c", "C").with_child("d"),
            Node::new("d", "D"),
        ]);
        let config = ViewConfig::new().with_expand_root_on_load(false);
        let mut view = TreeView::new(store, Some(id("a")), &config);
        assert!(view.toggle_disclosure(&id("a"), true));
        assert_eq!(visible(&view), vec!["a", "b", "c", "d"]);
        assert!(view.toggle_disclosure(&id("a"), false));
        assert_eq!(visible(&view), vec!["a"]);
        // Inner flags survive a shallow collapse.
        assert!(view.toggle_disclosure(&id("a"), false));
        assert_eq!(visible(&view), vec!["a", "b", "c", "d"]);
        assert!(!view.toggle_disclosure(&id("d"), true));
    }

    #[test]
    fn test_mutate_rebuilds_and_researches() {
        let mut view = view();
        view.set_query(Some("e"));
        assert!(view.search_results().is_empty());
        view.mutate(|store| {
            store.insert(Node::new("e", "E"));
            store.set_children(&id("c"), vec![id("e")]);
            store.set_expanded(&id("c"), true);
        });
        assert_eq!(visible(&view), vec!["a", "b", "d", "c", "e"]);
        assert!(view.search_results().is_match(&id("e")));
    }

    #[test]
    fn test_children_counts_follow_rebuilds() {
        let mut view = view();
        assert_eq!(view.children_counts(), &[3, 1, 0, 0]);
        let counts: Vec<_> = view.rows(0..4).iter().map(|r| r.children_count).collect();
        assert_eq!(counts, vec![3, 1, 0, 0]);

        view.set_expanded(&id("b"), false, false);
        assert_eq!(view.children_counts(), &[2, 0, 0]);
        assert_eq!(view.rows(0..1)[0].children_count, 2);
    }

    #[test]
    fn test_set_root_rebuilds() {
        let mut view = view();
        view.set_root(Some(id("b")));
        assert_eq!(visible(&view), vec!["b", "d"]);
        view.set_root(None);
        assert!(view.projection().is_empty());
    }

    #[test]
    fn test_context_menu_and_actions() {
        struct Capture(Vec<MenuEntry>);
        impl ContextMenuHost for Capture {
            fn show(&mut self, _id: &NodeId, entries: Vec<MenuEntry>) {
                self.0 = entries;
            }
        }

        let mut view = view();
        let mut menu = Capture(Vec::new());
        let mut clip = MemoryClipboard::new();
        assert!(view.open_context_menu(&id("b"), &mut menu));
        assert!(!view.open_context_menu(&id("zzz"), &mut menu));

        for entry in menu.0.clone() {
            if let MenuEntry::Item { action, .. } = entry {
                view.activate(&action, &mut clip);
            }
        }
        assert_eq!(clip.contents(), Some("B id=b"));
        assert_eq!(visible(&view), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_visible_window_follows_selection() {
        let mut view = view();
        assert_eq!(view.visible_window(2), 0..2);
        view.select(id("c"));
        assert_eq!(view.visible_window(2), 2..4);
        view.select(id("a"));
        assert_eq!(view.visible_window(2), 0..2);
        assert_eq!(view.visible_window(10), 0..4);
        assert_eq!(view.visible_window(0), 0..0);
    }

    #[test]
    fn test_hover_and_dirty() {
        let mut view = view();
        view.clear_dirty();
        assert!(view.hover(Some(id("c"))));
        assert!(view.is_dirty());
        view.clear_dirty();
        assert!(!view.hover(Some(id("c"))));
        assert!(!view.is_dirty());
        let rows = view.rows(0..4);
        assert!(rows[3].focused);
    }
}
