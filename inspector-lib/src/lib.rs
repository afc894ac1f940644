//! Flattening, navigation and search over an element tree.
//!
//! An inspected hierarchy lives in a [`TreeStore`](store::TreeStore). The
//! core turns it into a list of visible rows ([`flatten`](flatten::flatten)),
//! moves a selection over those rows from keyboard input
//! ([`navigate`](navigate::navigate)), marks nodes matching a query
//! ([`search`](search::search)), and computes what the renderer needs for
//! each row ([`RowPresenter`](present::RowPresenter)).
//!
//! None of these steps fail: a missing node, an empty query or a selection
//! that scrolled out of the projection is simply a no-op.
//!
//! # Example
//!
//! ```
//! use inspector_lib::prelude::*;
//!
//! let store = MemoryStore::from_nodes([
//!     Node::new("a", "A").with_children(["b", "c"]).with_expanded(true),
//!     Node::new("b", "B"),
//!     Node::new("c", "C"),
//! ]);
//! let mut view = TreeView::new(store, Some(NodeId::new("a")), &ViewConfig::default());
//! let mut clipboard = MemoryClipboard::new();
//!
//! view.select(NodeId::new("a"));
//! view.handle_input(NavInput::Next, &mut clipboard);
//! assert_eq!(view.selection().selected(), Some(&NodeId::new("b")));
//! ```

pub mod clipboard;
pub mod config;
pub mod error;
pub mod flatten;
pub mod keys;
pub mod navigate;
pub mod node;
pub mod present;
pub mod search;
pub mod selection;
pub mod store;
pub mod view;

pub mod prelude {
    pub use crate::clipboard::{Clipboard, MemoryClipboard};
    pub use crate::config::ViewConfig;
    pub use crate::error::{ClipboardError, StoreError};
    pub use crate::flatten::{flatten, FlatRow, FlattenedProjection};
    pub use crate::keys::{Key, KeyCombo, Keybinds, Modifiers};
    pub use crate::navigate::{navigate, NavInput, NavRequest};
    pub use crate::node::{Attribute, Node, NodeId};
    pub use crate::present::{
        children_count, children_counts, AssetRef, ContextMenuHost, DecorationResolver,
        MenuAction, MenuEntry, MenuExtension, RowFacts, RowPresenter,
    };
    pub use crate::search::{highlight_ranges, search, SearchResultSet};
    pub use crate::selection::SelectionState;
    pub use crate::store::{MemoryStore, TreeSnapshot, TreeStore};
    pub use crate::view::TreeView;
}
