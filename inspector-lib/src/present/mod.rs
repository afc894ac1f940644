//! Per-row presentation facts for the renderer.
//!
//! The presenter turns the flattened projection plus the search result and
//! selection into [`RowFacts`]: everything a renderer needs to paint a row
//! without knowing anything about the tree.

mod decoration;
mod menu;

pub use decoration::{AssetRef, BuiltinDecorations, DecorateFn, DecorationResolver};
pub use menu::{
    context_menu, copy_text, ContextMenuHost, MenuAction, MenuCallback, MenuEntry, MenuExtension,
};

use std::ops::Range;
use std::sync::Arc;

use crate::config::ViewConfig;
use crate::flatten::FlattenedProjection;
use crate::node::{Node, NodeId};
use crate::search::{highlight_ranges, is_highlighted_attribute, SearchResultSet};
use crate::selection::SelectionState;

/// An attribute as shown on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFacts {
    pub name: String,
    pub value: String,
    /// Byte ranges of `value` to highlight.
    pub highlights: Vec<Range<usize>>,
}

/// Everything the renderer needs for one visible row.
#[derive(Debug, Clone)]
pub struct RowFacts {
    pub id: NodeId,
    pub index: usize,
    pub node: Arc<Node>,
    pub level: usize,
    pub selected: bool,
    pub focused: bool,
    pub is_even: bool,
    pub is_query_match: bool,
    /// The query to highlight, only set on matching rows.
    pub highlight_text: Option<String>,
    /// Byte ranges of the node name to highlight.
    pub name_highlights: Vec<Range<usize>>,
    /// Number of visible rows in this node's subtree.
    pub children_count: usize,
    pub decoration: Option<AssetRef>,
    pub context_menu: Vec<MenuEntry>,
    pub attributes: Vec<AttributeFacts>,
}

/// Visible descendant count of every row.
///
/// For row `i` this is the number of following rows deeper than it, up to the
/// first row at its level or shallower. Computed in one pass.
pub fn children_counts(projection: &FlattenedProjection) -> Vec<usize> {
    let rows = projection.rows();
    let mut counts = vec![0; rows.len()];
    let mut open: Vec<usize> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        while let Some(&top) = open.last() {
            if rows[top].level < row.level {
                break;
            }
            counts[top] = i - top - 1;
            open.pop();
        }
        open.push(i);
    }
    for top in open {
        counts[top] = rows.len() - top - 1;
    }
    counts
}

/// Visible descendant count of a single row.
pub fn children_count(projection: &FlattenedProjection, index: usize) -> usize {
    let rows = projection.rows();
    let Some(row) = rows.get(index) else {
        return 0;
    };
    rows[index + 1..]
        .iter()
        .take_while(|r| r.level > row.level)
        .count()
}

/// Computes [`RowFacts`] for rows of a projection.
pub struct RowPresenter {
    alternating_rows: bool,
    decorate: Option<DecorateFn>,
    resolver: Box<dyn DecorationResolver>,
    extensions: Vec<MenuExtension>,
}

impl std::fmt::Debug for RowPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowPresenter")
            .field("alternating_rows", &self.alternating_rows)
            .field("decorate", &self.decorate.is_some())
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

impl Default for RowPresenter {
    fn default() -> Self {
        Self::new(&ViewConfig::default())
    }
}

impl RowPresenter {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            alternating_rows: config.alternating_rows,
            decorate: None,
            resolver: Box::new(BuiltinDecorations),
            extensions: Vec::new(),
        }
    }

    /// Use a per-node decoration function instead of tag resolution.
    pub fn with_decorate(
        mut self,
        decorate: impl Fn(&Node) -> Option<AssetRef> + Send + Sync + 'static,
    ) -> Self {
        self.decorate = Some(Arc::new(decorate));
        self
    }

    /// Replace the tag -> asset resolver.
    pub fn with_resolver(mut self, resolver: impl DecorationResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Append a context menu extension.
    pub fn with_extension(mut self, extension: MenuExtension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Decoration for a node.
    pub fn decoration(&self, node: &Node) -> Option<AssetRef> {
        match &self.decorate {
            Some(decorate) => decorate(node),
            None => node
                .decoration
                .as_deref()
                .and_then(|tag| self.resolver.resolve(tag)),
        }
    }

    /// Context menu for a node.
    pub fn context_menu(&self, node: &Node) -> Vec<MenuEntry> {
        context_menu(node, &self.extensions)
    }

    /// Facts for every row in `range` (clamped to the projection).
    pub fn present(
        &self,
        projection: &FlattenedProjection,
        range: Range<usize>,
        search: &SearchResultSet,
        selection: &SelectionState,
    ) -> Vec<RowFacts> {
        let counts = children_counts(projection);
        self.present_with_counts(projection, &counts, range, search, selection)
    }

    /// Like [`present`](Self::present), reusing `counts` from
    /// [`children_counts`] on the same projection.
    pub fn present_with_counts(
        &self,
        projection: &FlattenedProjection,
        counts: &[usize],
        range: Range<usize>,
        search: &SearchResultSet,
        selection: &SelectionState,
    ) -> Vec<RowFacts> {
        let end = range.end.min(projection.len());
        let start = range.start.min(end);
        (start..end)
            .filter_map(|i| {
                let count = match counts.get(i) {
                    Some(&count) => count,
                    None => children_count(projection, i),
                };
                self.build(projection, i, count, search, selection)
            })
            .collect()
    }

    /// Facts for a single row.
    pub fn present_row(
        &self,
        projection: &FlattenedProjection,
        index: usize,
        search: &SearchResultSet,
        selection: &SelectionState,
    ) -> Option<RowFacts> {
        let count = children_count(projection, index);
        self.build(projection, index, count, search, selection)
    }

    fn build(
        &self,
        projection: &FlattenedProjection,
        index: usize,
        children_count: usize,
        search: &SearchResultSet,
        selection: &SelectionState,
    ) -> Option<RowFacts> {
        let row = projection.row(index)?;
        let node = &row.node;

        let is_query_match = search.is_match(&row.id);
        let highlight_text = search
            .query()
            .filter(|_| is_query_match)
            .map(str::to_string);
        let highlight = |text: &str| {
            highlight_text
                .as_deref()
                .map(|q| highlight_ranges(text, q))
                .unwrap_or_default()
        };

        let attributes = node
            .attributes
            .iter()
            .map(|a| AttributeFacts {
                name: a.name.clone(),
                value: a.value.clone(),
                highlights: if is_highlighted_attribute(&a.name) {
                    highlight(&a.value)
                } else {
                    Vec::new()
                },
            })
            .collect();

        Some(RowFacts {
            id: row.id.clone(),
            index,
            node: Arc::clone(node),
            level: row.level,
            selected: selection.is_selected(&row.id),
            focused: selection.is_focused(&row.id),
            is_even: self.alternating_rows && index % 2 == 0,
            is_query_match,
            name_highlights: highlight(&node.name),
            highlight_text,
            children_count,
            decoration: self.decoration(node),
            context_menu: self.context_menu(node),
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::search::search;
    use crate::store::MemoryStore;

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    fn store() -> MemoryStore {
        MemoryStore::from_nodes([
            Node::new("a", "A")
                .with_children(["b", "c"])
                .with_expanded(true)
                .with_decoration("root"),
            Node::new("b", "B").with_child("d").with_expanded(true),
            Node::new("c", "C").with_decoration("unknown-tag"),
            Node::new("d", "D")
                .with_attribute("class", "dd")
                .with_attribute("id", "odd"),
        ])
    }

    #[test]
    fn test_children_counts() {
        let p = flatten(&store(), Some(&id("a")));
        assert_eq!(children_counts(&p), vec![3, 1, 0, 0]);
        for i in 0..p.len() {
            assert_eq!(children_count(&p, i), children_counts(&p)[i]);
        }
        assert_eq!(children_count(&p, 99), 0);
    }

    #[test]
    fn test_is_even_gated_by_config() {
        let p = flatten(&store(), Some(&id("a")));
        let none = SearchResultSet::none();
        let sel = SelectionState::new();

        let rows = RowPresenter::default().present(&p, 0..p.len(), &none, &sel);
        let even: Vec<_> = rows.iter().map(|r| r.is_even).collect();
        assert_eq!(even, vec![true, false, true, false]);

        let plain = RowPresenter::new(&ViewConfig::new().with_alternating_rows(false));
        let rows = plain.present(&p, 0..p.len(), &none, &sel);
        assert!(rows.iter().all(|r| !r.is_even));
    }

    #[test]
    fn test_highlight_only_on_matches_and_id_attributes() {
        let store = store();
        let p = flatten(&store, Some(&id("a")));
        let result = search(&store, Some(&id("a")), Some("d"));
        let rows =
            RowPresenter::default().present(&p, 0..p.len(), &result, &SelectionState::new());

        let d = &rows[2];
        assert!(d.is_query_match);
        assert_eq!(d.highlight_text.as_deref(), Some("d"));
        assert_eq!(d.name_highlights, vec![0..1]);
        assert_eq!(d.attributes[0].highlights, Vec::<Range<usize>>::new());
        assert_eq!(d.attributes[1].highlights, vec![1..2, 2..3]);

        let a = &rows[0];
        assert!(!a.is_query_match);
        assert_eq!(a.highlight_text, None);
        assert!(a.name_highlights.is_empty());
    }

    #[test]
    fn test_selection_and_focus_flags() {
        let p = flatten(&store(), Some(&id("a")));
        let mut sel = SelectionState::with_selected("b");
        sel.set_focused(Some(id("c")));
        let rows =
            RowPresenter::default().present(&p, 0..p.len(), &SearchResultSet::none(), &sel);
        let flags: Vec<_> = rows.iter().map(|r| (r.selected, r.focused)).collect();
        assert_eq!(flags, vec![(false, false), (true, false), (false, false), (false, true)]);
    }

    #[test]
    fn test_decoration_from_tag_or_function() {
        let p = flatten(&store(), Some(&id("a")));
        let none = SearchResultSet::none();
        let sel = SelectionState::new();

        let rows = RowPresenter::default().present(&p, 0..p.len(), &none, &sel);
        assert_eq!(rows[0].decoration, Some(AssetRef::from_static("icons/root.png")));
        assert_eq!(rows[3].decoration, None);

        let custom = RowPresenter::default()
            .with_decorate(|n| Some(AssetRef::new(format!("x/{}", n.id))));
        let rows = custom.present(&p, 0..p.len(), &none, &sel);
        assert_eq!(rows[0].decoration, Some(AssetRef::new("x/a")));
        assert_eq!(rows[3].decoration, Some(AssetRef::new("x/c")));
    }

    #[test]
    fn test_custom_resolver_maps_tags() {
        struct Themed;
        impl DecorationResolver for Themed {
            fn resolve(&self, tag: &str) -> Option<AssetRef> {
                Some(AssetRef::new(format!("dark/{}.svg", tag)))
            }
        }

        let p = flatten(&store(), Some(&id("a")));
        let rows = RowPresenter::default().with_resolver(Themed).present(
            &p,
            0..1,
            &SearchResultSet::none(),
            &SelectionState::new(),
        );
        assert_eq!(rows[0].decoration, Some(AssetRef::new("dark/root.svg")));
    }

    #[test]
    fn test_present_clamps_range() {
        let p = flatten(&store(), Some(&id("a")));
        let rows = RowPresenter::default().present(
            &p,
            2..50,
            &SearchResultSet::none(),
            &SelectionState::new(),
        );
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "c"]);
        assert_eq!(rows[0].index, 2);
        assert_eq!(rows[0].level, 3);
    }

    #[test]
    fn test_context_menu_includes_extensions() {
        let presenter =
            RowPresenter::default().with_extension(MenuExtension::new("Reveal", |_| {}));
        let p = flatten(&store(), Some(&id("a")));
        let row = presenter
            .present_row(&p, 0, &SearchResultSet::none(), &SelectionState::new())
            .unwrap();
        let labels: Vec<_> = row.context_menu.iter().map(MenuEntry::label).collect();
        assert_eq!(labels, vec![None, Some("Copy"), Some("Collapse"), Some("Reveal")]);
        assert_eq!(row.children_count, 3);
    }
}
