//! Search matching and highlight ranges.
//!
//! Matching is a case-insensitive substring test against a node's name and
//! the values of its `id` and `addr` attributes. No other attribute takes
//! part, even if its value contains the query.

use std::collections::HashSet;
use std::ops::Range;

use crate::flatten::walk;
use crate::node::{Node, NodeId};
use crate::store::TreeStore;

/// Attribute names whose values are searched and highlighted.
pub const HIGHLIGHTED_ATTRIBUTES: [&str; 2] = ["id", "addr"];

/// Whether an attribute with this name takes part in matching.
pub fn is_highlighted_attribute(name: &str) -> bool {
    HIGHLIGHTED_ATTRIBUTES.contains(&name)
}

/// The active query and the set of nodes that match it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultSet {
    query: Option<String>,
    matches: HashSet<NodeId>,
}

impl SearchResultSet {
    /// A result set with no query (highlighting disabled).
    pub fn none() -> Self {
        Self::default()
    }

    /// The active query, `None` when highlighting is disabled.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn is_match(&self, id: &NodeId) -> bool {
        self.matches.contains(id)
    }

    /// Number of matching nodes.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Search every node reachable from `root`, collapsed subtrees included.
///
/// An empty or absent query produces an empty result set with no query.
pub fn search(
    store: &impl TreeStore,
    root: Option<&NodeId>,
    query: Option<&str>,
) -> SearchResultSet {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return SearchResultSet::none();
    };
    let mut nodes = Vec::new();
    if let Some(root) = root {
        walk(store, root, |_| true, |_, node, _| nodes.push(node));
    }
    search_nodes(nodes.iter().map(|n| &**n), Some(query))
}

/// Search an arbitrary set of nodes.
pub fn search_nodes<'a>(
    nodes: impl IntoIterator<Item = &'a Node>,
    query: Option<&str>,
) -> SearchResultSet {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return SearchResultSet::none();
    };
    let needle = lowercase_chars(query);

    let matches: HashSet<NodeId> = nodes
        .into_iter()
        .filter(|node| node_matches(node, &needle))
        .map(|node| node.id.clone())
        .collect();

    log::trace!("search {:?}: {} matches", query, matches.len());
    SearchResultSet {
        query: Some(query.to_string()),
        matches,
    }
}

/// Whether a single node matches a query.
pub fn matches_query(node: &Node, query: &str) -> bool {
    !query.is_empty() && node_matches(node, &lowercase_chars(query))
}

fn node_matches(node: &Node, needle: &[char]) -> bool {
    contains_folded(&node.name, needle)
        || node
            .attributes
            .iter()
            .filter(|a| is_highlighted_attribute(&a.name))
            .any(|a| contains_folded(&a.value, needle))
}

/// Byte ranges of every non-overlapping, case-insensitive occurrence of
/// `query` in `text`.
pub fn highlight_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    if query.is_empty() {
        return ranges;
    }
    let needle = lowercase_chars(query);

    let mut skip_until = 0;
    for (start, _) in text.char_indices() {
        if start < skip_until {
            continue;
        }
        if let Some(end) = match_at(text, start, &needle) {
            ranges.push(start..end);
            skip_until = end;
        }
    }
    ranges
}

fn lowercase_chars(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn contains_folded(text: &str, needle: &[char]) -> bool {
    text.char_indices()
        .any(|(start, _)| match_at(text, start, needle).is_some())
}

/// If `needle` matches `text` at byte offset `start`, return the end offset.
///
/// A text character whose lowercase form only partially covers the rest of
/// the needle does not match.
fn match_at(text: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut pos = 0;
    for (offset, c) in text[start..].char_indices() {
        if pos == needle.len() {
            return Some(start + offset);
        }
        for lower in c.to_lowercase() {
            if needle.get(pos) != Some(&lower) {
                return None;
            }
            pos += 1;
        }
    }
    (pos == needle.len()).then_some(text.len())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    fn root() -> NodeId {
        NodeId::new("r")
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let store = MemoryStore::from_nodes([
            Node::new("r", "Root").with_children(["d", "x"]),
            Node::new("d", "D"),
            Node::new("x", "Box"),
        ]);
        let result = search(&store, Some(&root()), Some("d"));
        assert_eq!(result.query(), Some("d"));
        assert!(result.is_match(&NodeId::new("d")));
        assert!(!result.is_match(&NodeId::new("x")));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_only_id_and_addr_attributes_match() {
        let nodes = [
            Node::new("1", "Row").with_attribute("id", "header"),
            Node::new("2", "Row").with_attribute("addr", "0xHEAD"),
            Node::new("3", "Row").with_attribute("class", "header"),
        ];
        let result = search_nodes(&nodes, Some("head"));
        assert!(result.is_match(&NodeId::new("1")));
        assert!(result.is_match(&NodeId::new("2")));
        assert!(!result.is_match(&NodeId::new("3")));
    }

    #[test]
    fn test_empty_query_disables_search() {
        let store = MemoryStore::from_nodes([Node::new("r", "A")]);
        for query in [None, Some("")] {
            let result = search(&store, Some(&root()), query);
            assert_eq!(result.query(), None);
            assert!(result.is_empty());
        }
    }

    #[test]
    fn test_search_reaches_collapsed_nodes_only_from_root() {
        let store = MemoryStore::from_nodes([
            Node::new("r", "Root").with_child("deep"),
            Node::new("deep", "Hidden"),
            Node::new("orphan", "Hidden"),
        ]);
        let result = search(&store, Some(&root()), Some("hidden"));
        assert!(result.is_match(&NodeId::new("deep")));
        assert!(!result.is_match(&NodeId::new("orphan")));

        let result = search(&store, None, Some("hidden"));
        assert_eq!(result.query(), Some("hidden"));
        assert!(result.is_empty());
    }

    /// A store backed by a plain list, looked up by scanning.
    struct ListStore(Vec<Node>);

    impl TreeStore for ListStore {
        fn get_node(&self, id: &NodeId) -> Option<Arc<Node>> {
            self.0.iter().find(|n| &n.id == id).cloned().map(Arc::new)
        }
    }

    #[test]
    fn test_search_through_custom_store() {
        let store = ListStore(vec![
            Node::new("r", "Root").with_children(["a", "b", "r"]),
            Node::new("a", "Text").with_attribute("addr", "0xbeef"),
            Node::new("b", "Image"),
        ]);
        let result = search(&store, Some(&root()), Some("BEEF"));
        assert_eq!(result.len(), 1);
        assert!(result.is_match(&NodeId::new("a")));
    }

    #[test]
    fn test_highlight_ranges() {
        assert_eq!(highlight_ranges("Column", "col"), vec![0..3]);
        assert_eq!(highlight_ranges("aAaA", "aa"), vec![0..2, 2..4]);
        assert_eq!(highlight_ranges("Text", "z"), Vec::<Range<usize>>::new());
        assert_eq!(highlight_ranges("Text", ""), Vec::<Range<usize>>::new());
        assert_eq!(highlight_ranges("ÄbcÄ", "ä"), vec![0..2, 4..6]);
    }

    #[test]
    fn test_matches_query() {
        let node = Node::new("n", "Padding").with_attribute("addr", "0x1f");
        assert!(matches_query(&node, "PAD"));
        assert!(matches_query(&node, "1F"));
        assert!(!matches_query(&node, ""));
        assert!(!matches_query(&node, "margin"));
    }
}
