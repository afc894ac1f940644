use std::collections::HashSet;

use inspector_lib::prelude::*;
use proptest::prelude::*;

/// Arbitrary (possibly cyclic) trees: node `i` has random child indices and a
/// random expansion flag. Some child indices point past the node list.
fn arb_store() -> impl Strategy<Value = MemoryStore> {
    (1usize..24).prop_flat_map(|n| {
        prop::collection::vec((prop::collection::vec(0..n + 2, 0..4), any::<bool>()), n).prop_map(
            |specs| {
                MemoryStore::from_nodes(specs.into_iter().enumerate().map(
                    |(i, (children, expanded))| {
                        Node::new(i.to_string(), format!("node{i}"))
                            .with_children(children.into_iter().map(|c| c.to_string()))
                            .with_expanded(expanded)
                    },
                ))
            },
        )
    })
}

fn root() -> NodeId {
    NodeId::new("0")
}

proptest! {
    #[test]
    fn flatten_visits_each_node_once(store in arb_store()) {
        let p = flatten(&store, Some(&root()));
        let unique: HashSet<_> = p.ids().iter().collect();
        prop_assert_eq!(unique.len(), p.len());
        prop_assert!(p.len() <= store.len());
    }

    #[test]
    fn flatten_is_valid_preorder(store in arb_store()) {
        let p = flatten(&store, Some(&root()));
        let rows = p.rows();
        prop_assert_eq!(rows.first().map(|r| r.level), Some(1));

        for (i, row) in rows.iter().enumerate().skip(1) {
            prop_assert!(row.level >= 2);
            prop_assert!(row.level <= rows[i - 1].level + 1);
            // The nearest shallower row above is the parent: expanded and
            // listing this node as a child.
            let parent = rows[..i].iter().rev().find(|r| r.level == row.level - 1).unwrap();
            prop_assert!(parent.is_expanded());
            prop_assert!(parent.node.children.contains(&row.id));
        }

        for (i, row) in rows.iter().enumerate() {
            let next_is_child = rows.get(i + 1).is_some_and(|n| n.level == row.level + 1);
            if next_is_child {
                prop_assert!(row.is_expanded());
            }
        }
    }

    #[test]
    fn flatten_is_idempotent(store in arb_store()) {
        let first = flatten(&store, Some(&root()));
        let second = flatten(&store, Some(&root()));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn children_counts_match_single_row_scan(store in arb_store()) {
        let p = flatten(&store, Some(&root()));
        let counts = children_counts(&p);
        for (i, count) in counts.iter().enumerate() {
            prop_assert_eq!(*count, children_count(&p, i));
        }
    }

    #[test]
    fn navigation_only_selects_visible_rows(
        store in arb_store(),
        steps in prop::collection::vec(0usize..6, 1..20),
    ) {
        let p = flatten(&store, Some(&root()));
        let inputs = [
            NavInput::Previous,
            NavInput::Next,
            NavInput::First,
            NavInput::Last,
            NavInput::CollapseOrParent,
            NavInput::ExpandOrChild,
        ];
        let mut selected = Some(root());
        for step in steps {
            if let Some(NavRequest::Select(id)) = navigate(&p, selected.as_ref(), inputs[step]) {
                prop_assert!(p.contains(&id));
                selected = Some(id);
            }
        }
    }
}
