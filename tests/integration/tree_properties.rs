use proptest::prelude::*;
use std::collections::HashSet;

use storyforge::store::{DocumentPatch, DocumentStore};
use storyforge::tree::NodeView;
use storyforge::types::{NodeId, NodeKind};

#[derive(Debug, Clone)]
enum Op {
    Create { folder: bool, parent: Option<usize> },
    Move { node: usize, target: Option<usize> },
    Delete { node: usize },
    Rename { node: usize, name: String },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<bool>(), proptest::option::of(0usize..32))
            .prop_map(|(folder, parent)| Op::Create { folder, parent }),
        2 => (0usize..32, proptest::option::of(0usize..32))
            .prop_map(|(node, target)| Op::Move { node, target }),
        1 => (0usize..32).prop_map(|node| Op::Delete { node }),
        1 => (0usize..32, "[a-z ]{0,12}").prop_map(|(node, name)| Op::Rename { node, name }),
    ]
}

fn collect(views: &[NodeView], parent: Option<&NodeId>, seen: &mut Vec<NodeId>) {
    for view in views {
        assert_eq!(view.parent_id.as_ref(), parent, "parent_id drift for {}", view.id);
        if view.kind == NodeKind::Document {
            assert!(view.children.is_empty());
            assert!(view.document.is_some());
        } else {
            assert!(view.document.is_none());
        }
        assert!(view.updated_at >= view.created_at);
        seen.push(view.id.clone());
        collect(&view.children, Some(&view.id), seen);
    }
}

fn check_shape(store: &DocumentStore) {
    let snapshot = store.snapshot();
    let mut seen = Vec::new();
    collect(&snapshot, None, &mut seen);
    let unique: HashSet<_> = seen.iter().cloned().collect();
    assert_eq!(unique.len(), seen.len(), "node reachable twice");
    assert_eq!(seen.len(), store.len());

    let stats = store.stats();
    assert_eq!(
        (stats.document_count + stats.folder_count) as usize,
        store.len()
    );
}

fn pick(ids: &[NodeId], index: usize) -> Option<NodeId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()].clone())
    }
}

proptest! {
    #[test]
    fn prop_operations_preserve_forest_shape(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let store = DocumentStore::new();
        let mut ids: Vec<NodeId> = Vec::new();

        for op in ops {
            let before = store.snapshot();
            let failed = match op {
                Op::Create { folder, parent } => {
                    let kind = if folder { NodeKind::Folder } else { NodeKind::Document };
                    let parent = parent.and_then(|p| pick(&ids, p));
                    match store.create("node", kind, parent.as_ref()) {
                        Ok(id) => {
                            prop_assert!(!ids.contains(&id));
                            ids.push(id);
                            false
                        }
                        Err(_) => true,
                    }
                }
                Op::Move { node, target } => match pick(&ids, node) {
                    Some(id) => {
                        let target = target.and_then(|t| pick(&ids, t));
                        store.move_node(&id, target.as_ref()).is_err()
                    }
                    None => true,
                },
                Op::Delete { node } => match pick(&ids, node) {
                    Some(id) => {
                        let result = store.delete(&id);
                        ids.retain(|known| store.find(known).is_some());
                        result.is_err()
                    }
                    None => true,
                },
                Op::Rename { node, name } => match pick(&ids, node) {
                    Some(id) => store.update(&id, &DocumentPatch::new().name(name)).is_err(),
                    None => true,
                },
            };

            if failed {
                prop_assert_eq!(store.snapshot(), before);
            }
            check_shape(&store);
        }
    }

    #[test]
    fn prop_filter_keeps_every_match(names in proptest::collection::vec("[a-c]{1,4}", 1..12), query in "[a-c]{1,2}") {
        let store = DocumentStore::new();
        let folder = store.create("Shelf", NodeKind::Folder, None).unwrap();
        for name in &names {
            store.create(name, NodeKind::Document, Some(&folder)).unwrap();
        }

        let expected = names.iter().filter(|n| n.contains(query.as_str())).count();
        let filtered = store.filtered_view(&query);
        let kept = filtered.first().map(|f| f.children.len()).unwrap_or(0);
        prop_assert_eq!(kept, expected);
        prop_assert_eq!(store.count_matches(&query), expected);
        prop_assert_eq!(filtered.is_empty(), expected == 0);
    }
}
