use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use storyforge::error::StoreError;
use storyforge::store::{DocumentPatch, DocumentStore};
use storyforge::tree::NodeRecord;
use storyforge::types::{NodeId, NodeKind, Timestamp};

fn chapters_and_research() -> (DocumentStore, NodeId, NodeId) {
    let store = DocumentStore::new();
    let draft = store.create("Draft", NodeKind::Folder, None).unwrap();
    let research = store.create("Research", NodeKind::Folder, None).unwrap();
    store
        .create("Chapter 1", NodeKind::Document, Some(&draft))
        .unwrap();
    store
        .create("Chapter 2", NodeKind::Document, Some(&draft))
        .unwrap();
    store
        .create("Notes", NodeKind::Document, Some(&research))
        .unwrap();
    (store, draft, research)
}

#[test]
fn test_rapid_creates_yield_unique_ids() {
    let store = DocumentStore::new();
    let mut seen = HashSet::new();
    for i in 0..500 {
        let kind = if i % 3 == 0 {
            NodeKind::Folder
        } else {
            NodeKind::Document
        };
        let id = store.create(&format!("node {}", i), kind, None).unwrap();
        assert!(seen.insert(id), "duplicate id at iteration {}", i);
    }
    assert_eq!(store.len(), 500);
}

#[test]
fn test_concurrent_creates_share_one_forest() {
    let store = Arc::new(DocumentStore::new());
    let folder = store.create("Draft", NodeKind::Folder, None).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            let folder = folder.clone();
            thread::spawn(move || {
                (0..25)
                    .map(|i| {
                        store
                            .create(&format!("t{} c{}", t, i), NodeKind::Document, Some(&folder))
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id));
        }
    }
    assert_eq!(store.get(&folder).unwrap().children.len(), 100);
}

#[test]
fn test_find_after_create_returns_name_and_kind() {
    let store = DocumentStore::new();
    let folder = store.create("Research", NodeKind::Folder, None).unwrap();
    let doc = store
        .create("Character Profiles", NodeKind::Document, Some(&folder))
        .unwrap();

    let folder_view = store.find(&folder).unwrap();
    assert_eq!(folder_view.name, "Research");
    assert_eq!(folder_view.kind, NodeKind::Folder);

    let doc_view = store.find(&doc).unwrap();
    assert_eq!(doc_view.name, "Character Profiles");
    assert_eq!(doc_view.kind, NodeKind::Document);
    assert_eq!(doc_view.parent_id, Some(folder));
    assert_eq!(doc_view.word_count(), 0);
}

#[test]
fn test_rename_leaves_other_fields_untouched() {
    let store = DocumentStore::new();
    let id = store.create("Chapter 1", NodeKind::Document, None).unwrap();
    let before = store
        .update(
            &id,
            &DocumentPatch::new()
                .content("<p>It was dark.</p>")
                .notes("tighten opening")
                .word_count(3),
        )
        .unwrap();

    let after = store
        .update(&id, &DocumentPatch::new().name("Prologue"))
        .unwrap();

    assert_eq!(after.name, "Prologue");
    assert_eq!(after.document, before.document);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
}

#[test]
fn test_update_missing_node_is_not_found() {
    let store = DocumentStore::new();
    let err = store
        .update(&NodeId::from("doc-404"), &DocumentPatch::new().name("x"))
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound(NodeId::from("doc-404")));
}

#[test]
fn test_delete_folder_removes_descendants() {
    let store = DocumentStore::new();
    let draft = store.create("Draft", NodeKind::Folder, None).unwrap();
    let act = store.create("Act I", NodeKind::Folder, Some(&draft)).unwrap();
    let scene = store.create("Scene 1", NodeKind::Document, Some(&act)).unwrap();
    let outline = store.create("Outline", NodeKind::Document, None).unwrap();

    assert_eq!(store.delete(&draft).unwrap(), 3);

    assert!(store.find(&draft).is_none());
    assert!(store.find(&act).is_none());
    assert!(store.find(&scene).is_none());
    assert!(store.find(&outline).is_some());
    assert!(store.delete(&draft).unwrap_err().is_not_found());
}

#[test]
fn test_move_into_self_or_descendant_leaves_forest_unchanged() {
    let store = DocumentStore::new();
    let a = store.create("A", NodeKind::Folder, None).unwrap();
    let b = store.create("B", NodeKind::Folder, Some(&a)).unwrap();
    let c = store.create("C", NodeKind::Folder, Some(&b)).unwrap();
    let before = store.snapshot();

    assert!(store.move_node(&a, Some(&a)).unwrap_err().is_invalid());
    assert!(store.move_node(&a, Some(&b)).unwrap_err().is_invalid());
    assert!(store.move_node(&a, Some(&c)).unwrap_err().is_invalid());

    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_move_into_document_or_missing_target() {
    let (store, draft, _) = chapters_and_research();
    let outline = store.create("Outline", NodeKind::Document, None).unwrap();
    let before = store.snapshot();

    assert!(store.move_node(&draft, Some(&outline)).unwrap_err().is_invalid());
    assert!(store
        .move_node(&draft, Some(&NodeId::from("folder-404")))
        .unwrap_err()
        .is_not_found());
    assert!(store
        .move_node(&NodeId::from("doc-404"), None)
        .unwrap_err()
        .is_not_found());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_move_reparents_and_appends() {
    let (store, draft, research) = chapters_and_research();
    let chapter = store.get(&draft).unwrap().children[0].id.clone();

    store.move_node(&chapter, Some(&research)).unwrap();

    let research_view = store.get(&research).unwrap();
    assert_eq!(research_view.children.last().unwrap().id, chapter);
    assert_eq!(store.parent_of(&chapter).unwrap(), Some(research.clone()));
    assert_eq!(store.get(&draft).unwrap().children.len(), 1);

    store.move_node(&chapter, None).unwrap();
    assert_eq!(store.parent_of(&chapter).unwrap(), None);
    assert_eq!(store.snapshot().last().unwrap().id, chapter);
}

#[test]
fn test_stats_counts_documents_folders_and_words() {
    let store = DocumentStore::new();
    let full = store.create("Draft", NodeKind::Folder, None).unwrap();
    store.create("Empty", NodeKind::Folder, None).unwrap();
    let first = store.create("One", NodeKind::Document, Some(&full)).unwrap();
    let second = store.create("Two", NodeKind::Document, Some(&full)).unwrap();
    store
        .update(&first, &DocumentPatch::new().word_count(10))
        .unwrap();
    store
        .update(&second, &DocumentPatch::new().word_count(20))
        .unwrap();

    let stats = store.stats();
    assert_eq!(stats.document_count, 2);
    assert_eq!(stats.folder_count, 2);
    assert_eq!(stats.total_word_count, 30);
}

#[test]
fn test_filtered_view_keeps_matching_branch_only() {
    let (store, draft, _) = chapters_and_research();

    let view = store.filtered_view("chapter");
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, draft);
    let names: Vec<_> = view[0].children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Chapter 1", "Chapter 2"]);

    assert_eq!(store.filtered_view(""), store.snapshot());
    assert!(store.filtered_view("zzz").is_empty());
}

#[test]
fn test_full_update_round_trip_is_idempotent() {
    let store = DocumentStore::new();
    let id = store.create("Untitled", NodeKind::Document, None).unwrap();
    let patch = DocumentPatch::new()
        .name("Chapter 5")
        .title("Chapter 5: Tide")
        .content("<p>The water rose.</p>")
        .notes("check tide tables")
        .word_count(3);

    let first = store.update(&id, &patch).unwrap();
    let found = store.find(&id).unwrap();
    assert_eq!(found, first);
    assert_eq!(found.name, "Chapter 5");
    let doc = found.document.clone().unwrap();
    assert_eq!(doc.title, "Chapter 5: Tide");
    assert_eq!(doc.content, "<p>The water rose.</p>");
    assert_eq!(doc.notes, "check tide tables");
    assert_eq!(doc.word_count, 3);

    let second = store.update(&id, &patch).unwrap();
    assert_eq!(second.name, first.name);
    assert_eq!(second.document, first.document);
    assert!(second.updated_at >= first.updated_at);
}

#[test]
fn test_folder_rejects_document_fields() {
    let store = DocumentStore::new();
    let folder = store.create("Draft", NodeKind::Folder, None).unwrap();
    let before = store.snapshot();
    assert!(store
        .update(&folder, &DocumentPatch::new().content("text"))
        .unwrap_err()
        .is_invalid());
    assert_eq!(store.snapshot(), before);
    assert_eq!(
        store
            .update(&folder, &DocumentPatch::new().name("Manuscript"))
            .unwrap()
            .name,
        "Manuscript"
    );
}

fn long_ago() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

fn folder_record(id: &str, parent: Option<&str>) -> NodeRecord {
    NodeRecord {
        id: NodeId::from(id),
        name: id.to_string(),
        kind: NodeKind::Folder,
        parent_id: parent.map(NodeId::from),
        document: None,
        created_at: long_ago(),
        updated_at: long_ago(),
    }
}

/// book > part > act, plus a second top-level folder
fn dated_folders() -> DocumentStore {
    let store = DocumentStore::new();
    store
        .restore_records(&[
            folder_record("book", None),
            folder_record("part", Some("book")),
            folder_record("act", Some("part")),
            folder_record("shelf", None),
        ])
        .unwrap();
    store
}

fn updated_at(store: &DocumentStore, id: &str) -> Timestamp {
    store.get(&NodeId::from(id)).unwrap().updated_at
}

#[test]
fn test_create_refreshes_parent_but_not_grandparent() {
    let store = dated_folders();
    let scene = store
        .create("Scene", NodeKind::Document, Some(&NodeId::from("act")))
        .unwrap();

    assert!(updated_at(&store, "act") > long_ago());
    assert_eq!(updated_at(&store, "part"), long_ago());
    assert_eq!(updated_at(&store, "book"), long_ago());
    assert_eq!(updated_at(&store, "shelf"), long_ago());
    let created = store.get(&scene).unwrap();
    assert_eq!(created.created_at, created.updated_at);
}

#[test]
fn test_move_refreshes_old_and_new_parent() {
    let store = dated_folders();
    store
        .move_node(&NodeId::from("act"), Some(&NodeId::from("shelf")))
        .unwrap();

    assert!(updated_at(&store, "part") > long_ago());
    assert!(updated_at(&store, "shelf") > long_ago());
    assert_eq!(updated_at(&store, "book"), long_ago());
    assert_eq!(updated_at(&store, "act"), long_ago());
}

#[test]
fn test_filtered_view_prunes_siblings_at_every_level() {
    let store = DocumentStore::new();
    let book = store.create("Book", NodeKind::Folder, None).unwrap();
    store.create("Book Notes", NodeKind::Document, Some(&book)).unwrap();
    let part = store.create("Part One", NodeKind::Folder, Some(&book)).unwrap();
    store.create("Part Notes", NodeKind::Document, Some(&part)).unwrap();
    let act = store.create("Act I", NodeKind::Folder, Some(&part)).unwrap();
    store.create("Storm", NodeKind::Document, Some(&act)).unwrap();
    let scene = store
        .create("Harbor Scene", NodeKind::Document, Some(&act))
        .unwrap();
    store.create("Loose Pages", NodeKind::Folder, None).unwrap();

    let view = store.filtered_view("HARBOR");
    assert_eq!(store.count_matches("HARBOR"), 1);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, book);
    assert_eq!(view[0].children.len(), 1);
    assert_eq!(view[0].children[0].id, part);
    assert_eq!(view[0].children[0].children.len(), 1);
    let act_view = &view[0].children[0].children[0];
    assert_eq!(act_view.id, act);
    let names: Vec<_> = act_view.children.iter().map(|c| &c.id).collect();
    assert_eq!(names, vec![&scene]);
}

#[test]
fn test_deep_chain_survives_every_read_path() {
    const DEPTH: usize = 5_000;
    let store = DocumentStore::new();
    let mut parent: Option<NodeId> = None;
    for level in 0..DEPTH {
        let id = store
            .create(&format!("Level {}", level), NodeKind::Folder, parent.as_ref())
            .unwrap();
        parent = Some(id);
    }
    let bottom = parent.unwrap();
    store
        .create("Deep Scene", NodeKind::Document, Some(&bottom))
        .unwrap();

    assert_eq!(store.len(), DEPTH + 1);
    assert_eq!(store.find(&bottom).unwrap().children.len(), 1);
    assert_eq!(store.snapshot()[0].depth(), DEPTH + 1);
    assert_eq!(store.filtered_view("deep scene")[0].depth(), DEPTH + 1);
    assert_eq!(store.stats().folder_count, DEPTH as u64);
    assert_eq!(store.records().len(), DEPTH + 1);

    let reloaded = DocumentStore::new();
    reloaded.restore_records(&store.records()).unwrap();
    assert_eq!(reloaded.records(), store.records());
}
