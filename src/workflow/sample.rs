//! Demo project shown on first launch

use crate::tree::{DocumentBody, NodeView};
use crate::types::{NodeId, NodeKind, Timestamp};
use chrono::{TimeZone, Utc};

fn day(d: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn folder(id: &str, name: &str, created: u32, children: Vec<NodeView>) -> NodeView {
    NodeView {
        id: NodeId::from(id),
        name: name.to_string(),
        kind: NodeKind::Folder,
        parent_id: None,
        document: None,
        children,
        created_at: day(created),
        updated_at: day(created),
    }
}

fn document(
    id: &str,
    name: &str,
    word_count: u64,
    content: &str,
    created: u32,
    updated: u32,
) -> NodeView {
    NodeView {
        id: NodeId::from(id),
        name: name.to_string(),
        kind: NodeKind::Document,
        parent_id: None,
        document: Some(DocumentBody {
            content: content.to_string(),
            title: name.to_string(),
            notes: String::new(),
            word_count,
        }),
        children: Vec::new(),
        created_at: day(created),
        updated_at: day(updated),
    }
}

const CHAPTER_ONE: &str = "<p>The world had changed overnight, though nobody seemed to notice. Sarah walked through the empty streets, her footsteps echoing against the silent buildings.</p><p>She paused at the corner of Fifth and Main. The traffic light cycled through its colors, but there were no cars to obey its commands.</p><p>The singing grew louder.</p>";

const CHARACTERS: &str = "<h1>Main Characters</h1><h2>Sarah Chen</h2><p>Data analyst, 28. Observant, analytical, hums when nervous.</p><h2>Marcus Rivera</h2><p>Emergency room doctor, 34. Calm under pressure.</p><h2>Elena Vasquez</h2><p>Art student, 19. Sees sounds as colors.</p>";

const WORLD: &str = "<h1>Setting: New Harbor City</h1><p>Coastal city of about 500,000 built around a natural harbor.</p><h2>The Phenomenon</h2><p>Started at dawn on a Tuesday in March. Affects all living creatures except humans and seems to emanate from the harbor.</p>";

const OUTLINE: &str = "<h1>Three-Act Structure</h1><h2>Act I: Setup</h2><p>Introduce Sarah and the empty world.</p><h2>Act II: Confrontation</h2><p>Investigate the phenomenon.</p><h2>Act III: Resolution</h2><p>Confront the source.</p>";

/// The sample project: a Draft folder with three chapters, a Research folder
/// with two notes, and a top-level story outline.
pub fn sample_project() -> Vec<NodeView> {
    vec![
        folder(
            "draft",
            "Draft",
            1,
            vec![
                document("chapter-1", "Chapter 1: The Beginning", 1250, CHAPTER_ONE, 2, 15),
                document("chapter-2", "Chapter 2: Discovery", 980, "", 3, 3),
                document("chapter-3", "Chapter 3: Revelation", 0, "", 4, 4),
            ],
        ),
        folder(
            "research",
            "Research",
            1,
            vec![
                document("characters", "Character Profiles", 450, CHARACTERS, 5, 10),
                document("worldbuilding", "World Building Notes", 320, WORLD, 6, 12),
            ],
        ),
        document("outline", "Story Outline", 180, OUTLINE, 7, 8),
    ]
}
