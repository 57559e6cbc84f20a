//! Read-side projections
//!
//! Aggregate statistics and the name-filtered tree used by the navigator
//! search box. Both are pure functions of a `Forest` and never change it.

use crate::store::Forest;
use crate::tree::{Node, NodeBody, NodeView};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Counts over the whole forest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub document_count: u64,
    pub folder_count: u64,
    pub total_word_count: u64,
}

/// Count every node by kind and sum document word counts, at every depth.
pub fn compute_stats(forest: &Forest) -> DocumentStats {
    forest
        .walk()
        .fold(DocumentStats::default(), |mut stats, node| {
            match &node.body {
                NodeBody::Document(doc) => {
                    stats.document_count += 1;
                    stats.total_word_count += doc.word_count;
                }
                NodeBody::Folder { .. } => stats.folder_count += 1,
            }
            stats
        })
}

/// Forest filtered by case-insensitive name match.
///
/// A node is kept if its own name matches or any descendant is kept; kept
/// folders only carry their kept children. An empty query returns the full
/// forest.
pub fn filter_forest(forest: &Forest, query: &str) -> Vec<NodeView> {
    if query.is_empty() {
        return forest.views();
    }
    let needle = query.to_lowercase();

    // Reverse pre-order visits every child before its parent, so a folder
    // knows which of its children survived when its own turn comes.
    let order: Vec<&Node> = forest.walk().collect();
    let mut kept: HashMap<&NodeId, NodeView> = HashMap::new();
    for node in order.into_iter().rev() {
        let children: Vec<NodeView> = node
            .children()
            .iter()
            .filter_map(|child| kept.remove(child))
            .collect();
        if children.is_empty() && !name_matches(&node.name, &needle) {
            continue;
        }
        let mut view = forest.shallow_view(node);
        view.children = children;
        kept.insert(&node.id, view);
    }
    forest
        .roots()
        .iter()
        .filter_map(|id| kept.remove(id))
        .collect()
}

/// Number of nodes, at any depth, whose own name matches `query`.
pub fn count_matches(forest: &Forest, query: &str) -> usize {
    if query.is_empty() {
        return forest.len();
    }
    let needle = query.to_lowercase();
    forest
        .walk()
        .filter(|node| name_matches(&node.name, &needle))
        .count()
}

fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}
