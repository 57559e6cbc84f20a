//! Document Store
//!
//! Owns the forest of documents and folders and is the only way to change it.
//! Every operation takes the forest lock exactly once, so a reader never sees
//! a half-applied create, delete, or move. Nothing here blocks on I/O: callers
//! that generate content do so first and then call `update`.

pub mod forest;
pub mod patch;

pub use forest::{Forest, Walk};
pub use patch::DocumentPatch;

use crate::error::StoreError;
use crate::tree::{IdGenerator, Node, NodeRecord, NodeView};
use crate::types::{NodeId, NodeKind, Timestamp};
use crate::views::{self, DocumentStats};
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

/// Thread-safe document tree
pub struct DocumentStore {
    forest: RwLock<Forest>,
    ids: IdGenerator,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_forest(Forest::new())
    }

    pub fn with_forest(forest: Forest) -> Self {
        Self {
            forest: RwLock::new(forest),
            ids: IdGenerator::new(),
        }
    }

    /// Build a store from nested views, validating ids and tree shape.
    pub fn from_views(views: &[NodeView]) -> Result<Self, StoreError> {
        Ok(Self::with_forest(Forest::from_views(views)?))
    }

    /// Look up a node at any depth.
    pub fn find(&self, id: &NodeId) -> Option<NodeView> {
        self.forest.read().view(id)
    }

    /// Like `find`, but a miss is reported as `StoreError::NotFound`.
    pub fn get(&self, id: &NodeId) -> Result<NodeView, StoreError> {
        self.find(id).ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Owning folder of `id`, derived from the tree shape.
    pub fn parent_of(&self, id: &NodeId) -> Result<Option<NodeId>, StoreError> {
        let forest = self.forest.read();
        if !forest.contains(id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(forest.parent_of(id).cloned())
    }

    /// Overwrite the fields set in `patch` and refresh `updated_at`.
    pub fn update(&self, id: &NodeId, patch: &DocumentPatch) -> Result<NodeView, StoreError> {
        let mut forest = self.forest.write();
        forest.update(id, patch, now())?;
        debug!(node_id = %id, "Updated node");
        forest
            .view(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Create an empty document or folder and return its id.
    ///
    /// With a `parent` the node is appended to that folder's children; without
    /// one it is appended to the top level. A missing parent or a document
    /// parent is rejected and nothing is created.
    pub fn create(
        &self,
        name: &str,
        kind: NodeKind,
        parent: Option<&NodeId>,
    ) -> Result<NodeId, StoreError> {
        let mut forest = self.forest.write();
        forest.check_parent(parent)?;

        let id = self.ids.next_id(kind, |candidate| forest.contains(candidate));
        let now = now();
        let node = match kind {
            NodeKind::Document => Node::document(id.clone(), name.to_string(), now),
            NodeKind::Folder => Node::folder(id.clone(), name.to_string(), now),
        };
        forest.insert(node, parent, now)?;
        info!(node_id = %id, kind = %kind, parent = ?parent.map(NodeId::as_str), "Created node");
        Ok(id)
    }

    /// Remove a node and, for folders, everything beneath it.
    ///
    /// Returns the number of nodes removed.
    pub fn delete(&self, id: &NodeId) -> Result<usize, StoreError> {
        let removed = self.forest.write().remove(id, now())?;
        info!(node_id = %id, removed, "Deleted node");
        Ok(removed)
    }

    /// Move a node (with its subtree) under `new_parent`, or to the top level.
    pub fn move_node(&self, id: &NodeId, new_parent: Option<&NodeId>) -> Result<(), StoreError> {
        let result = self.forest.write().move_node(id, new_parent, now());
        match &result {
            Ok(()) => {
                info!(node_id = %id, new_parent = ?new_parent.map(NodeId::as_str), "Moved node")
            }
            Err(e) => warn!(node_id = %id, error = %e, "Rejected move"),
        }
        result
    }

    /// Forest filtered by case-insensitive name match (see `views::filter_forest`).
    pub fn filtered_view(&self, query: &str) -> Vec<NodeView> {
        views::filter_forest(&self.forest.read(), query)
    }

    /// Number of nodes whose own name matches `query`.
    pub fn count_matches(&self, query: &str) -> usize {
        views::count_matches(&self.forest.read(), query)
    }

    pub fn stats(&self) -> DocumentStats {
        views::compute_stats(&self.forest.read())
    }

    /// The whole forest as owned views
    pub fn snapshot(&self) -> Vec<NodeView> {
        self.forest.read().views()
    }

    /// Replace the forest with one rebuilt from `views`.
    ///
    /// On a validation error the current forest is kept.
    pub fn restore(&self, views: &[NodeView]) -> Result<(), StoreError> {
        let rebuilt = Forest::from_views(views)?;
        *self.forest.write() = rebuilt;
        info!(nodes = views.len(), "Restored forest");
        Ok(())
    }

    /// Flat pre-order export; parents always precede their children.
    pub fn records(&self) -> Vec<NodeRecord> {
        self.forest.read().records()
    }

    /// Replace the forest with one rebuilt from `records`. On error the
    /// current forest is kept.
    pub fn restore_records(&self, records: &[NodeRecord]) -> Result<(), StoreError> {
        let rebuilt = Forest::from_records(records)?;
        *self.forest.write() = rebuilt;
        info!(nodes = records.len(), "Restored forest from records");
        Ok(())
    }

    /// Total number of nodes at every depth.
    pub fn len(&self) -> usize {
        self.forest.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.read().is_empty()
    }

    /// Run `f` against a consistent read-only view of the forest.
    pub fn with_forest_read<R>(&self, f: impl FnOnce(&Forest) -> R) -> R {
        f(&self.forest.read())
    }
}

fn now() -> Timestamp {
    Utc::now()
}
