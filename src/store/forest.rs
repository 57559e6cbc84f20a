//! Arena-backed forest
//!
//! Nodes live in a flat map keyed by id. Folders keep an ordered list of child
//! ids, the top level is an ordered list of root ids, and a parent index maps
//! every non-root node to its folder. The children lists are authoritative;
//! the parent index is kept in lockstep with them and is what `parent_id` in a
//! view is derived from.
//!
//! `Forest` is not synchronized. `DocumentStore` wraps it in a lock.

use crate::error::StoreError;
use crate::store::patch::DocumentPatch;
use crate::tree::{Node, NodeBody, NodeRecord, NodeView};
use crate::types::{NodeId, NodeKind, Timestamp};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
    parents: HashMap<NodeId, NodeId>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes at every depth.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn parent_of(&self, id: &NodeId) -> Option<&NodeId> {
        self.parents.get(id)
    }

    /// Depth-first, pre-order walk over every reachable node.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            forest: self,
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Pre-order walk of the subtree rooted at `id`; empty if `id` is unknown.
    pub fn walk_from(&self, id: &NodeId) -> Walk<'_> {
        Walk {
            forest: self,
            stack: self.nodes.get_key_value(id).map(|(key, _)| key).into_iter().collect(),
        }
    }

    /// True if `ancestor` is `id` itself or lies on the path from `id` to its root.
    pub fn is_ancestor_or_self(&self, ancestor: &NodeId, id: &NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.parents.get(node_id);
        }
        false
    }

    /// Node and its subtree as an owned view.
    ///
    /// Built bottom-up from a pre-order walk, so nesting depth costs heap, not
    /// stack.
    pub fn view(&self, id: &NodeId) -> Option<NodeView> {
        let subtree: Vec<&Node> = self.walk_from(id).collect();
        let mut built: HashMap<&NodeId, NodeView> = HashMap::with_capacity(subtree.len());
        for node in subtree.into_iter().rev() {
            let mut view = self.shallow_view(node);
            view.children = node
                .children()
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(&node.id, view);
        }
        built.remove(id)
    }

    /// The whole forest as owned views, in display order.
    pub fn views(&self) -> Vec<NodeView> {
        self.roots.iter().filter_map(|id| self.view(id)).collect()
    }

    /// View of a single node with no children filled in.
    pub(crate) fn shallow_view(&self, node: &Node) -> NodeView {
        NodeView {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind(),
            parent_id: self.parents.get(&node.id).cloned(),
            document: node.document_body().cloned(),
            children: Vec::new(),
            created_at: node.created_at,
            updated_at: node.updated_at,
        }
    }

    /// Every node as a flat record, parents before children, siblings in order.
    pub fn records(&self) -> Vec<NodeRecord> {
        self.walk()
            .map(|node| NodeRecord {
                id: node.id.clone(),
                name: node.name.clone(),
                kind: node.kind(),
                parent_id: self.parents.get(&node.id).cloned(),
                document: node.document_body().cloned(),
                created_at: node.created_at,
                updated_at: node.updated_at,
            })
            .collect()
    }

    /// Check that `parent`, if given, exists and is a folder.
    pub fn check_parent(&self, parent: Option<&NodeId>) -> Result<(), StoreError> {
        let Some(parent_id) = parent else {
            return Ok(());
        };
        let parent = self
            .nodes
            .get(parent_id)
            .ok_or_else(|| StoreError::NotFound(parent_id.clone()))?;
        if !parent.is_folder() {
            return Err(StoreError::InvalidOperation(format!(
                "{} is a document and cannot contain other nodes",
                parent_id
            )));
        }
        Ok(())
    }

    /// Append a new node under `parent`, or at the top level.
    ///
    /// The parent folder's `updated_at` is refreshed.
    pub fn insert(
        &mut self,
        node: Node,
        parent: Option<&NodeId>,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        if self.nodes.contains_key(&node.id) {
            return Err(StoreError::InvalidOperation(format!(
                "Duplicate node id: {}",
                node.id
            )));
        }
        if !node.children().is_empty() {
            return Err(StoreError::InvalidOperation(format!(
                "New node {} must not reference existing children",
                node.id
            )));
        }
        self.check_parent(parent)?;
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        self.attach(id, parent, now);
        Ok(())
    }

    /// Apply `patch` to the node and refresh its `updated_at`.
    pub fn update(
        &mut self,
        id: &NodeId,
        patch: &DocumentPatch,
        now: Timestamp,
    ) -> Result<&Node, StoreError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        patch.validate_for(node)?;
        patch.apply_to(node);
        node.touch(now);
        Ok(node)
    }

    /// Remove the node and its whole subtree. Returns how many nodes went away.
    pub fn remove(&mut self, id: &NodeId, now: Timestamp) -> Result<usize, StoreError> {
        if !self.nodes.contains_key(id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        self.detach(id, now);

        let mut removed = 0;
        let mut stack = vec![id.clone()];
        while let Some(next) = stack.pop() {
            self.parents.remove(&next);
            if let Some(node) = self.nodes.remove(&next) {
                removed += 1;
                if let NodeBody::Folder { children } = node.body {
                    stack.extend(children);
                }
            }
        }
        Ok(removed)
    }

    /// Re-parent `id` under `new_parent` (or the top level), keeping its subtree.
    ///
    /// All checks run before anything changes: a missing node or target, a
    /// document target, and a target inside the moved subtree are rejected.
    pub fn move_node(
        &mut self,
        id: &NodeId,
        new_parent: Option<&NodeId>,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        if !self.nodes.contains_key(id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        self.check_parent(new_parent)?;
        if let Some(target) = new_parent {
            if self.is_ancestor_or_self(id, target) {
                return Err(StoreError::InvalidOperation(format!(
                    "Cannot move {} into itself or one of its descendants ({})",
                    id, target
                )));
            }
        }
        self.detach(id, now);
        self.attach(id.clone(), new_parent, now);
        Ok(())
    }

    /// Rebuild a forest from views, keeping their ids and timestamps.
    ///
    /// `parent_id` on the views is ignored; nesting decides the shape.
    pub fn from_views(views: &[NodeView]) -> Result<Self, StoreError> {
        let mut records = Vec::new();
        let mut stack: Vec<(&NodeView, Option<&NodeId>)> =
            views.iter().rev().map(|view| (view, None)).collect();
        while let Some((view, parent)) = stack.pop() {
            if view.kind == NodeKind::Document && !view.children.is_empty() {
                return Err(StoreError::InvalidOperation(format!(
                    "Document {} cannot have children",
                    view.id
                )));
            }
            records.push(NodeRecord {
                id: view.id.clone(),
                name: view.name.clone(),
                kind: view.kind,
                parent_id: parent.cloned(),
                document: view.document.clone(),
                created_at: view.created_at,
                updated_at: view.updated_at,
            });
            stack.extend(view.children.iter().rev().map(|child| (child, Some(&view.id))));
        }
        Self::from_records(&records)
    }

    /// Rebuild a forest from flat records in pre-order.
    ///
    /// A record's parent must appear before it and must be a folder.
    pub fn from_records(records: &[NodeRecord]) -> Result<Self, StoreError> {
        let mut forest = Forest::new();
        for record in records {
            forest.restore_record(record)?;
        }
        Ok(forest)
    }

    fn restore_record(&mut self, record: &NodeRecord) -> Result<(), StoreError> {
        if self.nodes.contains_key(&record.id) {
            return Err(StoreError::InvalidOperation(format!(
                "Duplicate node id: {}",
                record.id
            )));
        }
        if record.updated_at < record.created_at {
            return Err(StoreError::InvalidOperation(format!(
                "{} was updated before it was created",
                record.id
            )));
        }
        if let Some(parent_id) = &record.parent_id {
            match self.nodes.get(parent_id) {
                None => {
                    return Err(StoreError::InvalidOperation(format!(
                        "{} names parent {} which does not precede it",
                        record.id, parent_id
                    )))
                }
                Some(parent) if !parent.is_folder() => {
                    return Err(StoreError::InvalidOperation(format!(
                        "Document {} cannot have children",
                        parent_id
                    )))
                }
                Some(_) => {}
            }
        }
        let body = match record.kind {
            NodeKind::Document => NodeBody::Document(record.document.clone().unwrap_or_default()),
            NodeKind::Folder => {
                if record.document.is_some() {
                    return Err(StoreError::InvalidOperation(format!(
                        "Folder {} cannot carry document fields",
                        record.id
                    )));
                }
                NodeBody::Folder {
                    children: Vec::new(),
                }
            }
        };
        self.nodes.insert(
            record.id.clone(),
            Node {
                id: record.id.clone(),
                name: record.name.clone(),
                body,
                created_at: record.created_at,
                updated_at: record.updated_at,
            },
        );
        self.link(record.id.clone(), record.parent_id.as_ref());
        Ok(())
    }

    /// Link `id` under `parent` and refresh the parent. Parent must be a folder.
    fn attach(&mut self, id: NodeId, parent: Option<&NodeId>, now: Timestamp) {
        if let Some(parent_id) = parent {
            if let Some(folder) = self.nodes.get_mut(parent_id) {
                folder.touch(now);
            }
        }
        self.link(id, parent);
    }

    fn link(&mut self, id: NodeId, parent: Option<&NodeId>) {
        match parent {
            Some(parent_id) => {
                if let Some(children) = self
                    .nodes
                    .get_mut(parent_id)
                    .and_then(|folder| folder.children_mut())
                {
                    children.push(id.clone());
                }
                self.parents.insert(id, parent_id.clone());
            }
            None => self.roots.push(id),
        }
    }

    /// Unlink `id` from its folder (refreshing it) or from the top level.
    fn detach(&mut self, id: &NodeId, now: Timestamp) {
        match self.parents.remove(id) {
            Some(parent_id) => {
                if let Some(folder) = self.nodes.get_mut(&parent_id) {
                    if let Some(children) = folder.children_mut() {
                        children.retain(|child| child != id);
                    }
                    folder.touch(now);
                }
            }
            None => self.roots.retain(|root| root != id),
        }
    }
}

/// Pre-order iterator returned by `Forest::walk`.
pub struct Walk<'a> {
    forest: &'a Forest,
    stack: Vec<&'a NodeId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.forest.nodes.get(id) {
                self.stack.extend(node.children().iter().rev());
                return Some(node);
            }
        }
        None
    }
}
