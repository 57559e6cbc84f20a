//! Document and folder node types

use crate::types::{NodeId, NodeKind, Timestamp};
use serde::{Deserialize, Serialize};

/// Document-only fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBody {
    /// Rich-text payload, opaque to the store
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
    /// Written back by the editor; the store never derives it from `content`
    #[serde(default)]
    pub word_count: u64,
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    Document(DocumentBody),
    /// Child ids in display order
    Folder { children: Vec<NodeId> },
}

/// Arena record for a single document or folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub body: NodeBody,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Node {
    /// New document; the title starts out equal to the name.
    pub fn document(id: NodeId, name: String, now: Timestamp) -> Self {
        let body = DocumentBody {
            title: name.clone(),
            ..DocumentBody::default()
        };
        Self {
            id,
            name,
            body: NodeBody::Document(body),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn folder(id: NodeId, name: String, now: Timestamp) -> Self {
        Self {
            id,
            name,
            body: NodeBody::Folder {
                children: Vec::new(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::Document(_) => NodeKind::Document,
            NodeBody::Folder { .. } => NodeKind::Folder,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == NodeKind::Folder
    }

    /// Child ids; empty for documents.
    pub fn children(&self) -> &[NodeId] {
        match &self.body {
            NodeBody::Folder { children } => children,
            NodeBody::Document(_) => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.body {
            NodeBody::Folder { children } => Some(children),
            NodeBody::Document(_) => None,
        }
    }

    pub fn document_body(&self) -> Option<&DocumentBody> {
        match &self.body {
            NodeBody::Document(doc) => Some(doc),
            NodeBody::Folder { .. } => None,
        }
    }

    pub(crate) fn document_body_mut(&mut self) -> Option<&mut DocumentBody> {
        match &mut self.body {
            NodeBody::Document(doc) => Some(doc),
            NodeBody::Folder { .. } => None,
        }
    }

    /// Refresh `updated_at`, never moving it backwards.
    pub(crate) fn touch(&mut self, now: Timestamp) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

/// Owned, nested read view of a node and its subtree.
///
/// This is what callers get back from the store: a copy, detached from the
/// arena. `parent_id` is derived from the tree shape at the time the view was
/// taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentBody>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeView>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NodeView {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn content(&self) -> Option<&str> {
        self.document.as_ref().map(|d| d.content.as_str())
    }

    pub fn word_count(&self) -> u64 {
        self.document.as_ref().map(|d| d.word_count).unwrap_or(0)
    }

    /// Depth-first search of this view's subtree, including itself.
    pub fn find(&self, id: &NodeId) -> Option<&NodeView> {
        let mut stack = vec![self];
        while let Some(view) = stack.pop() {
            if &view.id == id {
                return Some(view);
            }
            stack.extend(view.children.iter().rev());
        }
        None
    }

    /// Number of levels in this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((view, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(view.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Ids of this node and every descendant, in depth-first order.
    pub fn subtree_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(view) = stack.pop() {
            ids.push(view.id.clone());
            for child in view.children.iter().rev() {
                stack.push(child);
            }
        }
        ids
    }
}

// Nested views can be arbitrarily deep; unlink children onto a heap stack so
// dropping one never recurses per level.
impl Drop for NodeView {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// Flat, position-ordered record of one node, used for export and load.
///
/// A forest is written as its records in pre-order, so every parent comes
/// before its children and sibling order is the order of appearance. No
/// nesting means the encoded size of a level never grows with depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentBody>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
