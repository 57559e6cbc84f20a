//! Partial field updates

use crate::error::StoreError;
use crate::tree::Node;
use serde::{Deserialize, Serialize};

/// Field-wise overwrite for `DocumentStore::update`.
///
/// Only fields that are `Some` change; everything else keeps its prior value.
/// `content`, `title`, `notes` and `word_count` exist only on documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
}

impl DocumentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn word_count(mut self, word_count: u64) -> Self {
        self.word_count = Some(word_count);
        self
    }

    /// True if any document-only field is set.
    pub fn touches_document_fields(&self) -> bool {
        self.content.is_some()
            || self.title.is_some()
            || self.notes.is_some()
            || self.word_count.is_some()
    }

    /// Reject patches that cannot apply to `node` without changing anything.
    pub(crate) fn validate_for(&self, node: &Node) -> Result<(), StoreError> {
        if node.is_folder() && self.touches_document_fields() {
            return Err(StoreError::InvalidOperation(format!(
                "Folder {} has no content, title, notes or word count",
                node.id
            )));
        }
        Ok(())
    }

    /// Overwrite the provided fields. Call `validate_for` first.
    pub(crate) fn apply_to(&self, node: &mut Node) {
        if let Some(name) = &self.name {
            node.name = name.clone();
        }
        if let Some(doc) = node.document_body_mut() {
            if let Some(content) = &self.content {
                doc.content = content.clone();
            }
            if let Some(title) = &self.title {
                doc.title = title.clone();
            }
            if let Some(notes) = &self.notes {
                doc.notes = notes.clone();
            }
            if let Some(word_count) = self.word_count {
                doc.word_count = word_count;
            }
        }
    }
}
