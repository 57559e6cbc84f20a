//! Editor intents
//!
//! What the presentation layer does on top of the store: derive word counts
//! before writing content, keep title and name in sync, append assistant text,
//! and the create-empty-then-fill protocol for new documents. Each function is
//! a short sequence of store calls; none of them holds the store lock across
//! a generation call.

pub mod sample;
pub mod templates;

pub use sample::sample_project;
pub use templates::{create_from_template, find_template, Template, TEMPLATES};

use crate::error::{ApiError, StoreError};
use crate::generation::render::generated_document;
use crate::generation::{prompt_for_document, AssistKind, GenerationRequest, GenerationService};
use crate::store::{DocumentPatch, DocumentStore};
use crate::text::{escape_html, word_count};
use crate::tree::NodeView;
use crate::types::{NodeId, NodeKind};
use tracing::{info, warn};

/// Shown while generation for a new document is in flight.
pub const GENERATING_PLACEHOLDER: &str = "<p><em>Generating content...</em></p>";

/// Replace a document's content and store the derived word count.
pub fn edit_content(store: &DocumentStore, id: &NodeId, content: &str) -> Result<NodeView, StoreError> {
    let patch = DocumentPatch::new()
        .content(content)
        .word_count(word_count(content));
    store.update(id, &patch)
}

/// Set title and display name together.
pub fn retitle(store: &DocumentStore, id: &NodeId, title: &str) -> Result<NodeView, StoreError> {
    store.update(id, &DocumentPatch::new().title(title).name(title))
}

/// Append `text` as a new paragraph at the end of the document.
pub fn insert_paragraph(store: &DocumentStore, id: &NodeId, text: &str) -> Result<NodeView, StoreError> {
    let current = store.get(id)?;
    let existing = current.content().ok_or_else(|| {
        StoreError::InvalidOperation(format!("{} is a folder and has no content", id))
    })?;
    let paragraph = format!("<p>{}</p>", escape_html(text));
    edit_content(store, id, &format!("{}{}", existing, paragraph))
}

/// Starter content for a document created without generation.
pub fn blank_document_content(name: &str) -> String {
    format!("<h1>{}</h1><p>Start writing here...</p>", escape_html(name))
}

/// Create a document with starter content. Returns the new id.
pub fn new_document(
    store: &DocumentStore,
    name: &str,
    parent: Option<&NodeId>,
) -> Result<NodeId, StoreError> {
    let id = store.create(name, NodeKind::Document, parent)?;
    edit_content(store, &id, &blank_document_content(name))?;
    Ok(id)
}

/// Create a document and fill it with generated content.
///
/// The node exists (with placeholder content) before generation starts, so
/// the caller can select it right away. A generation error is written into the
/// document as a note rather than returned; only store errors are returned.
pub async fn compose_document(
    store: &DocumentStore,
    generator: &dyn GenerationService,
    name: &str,
    parent: Option<&NodeId>,
) -> Result<NodeId, ApiError> {
    let id = store.create(name, NodeKind::Document, parent)?;
    store.update(
        &id,
        &DocumentPatch::new()
            .content(GENERATING_PLACEHOLDER)
            .word_count(0),
    )?;

    let request = GenerationRequest::new(AssistKind::Continue, prompt_for_document(name))
        .with_context(format!("Document: {}", name));

    let content = match generator.generate(&request).await {
        Ok(generated) => {
            info!(node_id = %id, "Generated document content");
            generated_document(name, &generated.content)
        }
        Err(e) => {
            warn!(node_id = %id, error = %e, "Generation failed");
            generation_failed_content(name, &e.to_string())
        }
    };
    edit_content(store, &id, &content)?;
    Ok(id)
}

/// Run an assistant request against an existing document and append the result.
pub async fn assist(
    store: &DocumentStore,
    generator: &dyn GenerationService,
    id: &NodeId,
    kind: AssistKind,
    prompt: &str,
) -> Result<NodeView, ApiError> {
    let current = store.get(id)?;
    let mut request = GenerationRequest::new(kind, prompt)
        .with_context(format!("Document: {}", current.name));
    if let Some(content) = current.content().filter(|c| !c.is_empty()) {
        request = request.with_current_content(content);
    }

    let generated = generator.generate(&request).await?;
    if generated.content.trim().is_empty() {
        return Err(ApiError::GenerationFailed("empty response".to_string()));
    }
    Ok(insert_paragraph(store, id, generated.content.trim())?)
}

fn generation_failed_content(name: &str, error: &str) -> String {
    format!(
        "<h1>{}</h1><p><em>Content generation encountered an issue: {}</em></p><p>You can start writing here, or try the assistant again.</p>",
        escape_html(name),
        escape_html(error)
    )
}
