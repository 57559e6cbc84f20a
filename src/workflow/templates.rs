//! Project template catalog

use crate::error::ApiError;
use crate::store::DocumentStore;
use crate::types::{NodeId, NodeKind};
use serde::Serialize;

/// A starting point for a new document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub assistant_features: &'static [&'static str],
    /// Name given to the created document
    pub document_name: &'static str,
    pub starter_content: &'static str,
}

const GENERIC_CONTENT: &str = "<h1>New Document</h1><p>Start writing here...</p><p><em>The assistant is ready to help with your writing.</em></p>";

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "novel",
        name: "Novel",
        category: "Fiction",
        description: "Full-length fiction with chapter structure",
        assistant_features: &["Character development", "Plot assistance", "Dialogue enhancement"],
        document_name: "New Novel",
        starter_content: "<h1>Chapter 1</h1><p>The story begins here...</p><p><em>Use the assistant to help develop your characters, plot, and dialogue.</em></p>",
    },
    Template {
        id: "screenplay",
        name: "Screenplay",
        category: "Scripts",
        description: "Film and TV script formatting",
        assistant_features: &["Scene structure", "Character arcs", "Dialogue polish"],
        document_name: "New Screenplay",
        starter_content: "<p><strong>FADE IN:</strong></p><p><strong>EXT. LOCATION - DAY</strong></p><p>Scene description goes here.</p><p><strong>CHARACTER</strong><br>Dialogue goes here.</p><p><em>The assistant can help format your screenplay and develop scenes.</em></p>",
    },
    Template {
        id: "business-plan",
        name: "Business Plan",
        category: "Business",
        description: "Comprehensive business strategy document",
        assistant_features: &["Market analysis", "Financial projections", "Executive summary"],
        document_name: "Business Plan",
        starter_content: "<h1>Executive Summary</h1><h2>Company Overview</h2><h2>Market Analysis</h2><h2>Financial Projections</h2><p><em>Assistance available for market research and financial modeling.</em></p>",
    },
    Template {
        id: "thesis",
        name: "Academic Thesis",
        category: "Academic",
        description: "Research paper with citations",
        assistant_features: &["Literature review", "Citation management", "Methodology"],
        document_name: "New Document",
        starter_content: GENERIC_CONTENT,
    },
    Template {
        id: "memoir",
        name: "Memoir",
        category: "Non-fiction",
        description: "Personal life story narrative",
        assistant_features: &["Story structure", "Emotional depth", "Timeline organization"],
        document_name: "New Document",
        starter_content: GENERIC_CONTENT,
    },
    Template {
        id: "technical-manual",
        name: "Technical Manual",
        category: "Technical",
        description: "Step-by-step instructional guide",
        assistant_features: &["Process optimization", "Clarity enhancement", "User-friendly language"],
        document_name: "New Document",
        starter_content: GENERIC_CONTENT,
    },
];

pub fn find_template(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Create a top-level document from a template: create it empty, then fill it.
pub fn create_from_template(store: &DocumentStore, template_id: &str) -> Result<NodeId, ApiError> {
    let template =
        find_template(template_id).ok_or_else(|| ApiError::UnknownTemplate(template_id.to_string()))?;
    let id = store.create(template.document_name, NodeKind::Document, None)?;
    super::edit_content(store, &id, template.starter_content)?;
    Ok(id)
}
