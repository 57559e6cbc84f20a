//! Text generation seam
//!
//! The studio asks an external service for generated text and then stores the
//! result with an ordinary `update`. The store never sees prompts or
//! transports. This module defines the request shape, the assistant modes with
//! their system prompts, and the `GenerationService` trait. No network client
//! lives here; `DemoGenerator` serves canned offline responses.

pub mod demo;
pub mod prompt;
pub mod render;

pub use demo::DemoGenerator;
pub use prompt::prompt_for_document;
pub use render::render_generated;

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Assistant mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistKind {
    Continue,
    Improve,
    Summarize,
    Brainstorm,
    Outline,
    Character,
    Dialogue,
}

impl AssistKind {
    pub const ALL: [AssistKind; 7] = [
        AssistKind::Continue,
        AssistKind::Improve,
        AssistKind::Summarize,
        AssistKind::Brainstorm,
        AssistKind::Outline,
        AssistKind::Character,
        AssistKind::Dialogue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssistKind::Continue => "continue",
            AssistKind::Improve => "improve",
            AssistKind::Summarize => "summarize",
            AssistKind::Brainstorm => "brainstorm",
            AssistKind::Outline => "outline",
            AssistKind::Character => "character",
            AssistKind::Dialogue => "dialogue",
        }
    }

    /// System prompt sent alongside the user message.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            AssistKind::Continue => "You are a creative writing assistant. Continue the story naturally, maintaining the same tone, style, and narrative voice. Keep the continuation engaging and coherent with what came before.",
            AssistKind::Improve => "You are an expert editor. Improve the given text by enhancing clarity, flow, grammar, and style while maintaining the author's voice and intent.",
            AssistKind::Summarize => "You are a skilled summarizer. Create a concise summary that captures the key points and main ideas of the given text.",
            AssistKind::Brainstorm => "You are a creative brainstorming partner. Generate creative ideas, plot points, character developments, or story directions based on the given context.",
            AssistKind::Outline => "You are a story structure expert. Create a detailed outline that organizes the content logically and helps develop the narrative structure.",
            AssistKind::Character => "You are a character development specialist. Create detailed, believable characters with depth, motivations, and unique traits.",
            AssistKind::Dialogue => "You are a dialogue expert. Write natural, engaging dialogue that reveals character and advances the story.",
        }
    }

    /// Follow-up ideas shown next to a response. Empty for most modes.
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            AssistKind::Continue => &[
                "Add more dialogue to reveal character",
                "Introduce a plot twist",
                "Describe the setting in more detail",
                "Show character emotions through actions",
            ],
            AssistKind::Improve => &[
                "Vary sentence structure",
                "Use more specific vocabulary",
                "Add sensory details",
                "Strengthen transitions between ideas",
            ],
            AssistKind::Brainstorm => &[
                "Explore character backstories",
                "Consider alternative plot directions",
                "Add conflict or tension",
                "Develop subplots",
            ],
            _ => &[],
        }
    }
}

impl fmt::Display for AssistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssistKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.to_ascii_lowercase())
            .ok_or_else(|| {
                ApiError::ConfigError(format!(
                    "Invalid assist kind: {}. Must be one of continue, improve, summarize, brainstorm, outline, character, dialogue",
                    s
                ))
            })
    }
}

/// One generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub kind: AssistKind,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_content: Option<String>,
}

impl GenerationRequest {
    pub fn new(kind: AssistKind, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            context: None,
            current_content: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_current_content(mut self, content: impl Into<String>) -> Self {
        self.current_content = Some(content.into());
        self
    }

    /// User message: optional context, the prompt, then optional current content.
    pub fn user_message(&self) -> String {
        let mut message = String::new();
        if let Some(context) = &self.context {
            message.push_str(&format!("Context: {}\n\n", context));
        }
        message.push_str(&self.prompt);
        if let Some(current) = &self.current_content {
            message.push_str(&format!("\n\nCurrent content: {}", current));
        }
        message
    }
}

/// Generated text plus follow-up suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generated {
    pub content: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Generated {
    pub fn for_kind(kind: AssistKind, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            suggestions: kind.suggestions().iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// External text generator
///
/// Implementations must not assume anything about the document store; the
/// caller stores the result once the call returns.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generated, ApiError>;
}
