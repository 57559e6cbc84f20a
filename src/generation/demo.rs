//! Offline generator with canned responses, used when no provider is configured.

use super::{AssistKind, Generated, GenerationRequest, GenerationService};
use crate::error::ApiError;
use async_trait::async_trait;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoGenerator;

impl DemoGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn response_for(kind: AssistKind) -> &'static str {
        match kind {
            AssistKind::Continue => "The mysterious figure stepped out of the shadows, their face obscured by the dim streetlight. Sarah's heart raced as she recognized the familiar silhouette. It was someone she thought she'd never see again. The singing grew louder, more insistent, as if responding to this unexpected reunion.\n\n\"I've been looking for you,\" the figure said, their voice barely audible above the ethereal melody that seemed to emanate from the very air around them.",
            AssistKind::Improve => "Here's an improved version of your text with enhanced flow and clarity:\n\n[Your original text would be rewritten here with better structure, more vivid descriptions, and improved pacing. The assistant would maintain your voice while making the prose more engaging and polished.]",
            AssistKind::Brainstorm => "Here are some creative directions for your story:\n\n- The singing could be a form of communication from another dimension\n- Sarah might discover she has a unique ability to understand the phenomenon\n- The empty city could be a test or simulation\n- Other survivors might have different reactions to the singing\n- The phenomenon could be connected to Sarah's past or family history",
            AssistKind::Summarize => "Summary: Sarah discovers her city has been mysteriously emptied of all life except humans. A strange, beautiful singing fills the air, and she encounters other survivors while trying to understand what has happened. The phenomenon appears to be centered around the harbor area and affects all living creatures except people.",
            AssistKind::Outline => "Story Outline:\n\nAct I - Discovery\n- Sarah notices the empty city\n- Introduction of the singing phenomenon\n- Meeting other survivors\n\nAct II - Investigation\n- Exploring the source of the phenomenon\n- Character development and relationships\n- Uncovering clues about the cause\n\nAct III - Resolution\n- Confronting the source\n- Character growth and change\n- New world order established",
            AssistKind::Character => "Character Development:\n\nSarah Chen - Protagonist\n- Analytical mind helps her notice patterns others miss\n- Humming habit connects her to the phenomenon\n- Internal conflict between logic and intuition\n- Character arc: Learning to trust her instincts\n\nSupporting Characters:\n- The Scientist - Provides logical explanations\n- The Artist - Sees beauty in the chaos\n- The Child - Represents hope and innocence",
            AssistKind::Dialogue => "\"Do you hear it too?\" Sarah asked, her voice barely above a whisper.\n\nMarcus nodded slowly, his medical training warring with what his senses told him. \"It's impossible, but yes. It's like... like the city itself is singing.\"\n\n\"Not the city,\" Elena interjected, her artist's eye catching something the others missed. \"Look at the light. It's moving with the music. Whatever's doing this, it's alive.\"",
        }
    }
}

#[async_trait]
impl GenerationService for DemoGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generated, ApiError> {
        debug!(kind = %request.kind, "Serving canned demo response");
        Ok(Generated::for_kind(
            request.kind,
            Self::response_for(request.kind),
        ))
    }
}
