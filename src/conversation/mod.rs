//! Conversation sessions.
//!
//! A session owns its transcript and turns each question into an answer plus
//! the movie cards for anything the answer recommends.

mod orchestrator;
mod transcript;

pub use orchestrator::ConversationOrchestrator;
pub use transcript::{ChatTurn, Role, Transcript};

use crate::catalog::MovieRecord;
use crate::recommend::RecommendationMatch;
use serde::Serialize;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No turns yet.
    Empty,
    /// At least one exchange recorded.
    Active,
}

/// The result of one question, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedTurn {
    /// The human turn followed by the assistant turn.
    pub turns: Vec<ChatTurn>,
    /// Recommendations detected in the answer.
    pub recommendations: Vec<RecommendationMatch>,
    /// Movie cards, in recommendation order then catalog order.
    pub movies: Vec<MovieRecord>,
}

impl RenderedTurn {
    /// The assistant's answer text.
    pub fn answer(&self) -> &str {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role() == Role::Assistant)
            .map(ChatTurn::content)
            .unwrap_or_default()
    }
}
