//! Chat turns and the per-session transcript.

use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Human => write!(f, "Human"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

/// One side of an exchange. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    role: Role,
    content: String,
}

impl ChatTurn {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered log of turns for one session.
///
/// Turns are only ever appended as a human/assistant pair, so the log always
/// alternates and starts with a human turn.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed exchange and return the two new turns.
    pub fn push_exchange(&mut self, question: &str, answer: &str) -> &[ChatTurn] {
        self.turns.push(ChatTurn::human(question));
        self.turns.push(ChatTurn::assistant(answer));
        &self.turns[self.turns.len() - 2..]
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Render as "Human: ...\nAssistant: ..." lines for prompt templates.
    pub fn format_history(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_exchange_alternates() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        let added = transcript.push_exchange("Any comedies?", "Try Airplane!");
        assert_eq!(added.len(), 2);
        assert_eq!(added[0], ChatTurn::human("Any comedies?"));
        assert_eq!(added[1], ChatTurn::assistant("Try Airplane!"));

        transcript.push_exchange("Something newer?", "Game Night.");
        let roles: Vec<Role> = transcript.turns().iter().map(ChatTurn::role).collect();
        assert_eq!(
            roles,
            vec![Role::Human, Role::Assistant, Role::Human, Role::Assistant]
        );
    }

    #[test]
    fn test_format_history() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("Hi", "Hello!");
        assert_eq!(transcript.format_history(), "Human: Hi\nAssistant: Hello!");
    }

    #[test]
    fn test_clear() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("Hi", "Hello!");
        transcript.clear();
        assert_eq!(transcript.len(), 0);
    }

    #[test]
    fn test_turn_serializes_lowercase_role() {
        let json = serde_json::to_value(ChatTurn::human("Hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "human", "content": "Hi" }));
    }
}
