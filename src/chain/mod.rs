//! Question answering over the movie index.
//!
//! The conversation pipeline only sees [`QaChain`]. The concrete
//! [`RetrievalChain`] condenses follow-ups, retrieves similar movies and asks a
//! chat model, but any implementation can be plugged in.

pub mod context;
mod openai;
mod retrieval;

pub use context::Retriever;
pub use openai::OpenAIChatModel;
pub use retrieval::RetrievalChain;

use crate::conversation::Transcript;
use crate::error::Result;
use async_trait::async_trait;

/// Produces an answer from a question and the conversation so far.
#[async_trait]
pub trait QaChain: Send + Sync {
    async fn answer(&self, question: &str, transcript: &Transcript) -> Result<String>;
}

/// Author of a chat model message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message sent to a chat model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Trait for chat completion backends.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete a conversation and return the reply text.
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String>;
}
