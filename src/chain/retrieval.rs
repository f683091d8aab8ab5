//! Conversational retrieval chain.

use super::context::format_context_for_prompt;
use super::{ChatMessage, ChatModel, QaChain, Retriever};
use crate::config::Prompts;
use crate::conversation::Transcript;
use crate::error::{MoviewhizError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Answers questions from retrieved movie descriptions.
///
/// Follow-ups are first rewritten into a standalone question using the
/// transcript, so retrieval works on "what about something older?" too.
pub struct RetrievalChain {
    model: Arc<dyn ChatModel>,
    retriever: Retriever,
    prompts: Prompts,
    temperature: f32,
    condense_question: bool,
}

impl RetrievalChain {
    /// Create a new chain with default prompts.
    pub fn new(model: Arc<dyn ChatModel>, retriever: Retriever) -> Self {
        Self {
            model,
            retriever,
            prompts: Prompts::default(),
            temperature: 0.7,
            condense_question: true,
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the answer sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Enable or disable rewriting follow-ups into standalone questions.
    pub fn with_condense_question(mut self, condense_question: bool) -> Self {
        self.condense_question = condense_question;
        self
    }

    /// Rewrite a follow-up into a standalone question.
    async fn standalone_question(&self, question: &str, transcript: &Transcript) -> Result<String> {
        if !self.condense_question || transcript.is_empty() {
            return Ok(question.to_string());
        }

        let mut vars = HashMap::new();
        vars.insert("chat_history".to_string(), transcript.format_history());
        vars.insert("question".to_string(), question.to_string());
        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.chain.condense, &vars);

        let condensed = self.model.complete(&[ChatMessage::user(prompt)], 0.0).await?;
        let condensed = condensed.trim();

        if condensed.is_empty() {
            Ok(question.to_string())
        } else {
            debug!("Condensed question: {}", condensed);
            Ok(condensed.to_string())
        }
    }

    async fn run(&self, question: &str, transcript: &Transcript) -> Result<String> {
        let standalone = self.standalone_question(question, transcript).await?;

        let results = self.retriever.retrieve(&standalone).await?;

        let mut vars = HashMap::new();
        vars.insert("context".to_string(), format_context_for_prompt(&results));
        vars.insert("question".to_string(), standalone);

        let messages = [
            ChatMessage::system(
                self.prompts
                    .render_with_custom(&self.prompts.chain.system, &vars),
            ),
            ChatMessage::user(self.prompts.render_with_custom(&self.prompts.chain.user, &vars)),
        ];

        let answer = self.model.complete(&messages, self.temperature).await?;
        if answer.trim().is_empty() {
            return Err(MoviewhizError::ChainUnavailable(
                "Empty response from LLM".to_string(),
            ));
        }

        debug!("Answered with {} movies in context", results.len());
        Ok(answer)
    }
}

#[async_trait]
impl QaChain for RetrievalChain {
    #[instrument(skip(self, transcript), fields(question = %question, turns = transcript.len()))]
    async fn answer(&self, question: &str, transcript: &Transcript) -> Result<String> {
        info!("Answering question");
        self.run(question, transcript)
            .await
            .map_err(MoviewhizError::into_chain_error)
    }
}
