//! Embedding generation for movie descriptions and questions.
//!
//! The index embeds each movie's `index_text()` once at startup; the
//! retriever embeds the condensed question on every turn. Both sides must
//! come from the same embedder so their vectors are comparable.

mod openai;

pub use openai::OpenAIEmbedder;

use crate::error::Result;
use async_trait::async_trait;

/// Turns movie texts and user questions into vectors for the index.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one condensed question for retrieval.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a page of movie texts, returning one vector per text in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Vector length. Vectors of a different length score zero against the index.
    fn dimensions(&self) -> usize;
}
