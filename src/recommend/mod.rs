//! Detection of movie recommendations in assistant answers.
//!
//! Answers are scanned for recommendation sentences; each detected movie name
//! becomes a follow-up catalog query. Detection is a heuristic text filter,
//! so it sits behind [`RecommendationExtractor`] and can be swapped for a
//! stricter grammar or a classifier.

mod pattern;

pub use pattern::PatternExtractor;

use serde::{Deserialize, Serialize};

/// A recommendation detected in an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationMatch {
    /// The full matched phrase, including the terminating punctuation.
    pub sentence: String,
    /// The movie name, trimmed, used verbatim as the next search query.
    pub query: String,
}

/// Trait for recommendation extractors.
pub trait RecommendationExtractor: Send + Sync {
    /// Extract recommendations in the order they appear in the text.
    fn extract(&self, answer: &str) -> Vec<RecommendationMatch>;
}

/// Normalize a query for duplicate detection: trimmed, lowercased, single-spaced.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
