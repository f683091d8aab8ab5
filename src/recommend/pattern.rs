//! Regex-based recommendation extractor.

use super::{normalize_query, RecommendationExtractor, RecommendationMatch};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Matches "you should/could/might watch/like/enjoy the movie(s) <name>" up to
/// the first `,`, `.` or `?`. Group 1 is the movie name.
static RECOMMENDATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        you \s* (?: should | could | might )
        \s* (?: watch | like | enjoy )
        \s* the \s* movies?
        \s* (.+?) [,.?]
        ",
    )
    .expect("recommendation pattern is valid")
});

/// Extractor driven by a fixed sentence template.
#[derive(Debug, Clone, Default)]
pub struct PatternExtractor {
    deduplicate: bool,
}

impl PatternExtractor {
    /// Create an extractor that reports every match, repeats included.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop matches whose normalized query was already seen in the same answer.
    pub fn with_deduplication(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }
}

impl RecommendationExtractor for PatternExtractor {
    fn extract(&self, answer: &str) -> Vec<RecommendationMatch> {
        let mut seen = HashSet::new();

        RECOMMENDATION_RE
            .captures_iter(answer)
            .filter_map(|caps| {
                let sentence = caps.get(0)?.as_str().to_string();
                let query = caps.get(1)?.as_str().trim().to_string();
                Some(RecommendationMatch { sentence, query })
            })
            .filter(|m| !self.deduplicate || seen.insert(normalize_query(&m.query)))
            .collect()
    }
}
