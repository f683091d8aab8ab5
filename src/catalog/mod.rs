//! Movie catalog abstraction.
//!
//! Wraps the external movie search API behind a trait so the conversation
//! pipeline can be exercised without network access.

mod tmdb;

pub use tmdb::TmdbCatalog;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A movie as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Catalog ID.
    pub id: u64,
    /// Movie title.
    pub title: String,
    /// Plot overview (empty if the catalog has none).
    pub overview: String,
    /// Release year, taken from the first four characters of the release date.
    pub release_year: Option<String>,
    /// Average vote on a 0-10 scale.
    pub rating: f64,
    /// Link to the movie page.
    pub url: String,
}

impl MovieRecord {
    /// Title with the release year appended when known, e.g. "Inception (2010)".
    pub fn display_title(&self) -> String {
        match &self.release_year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }

    /// Rating formatted for display with one decimal, e.g. "8.4/10" or "7.0/10".
    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.rating)
    }

    /// Text used to embed this movie into the vector index.
    pub fn index_text(&self) -> String {
        format!("{} - {}", self.title, self.overview)
    }
}

/// Derive the display year from a catalog date string such as "2010-07-16".
pub fn release_year(date: Option<&str>) -> Option<String> {
    let year: String = date?.trim().chars().take(4).collect();
    if year.is_empty() {
        None
    } else {
        Some(year)
    }
}

/// Trait for movie catalog implementations.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search the catalog with free text. Any text is forwarded as-is.
    async fn search(&self, query: &str) -> Result<Vec<MovieRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: Option<&str>) -> MovieRecord {
        MovieRecord {
            id: 27205,
            title: "Inception".to_string(),
            overview: "A thief who steals corporate secrets.".to_string(),
            release_year: year.map(str::to_string),
            rating: 8.4,
            url: "https://www.themoviedb.org/movie/27205".to_string(),
        }
    }

    #[test]
    fn test_release_year() {
        assert_eq!(release_year(Some("2010-07-16")), Some("2010".to_string()));
        assert_eq!(release_year(Some("1999")), Some("1999".to_string()));
        assert_eq!(release_year(Some("")), None);
        assert_eq!(release_year(None), None);
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(record(Some("2010")).display_title(), "Inception (2010)");
        assert_eq!(record(None).display_title(), "Inception");
        assert_eq!(record(None).rating_label(), "8.4/10");
        assert_eq!(
            record(None).index_text(),
            "Inception - A thief who steals corporate secrets."
        );
    }

    #[test]
    fn test_rating_label_keeps_one_decimal() {
        let mut movie = record(None);
        movie.rating = 7.0;
        assert_eq!(movie.rating_label(), "7.0/10");
        movie.rating = 0.0;
        assert_eq!(movie.rating_label(), "0.0/10");
        movie.rating = 8.369;
        assert_eq!(movie.rating_label(), "8.4/10");
    }
}
