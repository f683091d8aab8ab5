//! TMDB search client.

use super::{release_year, MovieCatalog, MovieRecord};
use crate::config::CatalogSettings;
use crate::error::{MoviewhizError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Search response envelope. Elements are decoded one by one so a single odd
/// entry does not sink the whole page.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TmdbMovie {
    id: Option<u64>,
    title: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f64>,
}

/// TMDB-backed movie catalog.
pub struct TmdbCatalog {
    http: reqwest::Client,
    api_key: String,
    search_url: Url,
    movie_url_base: String,
    language: String,
    include_adult: bool,
    max_results: usize,
    retries: u32,
}

impl TmdbCatalog {
    /// Create a catalog client from settings.
    pub fn new(api_key: &str, settings: &CatalogSettings) -> Result<Self> {
        let search_url = Url::parse(&format!(
            "{}/search/movie",
            settings.base_url.trim_end_matches('/')
        ))
        .map_err(|e| {
            MoviewhizError::Config(format!(
                "Invalid catalog base URL '{}': {}",
                settings.base_url, e
            ))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| MoviewhizError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            search_url,
            movie_url_base: settings.movie_url_base.trim_end_matches('/').to_string(),
            language: settings.language.clone(),
            include_adult: settings.include_adult,
            max_results: settings.max_results,
            retries: settings.retries,
        })
    }

    /// Build the request URL for a query.
    fn request_url(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("query", query)
            .append_pair("language", &self.language)
            .append_pair("include_adult", if self.include_adult { "true" } else { "false" })
            .append_pair("page", "1");
        url
    }

    /// Issue the request, retrying transient network failures.
    async fn fetch(&self, query: &str) -> Result<String> {
        let url = self.request_url(query);
        let mut attempt = 0;

        loop {
            match self.http.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        return Err(MoviewhizError::CatalogUnavailable(format!(
                            "search returned HTTP {}",
                            status
                        )));
                    }
                    return response.text().await.map_err(|e| {
                        MoviewhizError::CatalogUnavailable(format!(
                            "failed to read response: {}",
                            e
                        ))
                    });
                }
                // The URL carries the API key, keep it out of messages.
                Err(e) if attempt < self.retries && (e.is_connect() || e.is_timeout()) => {
                    attempt += 1;
                    warn!(
                        "Catalog request failed ({}), retrying ({}/{})",
                        e.without_url(),
                        attempt,
                        self.retries
                    );
                }
                Err(e) => {
                    return Err(MoviewhizError::CatalogUnavailable(format!(
                        "request failed: {}",
                        e.without_url()
                    )));
                }
            }
        }
    }

    /// Parse a search response body into movie records.
    fn parse(&self, body: &str) -> Result<Vec<MovieRecord>> {
        let response: SearchResponse = serde_json::from_str(body).map_err(|e| {
            MoviewhizError::CatalogUnavailable(format!("unexpected response shape: {}", e))
        })?;

        let records = response
            .results
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<TmdbMovie>(value) {
                Ok(movie) => self.to_record(movie),
                Err(e) => {
                    debug!("Skipping malformed catalog entry: {}", e);
                    None
                }
            })
            .take(self.max_results)
            .collect();

        Ok(records)
    }

    fn to_record(&self, movie: TmdbMovie) -> Option<MovieRecord> {
        let id = movie.id?;
        Some(MovieRecord {
            id,
            title: movie.title.unwrap_or_default(),
            overview: movie.overview.unwrap_or_default(),
            release_year: release_year(movie.release_date.as_deref()),
            rating: movie.vote_average.unwrap_or_default(),
            url: format!("{}/{}", self.movie_url_base, id),
        })
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    #[instrument(skip(self), fields(query = %query))]
    async fn search(&self, query: &str) -> Result<Vec<MovieRecord>> {
        let body = self.fetch(query).await?;
        let records = self.parse(&body)?;
        debug!("Catalog returned {} movies", records.len());
        Ok(records)
    }
}
