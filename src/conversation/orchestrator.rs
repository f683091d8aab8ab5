//! Per-session conversation driver.

use super::{RenderedTurn, SessionState, Transcript};
use crate::catalog::{MovieCatalog, MovieRecord};
use crate::chain::QaChain;
use crate::error::{MoviewhizError, Result};
use crate::recommend::{RecommendationExtractor, RecommendationMatch};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Drives one chat session: answer, record, extract, look up.
///
/// `ask` takes `&mut self`, so a session is never driven by two questions at
/// once. Callers sharing a session across tasks wrap it in a mutex.
pub struct ConversationOrchestrator {
    chain: Arc<dyn QaChain>,
    extractor: Arc<dyn RecommendationExtractor>,
    catalog: Arc<dyn MovieCatalog>,
    transcript: Transcript,
    recommendations_enabled: bool,
    concurrent_lookups: bool,
}

impl ConversationOrchestrator {
    /// Create an empty session.
    pub fn new(
        chain: Arc<dyn QaChain>,
        extractor: Arc<dyn RecommendationExtractor>,
        catalog: Arc<dyn MovieCatalog>,
    ) -> Self {
        Self {
            chain,
            extractor,
            catalog,
            transcript: Transcript::new(),
            recommendations_enabled: true,
            concurrent_lookups: true,
        }
    }

    /// Enable or disable follow-up movie lookups.
    pub fn with_recommendations(mut self, enabled: bool) -> Self {
        self.recommendations_enabled = enabled;
        self
    }

    /// Run catalog lookups for one answer concurrently or one after another.
    pub fn with_concurrent_lookups(mut self, concurrent: bool) -> Self {
        self.concurrent_lookups = concurrent;
        self
    }

    pub fn state(&self) -> SessionState {
        if self.transcript.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Active
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Start the session over.
    pub fn reset(&mut self) {
        self.transcript.clear();
    }

    /// Answer a question and collect movie cards for its recommendations.
    ///
    /// If the chain fails the transcript is left untouched. Failed catalog
    /// lookups only drop that recommendation's cards.
    #[instrument(skip(self), fields(question = %question, turns = self.transcript.len()))]
    pub async fn ask(&mut self, question: &str) -> Result<RenderedTurn> {
        if question.trim().is_empty() {
            return Err(MoviewhizError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }

        let answer = self.chain.answer(question, &self.transcript).await?;
        let turns = self.transcript.push_exchange(question, &answer).to_vec();

        let recommendations = if self.recommendations_enabled {
            self.extractor.extract(&answer)
        } else {
            Vec::new()
        };
        info!("Answer contains {} recommendations", recommendations.len());

        let movies = self.lookup(&recommendations).await;

        Ok(RenderedTurn {
            turns,
            recommendations,
            movies,
        })
    }

    /// Search the catalog for each recommendation, keeping match order.
    async fn lookup(&self, recommendations: &[RecommendationMatch]) -> Vec<MovieRecord> {
        let searches: Vec<_> = recommendations
            .iter()
            .map(|m| self.catalog.search(&m.query))
            .collect();

        let results = if self.concurrent_lookups {
            join_all(searches).await
        } else {
            let mut results = Vec::with_capacity(searches.len());
            for search in searches {
                results.push(search.await);
            }
            results
        };

        recommendations
            .iter()
            .zip(results)
            .flat_map(|(m, result)| {
                let query = &m.query;
                match result {
                    Ok(movies) => {
                        debug!("'{}' matched {} movies", query, movies.len());
                        movies
                    }
                    Err(e) => {
                        warn!("Skipping movie cards for '{}': {}", query, e);
                        Vec::new()
                    }
                }
            })
            .collect()
    }
}
