//! Process-wide wiring for Moviewhiz.
//!
//! Builds the catalog client, embeds the bootstrap catalog page into the
//! vector index, and hands out conversation sessions that share it.

use crate::catalog::{MovieCatalog, TmdbCatalog};
use crate::chain::{OpenAIChatModel, QaChain, RetrievalChain, Retriever};
use crate::config::{Credentials, Prompts, Settings};
use crate::conversation::ConversationOrchestrator;
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{MoviewhizError, Result};
use crate::recommend::{PatternExtractor, RecommendationExtractor};
use crate::vector_store::{MemoryVectorStore, MovieDocument, VectorStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Shared components for all sessions of one process.
pub struct Runtime {
    settings: Settings,
    catalog: Arc<dyn MovieCatalog>,
    chain: Arc<dyn QaChain>,
    extractor: Arc<dyn RecommendationExtractor>,
    index: Arc<dyn VectorStore>,
}

impl Runtime {
    /// Build the production components and index the bootstrap catalog page.
    #[instrument(skip(settings, credentials))]
    pub async fn bootstrap(settings: Settings, credentials: &Credentials) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let catalog: Arc<dyn MovieCatalog> =
            Arc::new(TmdbCatalog::new(&credentials.tmdb_api_key, &settings.catalog)?);

        let openai_timeout = Duration::from_secs(settings.chain.timeout_secs);
        let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::with_config(
            &credentials.openai_api_key,
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
            openai_timeout,
        )?);

        let index: Arc<dyn VectorStore> = Arc::new(MemoryVectorStore::new());
        let indexed = build_index(
            catalog.as_ref(),
            embedder.as_ref(),
            index.as_ref(),
            &settings.catalog.bootstrap_query,
        )
        .await?;
        info!("Indexed {} movies", indexed);

        let model = Arc::new(OpenAIChatModel::new(
            &credentials.openai_api_key,
            &settings.chain.model,
            openai_timeout,
        )?);
        let retriever = Retriever::new(index.clone(), embedder)
            .with_max_docs(settings.chain.max_context)
            .with_min_score(settings.chain.min_score);
        let chain: Arc<dyn QaChain> = Arc::new(
            RetrievalChain::new(model, retriever)
                .with_prompts(prompts)
                .with_temperature(settings.chain.temperature)
                .with_condense_question(settings.chain.condense_question),
        );

        let extractor: Arc<dyn RecommendationExtractor> = Arc::new(
            PatternExtractor::new().with_deduplication(settings.recommendations.deduplicate),
        );

        Ok(Self::with_components(settings, catalog, chain, extractor, index))
    }

    /// Create a runtime from already-built components.
    pub fn with_components(
        settings: Settings,
        catalog: Arc<dyn MovieCatalog>,
        chain: Arc<dyn QaChain>,
        extractor: Arc<dyn RecommendationExtractor>,
        index: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            settings,
            catalog,
            chain,
            extractor,
            index,
        }
    }

    /// Start a new, empty conversation.
    pub fn session(&self) -> ConversationOrchestrator {
        ConversationOrchestrator::new(
            self.chain.clone(),
            self.extractor.clone(),
            self.catalog.clone(),
        )
        .with_recommendations(self.settings.recommendations.enabled)
        .with_concurrent_lookups(self.settings.recommendations.concurrent_lookups)
    }

    pub fn catalog(&self) -> Arc<dyn MovieCatalog> {
        self.catalog.clone()
    }

    /// Number of movies the chain can retrieve from.
    pub async fn indexed_movies(&self) -> Result<usize> {
        self.index.document_count().await
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Fetch the bootstrap query from the catalog and embed every result into the index.
///
/// An empty result is an error: a chain without any indexed movies cannot answer.
#[instrument(skip(catalog, embedder, store))]
pub async fn build_index(
    catalog: &dyn MovieCatalog,
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
    query: &str,
) -> Result<usize> {
    let movies = catalog.search(query).await?;
    if movies.is_empty() {
        return Err(MoviewhizError::CatalogUnavailable(format!(
            "bootstrap query '{}' returned no movies",
            query
        )));
    }

    let texts: Vec<String> = movies.iter().map(|m| m.index_text()).collect();
    let embeddings = embedder.embed_batch(&texts).await?;

    let documents: Vec<MovieDocument> = movies
        .into_iter()
        .zip(texts)
        .zip(embeddings)
        .map(|((movie, text), embedding)| {
            MovieDocument::new(movie.id, movie.title, text, embedding)
        })
        .collect();

    store.upsert_batch(&documents).await
}
