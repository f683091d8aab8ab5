//! Configuration settings for Moviewhiz.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub catalog: CatalogSettings,
    pub embedding: EmbeddingSettings,
    pub chain: ChainSettings,
    pub recommendations: RecommendationSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level used when no -v flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Movie catalog (TMDB) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Base URL of the TMDB v3 API.
    pub base_url: String,
    /// Base URL for movie pages, the movie id is appended.
    pub movie_url_base: String,
    /// Result language passed to the search endpoint.
    pub language: String,
    /// Include adult titles in search results.
    pub include_adult: bool,
    /// Maximum records kept from a single search.
    pub max_results: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries on transient network errors.
    pub retries: u32,
    /// Query used to seed the vector index at startup.
    pub bootstrap_query: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            movie_url_base: "https://www.themoviedb.org/movie".to_string(),
            language: "en-US".to_string(),
            include_adult: false,
            max_results: 20,
            timeout_secs: 5,
            retries: 1,
            bootstrap_query: "movie".to_string(),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Conversational retrieval chain settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSettings {
    /// LLM model for answers and question condensing.
    pub model: String,
    /// Sampling temperature for answers.
    pub temperature: f32,
    /// Number of retrieved titles included as context.
    pub max_context: usize,
    /// Minimum similarity score for retrieved titles.
    pub min_score: f32,
    /// Rewrite follow-up questions into standalone questions using the transcript.
    pub condense_question: bool,
    /// Timeout for OpenAI requests in seconds.
    pub timeout_secs: u64,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_context: 4,
            min_score: 0.0,
            condense_question: true,
            timeout_secs: 60,
        }
    }
}

/// Recommendation follow-up settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationSettings {
    /// Look up movies recommended in answers.
    pub enabled: bool,
    /// Drop repeated titles within one answer.
    pub deduplicate: bool,
    /// Run catalog lookups for one answer concurrently.
    pub concurrent_lookups: bool,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            deduplicate: false,
            concurrent_lookups: true,
        }
    }
}

/// HTTP API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::MoviewhizError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("moviewhiz")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}
