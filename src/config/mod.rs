//! Configuration module for Moviewhiz.
//!
//! Handles loading application settings, prompt templates and API credentials.

mod credentials;
mod prompts;
mod settings;

pub use credentials::{
    load_dotenv, load_env_file, require_env, Credentials, OPENAI_API_KEY_VAR, TMDB_API_KEY_VAR,
};
pub use prompts::{ChainPrompts, Prompts};
pub use settings::{
    CatalogSettings, ChainSettings, EmbeddingSettings, GeneralSettings, PromptSettings,
    RecommendationSettings, ServerSettings, Settings,
};
