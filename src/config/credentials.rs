//! API credentials read from the process environment.
//!
//! A `.env` file may seed the environment first. Variables already set in the
//! process are never overridden by the file.

use crate::error::{MoviewhizError, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the TMDB API key.
pub const TMDB_API_KEY_VAR: &str = "TMDB_API_KEY";

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Credentials for the two external services.
///
/// Never serialized; lives only in memory for the process lifetime.
#[derive(Clone)]
pub struct Credentials {
    pub tmdb_api_key: String,
    pub openai_api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tmdb_api_key", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read both keys from the environment, failing on the first one missing.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both keys through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            tmdb_api_key: require(&lookup, TMDB_API_KEY_VAR)?,
            openai_api_key: require(&lookup, OPENAI_API_KEY_VAR)?,
        })
    }
}

/// Load `.env` from the working directory or one of its parents.
///
/// Returns the path of the file that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load an explicit env file into the process environment.
pub fn load_env_file(path: &Path) -> Result<()> {
    dotenvy::from_path(path).map_err(|e| {
        MoviewhizError::Config(format!("Failed to load env file {}: {}", path.display(), e))
    })
}

/// Read a single required key from the environment.
pub fn require_env(name: &str) -> Result<String> {
    require(&|name: &str| std::env::var(name).ok(), name)
}

/// Look up a single required key.
pub fn require<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(MoviewhizError::ConfigurationMissing(format!(
            "{} is empty. Set it with: export {}='...'",
            name, name
        ))),
        None => Err(MoviewhizError::ConfigurationMissing(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}
