//! Pre-flight checks before expensive operations.
//!
//! Validates that the API keys an operation needs are available before
//! starting work that would otherwise fail midway (index bootstrap makes
//! paid API calls).

use crate::cli::Output;
use crate::config::{require_env, Credentials, TMDB_API_KEY_VAR};
use crate::error::{MoviewhizError, Result};

/// Resolve both keys for chat, ask and serve.
pub fn chat_credentials() -> Result<Credentials> {
    Credentials::from_env().inspect_err(report)
}

/// Resolve the TMDB key for direct catalog search.
pub fn search_key() -> Result<String> {
    require_env(TMDB_API_KEY_VAR).inspect_err(report)
}

fn report(err: &MoviewhizError) {
    Output::error(&format!("{}", err));
    Output::info("Run 'moviewhiz doctor' for detailed diagnostics.");
}
