//! OpenAI client construction.

use crate::error::{MoviewhizError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client for the given key with a custom timeout.
///
/// A request that exceeds the timeout surfaces as an API error, which the
/// chain reports as `ChainUnavailable`.
pub fn create_client_with_timeout(
    api_key: &str,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| MoviewhizError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new().with_api_key(api_key);
    Ok(Client::with_config(config).with_http_client(http_client))
}
