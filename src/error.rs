//! Error types for Moviewhiz.

use thiserror::Error;

/// Library-level error type for Moviewhiz operations.
#[derive(Error, Debug)]
pub enum MoviewhizError {
    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Movie catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Could not produce an answer: {0}")]
    ChainUnavailable(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl MoviewhizError {
    /// Fold a lower-level failure into `ChainUnavailable`.
    ///
    /// Errors that already describe the chain or a missing credential pass through.
    pub fn into_chain_error(self) -> Self {
        match self {
            err @ (MoviewhizError::ChainUnavailable(_)
            | MoviewhizError::ConfigurationMissing(_)) => err,
            other => MoviewhizError::ChainUnavailable(other.to_string()),
        }
    }
}

/// Result type alias for Moviewhiz operations.
pub type Result<T> = std::result::Result<T, MoviewhizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_chain_error_wraps_lower_level_errors() {
        let err = MoviewhizError::Embedding("rate limited".to_string()).into_chain_error();
        match err {
            MoviewhizError::ChainUnavailable(msg) => assert!(msg.contains("rate limited")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_into_chain_error_keeps_configuration_errors() {
        let err = MoviewhizError::ConfigurationMissing("OPENAI_API_KEY".to_string())
            .into_chain_error();
        assert!(matches!(err, MoviewhizError::ConfigurationMissing(_)));
    }
}
