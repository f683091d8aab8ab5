//! Moviewhiz - Conversational Movie Recommendations
//!
//! A chat assistant that answers movie questions from a TMDB-backed index and
//! turns every recommendation it makes into a movie card.
//!
//! # Overview
//!
//! Moviewhiz allows you to:
//! - Chat about movies with an assistant that remembers the conversation
//! - Get catalog cards (year, rating, overview, link) for recommended titles
//! - Search the movie catalog directly
//! - Serve chat sessions over a small HTTP API
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Settings, prompt templates and credentials
//! - `catalog` - Movie catalog abstraction and the TMDB client
//! - `embedding` - Embedding generation
//! - `vector_store` - In-memory movie index
//! - `chain` - Conversational retrieval chain for answers
//! - `recommend` - Recommendation detection in answers
//! - `conversation` - Per-session transcript and turn orchestration
//! - `runtime` - Process-wide wiring and index bootstrap
//! - `sessions` - Registry of live sessions for the HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use moviewhiz::config::{Credentials, Settings};
//! use moviewhiz::runtime::Runtime;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::from_env()?;
//!     let runtime = Runtime::bootstrap(settings, &credentials).await?;
//!
//!     let mut session = runtime.session();
//!     let turn = session.ask("Can you recommend a sci-fi film?").await?;
//!     println!("{}", turn.answer());
//!     for movie in &turn.movies {
//!         println!("{} {}", movie.display_title(), movie.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod chain;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod recommend;
pub mod runtime;
pub mod sessions;
pub mod vector_store;

#[cfg(test)]
mod testing;

pub use error::{MoviewhizError, Result};
