//! Test doubles for the external collaborators.

use crate::catalog::{MovieCatalog, MovieRecord};
use crate::chain::{ChatMessage, ChatModel, QaChain};
use crate::conversation::Transcript;
use crate::embedding::Embedder;
use crate::error::{MoviewhizError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Build a movie record with a TMDB-style URL.
pub fn movie(id: u64, title: &str, year: Option<&str>) -> MovieRecord {
    MovieRecord {
        id,
        title: title.to_string(),
        overview: format!("{} overview", title),
        release_year: year.map(str::to_string),
        rating: 7.5,
        url: format!("https://www.themoviedb.org/movie/{}", id),
    }
}

/// Embeds text as a bag of known keywords, one dimension per keyword.
pub struct KeywordEmbedder {
    keywords: Vec<String>,
}

impl KeywordEmbedder {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let text = text.to_lowercase();
        self.keywords
            .iter()
            .map(|k| if text.contains(k.as_str()) { 1.0 } else { 0.0 })
            .collect()
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.keywords.len()
    }
}

/// Chat model that replies from a script and records every request.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    fail: bool,
}

impl ScriptedModel {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::<String>::new())
        }
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, messages: &[ChatMessage], _temperature: f32) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if self.fail {
            return Err(MoviewhizError::OpenAI("model offline".to_string()));
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| MoviewhizError::OpenAI("script exhausted".to_string()))
    }
}

/// QA chain that replies from a script and records the transcript length it saw.
pub struct ScriptedChain {
    replies: Mutex<VecDeque<Result<String>>>,
    seen_turns: Mutex<Vec<usize>>,
}

impl ScriptedChain {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            seen_turns: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure as the next reply.
    pub fn then_fail(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(MoviewhizError::ChainUnavailable("backend down".to_string())));
        self
    }

    pub fn seen_turns(&self) -> Vec<usize> {
        self.seen_turns.lock().unwrap().clone()
    }
}

#[async_trait]
impl QaChain for ScriptedChain {
    async fn answer(&self, _question: &str, transcript: &Transcript) -> Result<String> {
        self.seen_turns.lock().unwrap().push(transcript.len());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(MoviewhizError::ChainUnavailable("script exhausted".to_string())))
    }
}

/// Catalog answering from a fixed table; unknown queries return no movies.
#[derive(Default)]
pub struct StubCatalog {
    movies: HashMap<String, Vec<MovieRecord>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    queries: Mutex<Vec<String>>,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(mut self, query: &str, movies: Vec<MovieRecord>) -> Self {
        self.movies.insert(query.to_string(), movies);
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieCatalog for StubCatalog {
    async fn search(&self, query: &str) -> Result<Vec<MovieRecord>> {
        self.queries.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(query) {
            return Err(MoviewhizError::CatalogUnavailable(format!(
                "stub failure for '{}'",
                query
            )));
        }
        Ok(self.movies.get(query).cloned().unwrap_or_default())
    }
}
