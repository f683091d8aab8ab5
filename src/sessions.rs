//! Registry of live conversation sessions.
//!
//! Each session sits behind its own async mutex, so concurrent submissions for
//! one session are served one at a time while different sessions proceed in
//! parallel.

use crate::conversation::ConversationOrchestrator;
use crate::error::{MoviewhizError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

pub type SessionId = Uuid;

/// A session handle shared between requests.
pub type SharedSession = Arc<Mutex<ConversationOrchestrator>>;

struct SessionEntry {
    created_at: DateTime<Utc>,
    conversation: SharedSession,
}

/// Summary of a live session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
}

/// In-memory session registry.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversation and return its id.
    pub async fn insert(&self, conversation: ConversationOrchestrator) -> SessionId {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(
            id,
            SessionEntry {
                created_at: Utc::now(),
                conversation: Arc::new(Mutex::new(conversation)),
            },
        );
        info!("created session (session_id={})", id);
        id
    }

    pub async fn get(&self, id: SessionId) -> Result<SharedSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(|entry| entry.conversation.clone())
            .ok_or_else(|| MoviewhizError::SessionNotFound(id.to_string()))
    }

    pub async fn remove(&self, id: SessionId) -> Result<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!("closed session (session_id={})", id))
            .ok_or_else(|| MoviewhizError::SessionNotFound(id.to_string()))
    }

    /// List live sessions, oldest first.
    pub async fn list(&self) -> Vec<SessionSummary> {
        let mut summaries: Vec<SessionSummary> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, entry)| SessionSummary {
                id: *id,
                created_at: entry.created_at,
            })
            .collect();
        summaries.sort_by_key(|s| s.created_at);
        summaries
    }
}
