//! Per-chat session state. Holds the negotiated locale; created empty on first sight of a chat.

use async_trait::async_trait;
use dbot_core::{CommandEvent, Middleware, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Locale chosen for this chat; takes precedence over the sender's client language.
    pub language_code: Option<String>,
}

/// Maps a chat to its session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, chat_id: i64) -> Result<Option<Session>>;
    async fn save(&self, chat_id: i64, session: Session) -> Result<()>;
}

/// Process-local store; sessions are lost on restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<i64, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, chat_id: i64) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(&chat_id).cloned())
    }

    async fn save(&self, chat_id: i64, session: Session) -> Result<()> {
        self.sessions.write().await.insert(chat_id, session);
        Ok(())
    }
}

/// Initialises an empty session for chats seen for the first time.
pub struct SessionMiddleware {
    store: Arc<dyn SessionStore>,
}

impl SessionMiddleware {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Middleware for SessionMiddleware {
    async fn before(&self, event: &CommandEvent) -> Result<bool> {
        if self.store.load(event.chat_id).await?.is_none() {
            debug!(chat_id = event.chat_id, "Initialising session");
            self.store.save(event.chat_id, Session::default()).await?;
        }
        Ok(true)
    }
}
