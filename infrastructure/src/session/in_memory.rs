//! Process-local session store.
//!
//! Sessions live for the lifetime of the process (or until evicted).

use aida_application::{SessionStore, SessionStoreError};
use aida_domain::Message;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug)]
struct SessionRecord {
    messages: Vec<Message>,
    last_active: Instant,
}

impl SessionRecord {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            last_active: Instant::now(),
        }
    }
}

/// In-memory [`SessionStore`]
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<Vec<Message>>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).map(|r| r.messages.clone()))
    }

    async fn append(&self, session_id: &str, message: Message) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let record = sessions
            .entry(session_id.to_string())
            .or_insert_with(SessionRecord::new);
        record.messages.push(message);
        record.last_active = Instant::now();
        Ok(())
    }

    async fn trim(&self, session_id: &str, keep_last: usize) -> Result<usize, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let Some(record) = sessions.get_mut(session_id) else {
            return Ok(0);
        };
        let removed = record.messages.len().saturating_sub(keep_last);
        record.messages.drain(..removed);
        Ok(removed)
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn evict_idle(&self, max_idle: Duration, busy: &HashSet<String>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, record| {
            busy.contains(id) || record.last_active.elapsed() <= max_idle
        });
        before - sessions.len()
    }

    async fn window(&self, session_id: &str, n: usize) -> Result<Vec<Message>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .map(|r| {
                let start = r.messages.len().saturating_sub(n);
                r.messages[start..].to_vec()
            })
            .unwrap_or_default())
    }
}
