//! Session store port
//!
//! Conversation history keyed by session id. The relay only ever appends,
//! reads a trailing window, and trims; adapters decide where the turns live.

use aida_domain::{Message, trailing_window};
use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Full stored history, or `None` for an unknown session
    async fn get(&self, session_id: &str) -> Result<Option<Vec<Message>>, SessionStoreError>;

    /// Append a turn, creating the session on first use
    async fn append(&self, session_id: &str, message: Message) -> Result<(), SessionStoreError>;

    /// Drop all but the last `keep_last` turns; returns how many were removed
    async fn trim(&self, session_id: &str, keep_last: usize) -> Result<usize, SessionStoreError>;

    /// Number of stored sessions
    async fn len(&self) -> usize;

    /// Remove sessions idle for longer than `max_idle`, except those in
    /// `busy`; returns how many were removed
    async fn evict_idle(&self, max_idle: Duration, busy: &HashSet<String>) -> usize;

    /// The last `n` turns of a session
    async fn window(&self, session_id: &str, n: usize) -> Result<Vec<Message>, SessionStoreError> {
        let history = self.get(session_id).await?.unwrap_or_default();
        Ok(trailing_window(&history, n).to_vec())
    }
}
