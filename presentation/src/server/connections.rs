//! Live WebSocket connections, keyed by session id.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

struct ClientInfo {
    /// Outbound text frames for this connection
    sender: mpsc::UnboundedSender<String>,
    connected_at: DateTime<Utc>,
}

/// Registry of open connections.
///
/// Each connection gets a fresh UUID v4 that doubles as its conversation
/// session id.
#[derive(Default)]
pub struct ConnectionRegistry {
    clients: Mutex<HashMap<String, ClientInfo>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn clients(&self) -> MutexGuard<'_, HashMap<String, ClientInfo>> {
        match self.clients.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Register a connection and return its new session id.
    pub fn connect(&self, sender: mpsc::UnboundedSender<String>) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.clients().insert(
            session_id.clone(),
            ClientInfo {
                sender,
                connected_at: Utc::now(),
            },
        );
        info!(session_id = %session_id, "WebSocket connected");
        session_id
    }

    /// Remove a connection. Returns `false` if it was already gone.
    pub fn disconnect(&self, session_id: &str) -> bool {
        match self.clients().remove(session_id) {
            Some(client) => {
                let duration = Utc::now() - client.connected_at;
                info!(
                    session_id,
                    connected_secs = duration.num_seconds(),
                    "WebSocket disconnected"
                );
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.clients().contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.clients().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queue a text frame for a connection. Returns `false` if the
    /// connection is unknown or its writer has gone away.
    pub fn send_to(&self, session_id: &str, text: String) -> bool {
        let clients = self.clients();
        let Some(client) = clients.get(session_id) else {
            debug!(session_id, "Dropping message for unknown connection");
            return false;
        };
        client.sender.send(text).is_ok()
    }
}
