//! Shared application state injected into every handler.

use super::connections::ConnectionRegistry;
use aida_application::ConversationRelay;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConversationRelay>,
    pub connections: Arc<ConnectionRegistry>,
}

impl AppState {
    pub fn new(relay: Arc<ConversationRelay>) -> Self {
        Self {
            relay,
            connections: Arc::new(ConnectionRegistry::new()),
        }
    }
}
