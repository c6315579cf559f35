//! Conversation relay.
//!
//! One entry point, [`ConversationRelay::handle_message`], shared by every
//! transport. It records the user turn, runs the agent over the trailing
//! window of the session, records the reply and returns it. Failures never
//! escape: the caller always gets a string back.

use crate::config::RelayParams;
use crate::ports::session_store::SessionStore;
use crate::use_cases::run_agent::{RunAgentError, RunAgentInput, RunAgentOutput, RunAgentUseCase};
use aida_domain::Message;
use aida_domain::util::preview;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Reply when the model produced nothing usable.
pub const COULD_NOT_PROCESS_MESSAGE: &str = "I'm sorry, I couldn't process that message.";

/// Reply for any other failure while handling a message.
pub const PROCESSING_ERROR_MESSAGE: &str =
    "I apologize, there was an error processing your message.";

/// Per-session conversation loop.
pub struct ConversationRelay {
    store: Arc<dyn SessionStore>,
    agent: RunAgentUseCase,
    system_prompt: String,
    params: RelayParams,
    locks: std::sync::Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ConversationRelay {
    pub fn new(
        store: Arc<dyn SessionStore>,
        agent: RunAgentUseCase,
        system_prompt: impl Into<String>,
        params: RelayParams,
    ) -> Self {
        Self {
            store,
            agent,
            system_prompt: system_prompt.into(),
            params,
            locks: std::sync::Mutex::new(HashMap::new()),
        }
    }

    pub fn params(&self) -> &RelayParams {
        &self.params
    }

    /// Handle one user message and return the assistant's reply.
    pub async fn handle_message(&self, session_id: &str, text: &str) -> String {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock().await;

        let started = Instant::now();
        match self.process(session_id, text).await {
            Ok(output) => {
                info!(
                    session_id,
                    tool_turns = output.tool_turns,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Message handled"
                );
                output.reply
            }
            Err(RelayFailure::Unusable(e)) => {
                warn!(session_id, error = %e, "No usable reply from agent");
                COULD_NOT_PROCESS_MESSAGE.to_string()
            }
            Err(RelayFailure::Failed(e)) => {
                error!(session_id, error = %e, "Error processing message");
                PROCESSING_ERROR_MESSAGE.to_string()
            }
        }
    }

    async fn process(&self, session_id: &str, text: &str) -> Result<RunAgentOutput, RelayFailure> {
        debug!(session_id, message = %preview(text, 80), "Relaying message");

        self.store
            .append(session_id, Message::user(text))
            .await
            .map_err(|e| RelayFailure::Failed(e.to_string()))?;

        let history = self
            .store
            .window(session_id, self.params.history_window)
            .await
            .map_err(|e| RelayFailure::Failed(e.to_string()))?;

        let output = self
            .agent
            .execute(RunAgentInput {
                system_prompt: self.system_prompt.clone(),
                history,
                max_tool_turns: self.params.max_tool_turns,
            })
            .await
            .map_err(RelayFailure::from)?;

        self.store
            .append(session_id, Message::assistant(&output.reply))
            .await
            .map_err(|e| RelayFailure::Failed(e.to_string()))?;

        if let Some(cap) = self.params.max_stored_turns {
            match self.store.trim(session_id, cap).await {
                Ok(0) => {}
                Ok(removed) => debug!(session_id, removed, "Trimmed session history"),
                Err(e) => warn!(session_id, error = %e, "Failed to trim session history"),
            }
        }

        Ok(output)
    }

    fn lock_table(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        match self.locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.lock_table()
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Sessions whose lock is held or awaited by a `handle_message` call.
    fn busy_sessions(&self) -> HashSet<String> {
        self.lock_table()
            .iter()
            .filter(|(_, lock)| Arc::strong_count(lock) > 1)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Stored turns for a session (empty if unknown).
    pub async fn history(&self, session_id: &str) -> Vec<Message> {
        match self.store.get(session_id).await {
            Ok(history) => history.unwrap_or_default(),
            Err(e) => {
                warn!(session_id, error = %e, "Failed to read session history");
                Vec::new()
            }
        }
    }

    pub async fn session_count(&self) -> usize {
        self.store.len().await
    }

    /// Evict idle sessions when a TTL is configured. Returns how many were removed.
    ///
    /// Sessions with a message in flight are never evicted, however long the
    /// model call has been running.
    pub async fn evict_idle_sessions(&self) -> usize {
        let Some(ttl) = self.params.session_ttl else {
            return 0;
        };

        let busy = self.busy_sessions();
        let evicted = self.store.evict_idle(ttl, &busy).await;

        // Locks nobody is holding or waiting on can go.
        let mut locks = self.lock_table();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);

        if evicted > 0 {
            info!(evicted, "Evicted idle sessions");
        }
        evicted
    }
}

enum RelayFailure {
    Unusable(RunAgentError),
    Failed(String),
}

impl From<RunAgentError> for RelayFailure {
    fn from(e: RunAgentError) -> Self {
        if e.is_unusable_reply() {
            RelayFailure::Unusable(e)
        } else {
            RelayFailure::Failed(e.to_string())
        }
    }
}
