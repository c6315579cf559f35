//! HTTP client for `POST /chat`

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Shown in place of a reply when the server cannot be reached.
pub const CONNECTION_ERROR_MESSAGE: &str = "Sorry, I'm having trouble connecting to the server.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct ChatRequest<'a> {
    session_id: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: String,
}

/// One conversation with the server; the session id is fixed per client.
pub struct ChatClient {
    http: reqwest::Client,
    url: String,
    session_id: String,
}

impl ChatClient {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            url: url.into(),
            session_id: Uuid::new_v4().to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Start a fresh conversation
    pub fn reset_session(&mut self) {
        self.session_id = Uuid::new_v4().to_string();
    }

    pub async fn send(&self, message: &str) -> Result<String, reqwest::Error> {
        let response: ChatResponse = self
            .http
            .post(&self.url)
            .json(&ChatRequest {
                session_id: &self.session_id,
                message,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.message)
    }
}
