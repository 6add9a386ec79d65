//! Client for the upstream chat backend.
//!
//! The backend is an external collaborator reached over HTTP, consumed
//! through two endpoints:
//!
//! - `POST {base_url}/api/chat` with `{"message": string}`, answered by
//!   `{"success": bool, "response"?: string, "error"?: string}`
//! - `POST {base_url}/api/clear` with an empty JSON object, answered by
//!   `{"success": bool}`
//!
//! Handlers talk through the [`ChatBackend`] trait so tests can script the
//! backend without a network. There are no retries and no request timeout:
//! a call runs to completion or to transport failure.

use serde::Deserialize;
use thiserror::Error;

/// Fallback text when the backend reports failure without saying why.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Why a backend call failed.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered, but flagged the request as failed.
    #[error("{0}")]
    Rejected(String),
    /// The request never completed, or the body was unparseable.
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// The seam between the widget and the chat backend.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one user message and get the assistant's reply text.
    async fn send(&self, message: &str) -> Result<String, BackendError>;

    /// Ask the backend to drop the conversation history.
    async fn clear(&self) -> Result<(), BackendError>;
}

/// Reply body of `POST /api/chat`.
///
/// A missing `success` flag counts as failure, not as a parse error.
#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    success: bool,
    response: Option<String>,
    error: Option<String>,
}

/// Reply body of `POST /api/clear`.
#[derive(Debug, Deserialize)]
struct ClearReply {
    #[serde(default)]
    success: bool,
}

/// HTTP implementation of [`ChatBackend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, message: &str) -> Result<String, BackendError> {
        let url = self.endpoint("/api/chat");
        tracing::debug!(url = %url, "Sending message to upstream");

        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;

        // Failure statuses still carry a JSON body with the error text, so
        // the body is parsed regardless of status.
        let status = resp.status();
        let reply: ChatReply = resp
            .json()
            .await
            .map_err(|e| BackendError::Transport(format!("unparseable reply ({status}): {e}")))?;

        interpret_chat_reply(reply)
    }

    async fn clear(&self) -> Result<(), BackendError> {
        let url = self.endpoint("/api/clear");
        tracing::debug!(url = %url, "Clearing upstream conversation");

        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = resp.status();
        let reply: ClearReply = resp
            .json()
            .await
            .map_err(|e| BackendError::Transport(format!("unparseable reply ({status}): {e}")))?;

        interpret_clear_reply(reply)
    }
}

fn interpret_chat_reply(reply: ChatReply) -> Result<String, BackendError> {
    if reply.success {
        // success without a reply text is unrenderable; treat as rejection.
        reply
            .response
            .ok_or_else(|| BackendError::Rejected(GENERIC_FAILURE.to_string()))
    } else {
        Err(BackendError::Rejected(
            reply.error.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        ))
    }
}

fn interpret_clear_reply(reply: ClearReply) -> Result<(), BackendError> {
    if reply.success {
        Ok(())
    } else {
        Err(BackendError::Rejected(GENERIC_FAILURE.to_string()))
    }
}
