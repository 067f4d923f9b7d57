//! Chat transport abstraction.
//!
//! The resolver only needs "one question in, one JSON payload out". The
//! trait keeps it that way: production code talks to the backend through
//! [`ApiClient`], tests script a [`FakeChatBackend`] and never touch the
//! network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiClient, ApiError};

/// Chat transport failures. Every variant is recovered identically by
/// the resolver's local fallback; the split exists for logging.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("no scripted reply left")]
    Exhausted,
}

impl From<ApiError> for ChatError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http(msg) => Self::Http(msg),
            ApiError::Status { status, .. } => Self::Status(status),
            ApiError::InvalidJson(msg) => Self::InvalidJson(msg),
        }
    }
}

/// One-question-in, one-payload-out chat transport.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn ask(&self, question: &str) -> Result<Value, ChatError>;
}

#[async_trait]
impl ChatBackend for ApiClient {
    async fn ask(&self, question: &str) -> Result<Value, ChatError> {
        self.send_chat_message(question).await.map_err(Into::into)
    }
}

/// Scripted chat backend for tests: replies are consumed in push order;
/// once the script runs out every ask fails.
#[derive(Default)]
pub struct FakeChatBackend {
    replies: Mutex<VecDeque<Result<Value, ChatError>>>,
}

impl FakeChatBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: Value) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Ok(reply));
        }
    }

    pub fn push_failure(&self, error: ChatError) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Err(error));
        }
    }

    /// A backend that fails every request, as when the service is down.
    pub fn unreachable() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatBackend for FakeChatBackend {
    async fn ask(&self, _question: &str) -> Result<Value, ChatError> {
        match self.replies.lock() {
            Ok(mut replies) => replies.pop_front().unwrap_or(Err(ChatError::Exhausted)),
            Err(_) => Err(ChatError::Exhausted),
        }
    }
}
