//! Error types for chat sessions.
//!
//! The conversation core itself never fails: blank input and unmatched text
//! degrade to a no-op or to the fallback reply. These errors only cover
//! looking up screen sessions.

use thiserror::Error;

/// Result type alias for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Chat session not found: {id}")]
    SessionNotFound { id: String },

    #[error("Invalid chat session id: {id}")]
    InvalidSessionId { id: String },
}

impl ChatError {
    pub fn session_not_found(id: impl Into<String>) -> Self {
        Self::SessionNotFound { id: id.into() }
    }

    pub fn invalid_session_id(id: impl Into<String>) -> Self {
        Self::InvalidSessionId { id: id.into() }
    }
}
