//! Event types for real-time chat updates.

use serde::Serialize;

use super::SessionId;
use crate::entities::ChatEntry;

/// Broadcast by a [`ConversationController`](crate::ConversationController)
/// whenever its log changes or it is torn down.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum ChatEvent {
    /// An entry was appended to the conversation
    EntryAppended {
        session_id: SessionId,
        entry: ChatEntry,
    },

    /// The screen was closed; no further entries will follow
    SessionClosed {
        session_id: SessionId,
        cancelled_replies: usize,
    },
}

impl ChatEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            ChatEvent::EntryAppended { session_id, .. }
            | ChatEvent::SessionClosed { session_id, .. } => *session_id,
        }
    }
}
