//! Shared types for the chatbot screen.

pub mod errors;
pub mod events;

pub use errors::{ChatError, ChatResult};
pub use events::ChatEvent;

/// Identifier of one opened chat screen.
pub type SessionId = uuid::Uuid;
