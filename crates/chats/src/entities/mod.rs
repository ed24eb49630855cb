//! Domain entities for the chatbot screen.

pub mod conversation;
pub mod entry;

pub use conversation::{Conversation, SEED_GREETING, SEED_REMINDER};
pub use entry::{ChatEntry, EntryOrigin};
