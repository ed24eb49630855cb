//! # ChamaPay Chats Crate
//!
//! Core logic of the scripted chatbot screen: an append-only conversation log,
//! the keyword reply resolver, and the controller that pairs every user entry
//! with a delayed bot reply.
//!
//! ## Architecture
//!
//! - **Entities**: `ChatEntry` and the `Conversation` log
//! - **Services**: reply resolution, per-screen controllers, and the session registry
//! - **Types**: errors and broadcast events
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use chamapay_chats::ConversationController;
//!
//! # async fn run() {
//! let controller = ConversationController::with_default_resolver(Duration::from_millis(1200));
//! if let Some(pending) = controller.submit("hello").await {
//!     println!("queued reply for entry {}", pending.user_entry().id());
//! }
//! # }
//! ```

pub mod entities;
pub mod services;
pub mod types;

pub use entities::{ChatEntry, Conversation, EntryOrigin};
pub use services::{
    resolve, ConversationController, KeywordResolver, KeywordRule, PendingReply, ReplyResolver,
    SessionRegistry,
};
pub use types::{ChatError, ChatEvent, ChatResult, SessionId};
