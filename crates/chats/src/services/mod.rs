//! Services for the chatbot screen.
//!
//! `reply_service` decides what the bot says, `conversation_service` owns one
//! screen's log and its pending replies, and `session_service` keeps track of
//! every open screen.

pub mod conversation_service;
pub mod reply_service;
pub mod session_service;

pub use conversation_service::{ConversationController, PendingReply};
pub use reply_service::{resolve, KeywordResolver, KeywordRule, ReplyResolver, KEYWORD_RULES};
pub use session_service::SessionRegistry;
