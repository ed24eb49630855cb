//! Registry of open chat screens.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;

use crate::services::conversation_service::ConversationController;
use crate::services::reply_service::{KeywordResolver, ReplyResolver};
use crate::types::{ChatError, ChatResult, SessionId};

/// Owns one [`ConversationController`] per open chat screen.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<ConversationController>>>,
    resolver: Arc<dyn ReplyResolver>,
    reply_delay: Duration,
}

impl SessionRegistry {
    pub fn new(resolver: Arc<dyn ReplyResolver>, reply_delay: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            resolver,
            reply_delay,
        }
    }

    pub fn with_default_resolver(reply_delay: Duration) -> Self {
        Self::new(Arc::new(KeywordResolver::default()), reply_delay)
    }

    /// Open a chat screen backed by a freshly seeded conversation.
    pub async fn open(&self) -> Arc<ConversationController> {
        let controller = Arc::new(ConversationController::new(
            Arc::clone(&self.resolver),
            self.reply_delay,
        ));

        self.sessions
            .write()
            .await
            .insert(controller.id(), Arc::clone(&controller));

        info!(session_id = %controller.id(), "chat session opened");
        controller
    }

    pub async fn get(&self, id: &SessionId) -> ChatResult<Arc<ConversationController>> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ChatError::session_not_found(id.to_string()))
    }

    /// Same as [`get`](Self::get) but for an id still in its textual form.
    pub async fn get_by_str(&self, id: &str) -> ChatResult<Arc<ConversationController>> {
        let parsed = parse_session_id(id)?;
        self.get(&parsed).await
    }

    /// Close a screen, cancelling its pending replies. Returns how many were cancelled.
    pub async fn close(&self, id: &SessionId) -> ChatResult<usize> {
        let controller = self
            .sessions
            .write()
            .await
            .remove(id)
            .ok_or_else(|| ChatError::session_not_found(id.to_string()))?;

        Ok(controller.shutdown().await)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Close every open screen.
    pub async fn close_all(&self) {
        let drained: Vec<_> = self.sessions.write().await.drain().collect();
        for (_, controller) in drained {
            controller.shutdown().await;
        }
    }
}

pub fn parse_session_id(id: &str) -> ChatResult<SessionId> {
    SessionId::parse_str(id).map_err(|_| ChatError::invalid_session_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1200);

    #[tokio::test(start_paused = true)]
    async fn open_registers_a_seeded_session() {
        let registry = SessionRegistry::with_default_resolver(DELAY);

        let controller = registry.open().await;
        let fetched = registry.get(&controller.id()).await.expect("registered");

        assert!(Arc::ptr_eq(&controller, &fetched));
        assert_eq!(fetched.len().await, 2);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_do_not_share_conversations() {
        let registry = SessionRegistry::with_default_resolver(DELAY);
        let first = registry.open().await;
        let second = registry.open().await;

        first.submit("hello").await.expect("accepted");

        assert_eq!(first.len().await, 3);
        assert_eq!(second.len().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn close_cancels_pending_replies_and_forgets_the_session() {
        let registry = SessionRegistry::with_default_resolver(DELAY);
        let controller = registry.open().await;
        controller.submit("hello").await.expect("accepted");

        let cancelled = registry.close(&controller.id()).await.expect("closed");
        tokio::time::sleep(DELAY * 2).await;

        assert_eq!(cancelled, 1);
        assert_eq!(controller.len().await, 3);
        assert!(registry.is_empty().await);
        assert!(matches!(
            registry.get(&controller.id()).await,
            Err(ChatError::SessionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn textual_ids_are_validated() {
        let registry = SessionRegistry::with_default_resolver(DELAY);

        assert!(matches!(
            registry.get_by_str("not-a-uuid").await,
            Err(ChatError::InvalidSessionId { .. })
        ));
        assert!(matches!(
            registry.get_by_str(&SessionId::new_v4().to_string()).await,
            Err(ChatError::SessionNotFound { .. })
        ));
    }
}
