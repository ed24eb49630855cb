//! Per-screen conversation controller.
//!
//! A controller owns one [`Conversation`] and every reply task it has
//! scheduled. Submitting text appends the user entry at once and spawns a
//! timer task that appends the bot reply after the configured delay. Tearing
//! the controller down (explicitly via [`ConversationController::shutdown`] or
//! by dropping it) aborts all replies still waiting on their timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::{AbortHandle, JoinSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::entities::{ChatEntry, Conversation, EntryOrigin};
use crate::services::reply_service::{KeywordResolver, ReplyResolver};
use crate::types::{ChatEvent, SessionId};

const EVENT_CHANNEL_CAPACITY: usize = 100;

/// State shared between the controller and its reply tasks.
struct Shared {
    session_id: SessionId,
    conversation: Mutex<Conversation>,
    resolver: Arc<dyn ReplyResolver>,
    events: broadcast::Sender<ChatEvent>,
}

impl Shared {
    /// Append and broadcast under one lock so events go out in id order.
    async fn append(&self, origin: EntryOrigin, text: String) -> Option<ChatEntry> {
        let mut conversation = self.conversation.lock().await;
        let entry = conversation.append(origin, text)?.clone();

        debug!(
            session_id = %self.session_id,
            entry_id = entry.id(),
            origin = %origin,
            "appended chat entry"
        );

        // Nobody listening is fine.
        let _ = self.events.send(ChatEvent::EntryAppended {
            session_id: self.session_id,
            entry: entry.clone(),
        });

        Some(entry)
    }
}

/// Handle to a bot reply waiting on its timer.
#[derive(Debug)]
pub struct PendingReply {
    user_entry: ChatEntry,
    task: AbortHandle,
}

impl PendingReply {
    /// The user entry this reply answers.
    pub fn user_entry(&self) -> &ChatEntry {
        &self.user_entry
    }

    /// Stop the reply from ever being appended. No effect once it has fired.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct ConversationController {
    shared: Arc<Shared>,
    reply_delay: Duration,
    // `None` once the controller has been shut down.
    tasks: Mutex<Option<JoinSet<()>>>,
}

impl ConversationController {
    /// Create a controller over a freshly seeded conversation.
    pub fn new(resolver: Arc<dyn ReplyResolver>, reply_delay: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let session_id = Uuid::new_v4();

        debug!(%session_id, delay_ms = reply_delay.as_millis(), "opening conversation");

        Self {
            shared: Arc::new(Shared {
                session_id,
                conversation: Mutex::new(Conversation::seeded()),
                resolver,
                events,
            }),
            reply_delay,
            tasks: Mutex::new(Some(JoinSet::new())),
        }
    }

    pub fn with_default_resolver(reply_delay: Duration) -> Self {
        Self::new(Arc::new(KeywordResolver::default()), reply_delay)
    }

    pub fn id(&self) -> SessionId {
        self.shared.session_id
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Submit user text.
    ///
    /// Blank input (after trimming) is ignored and yields `None`, as does any
    /// submission after shutdown. Otherwise the trimmed text is appended as a
    /// user entry before this returns, and the returned handle tracks the bot
    /// reply scheduled for it.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn submit(&self, raw_text: &str) -> Option<PendingReply> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!(session_id = %self.id(), "ignoring blank submission");
            return None;
        }

        let mut guard = self.tasks.lock().await;
        let Some(tasks) = guard.as_mut() else {
            warn!(session_id = %self.id(), "submission after conversation was closed");
            return None;
        };

        // Reap finished replies so the set only holds pending ones.
        while tasks.try_join_next().is_some() {}

        let user_entry = self
            .shared
            .append(EntryOrigin::User, text.to_string())
            .await?;

        let shared = Arc::clone(&self.shared);
        let delay = self.reply_delay;
        let input = text.to_string();
        let task = tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            let appended = match shared.resolver.resolve(&input) {
                Some(reply) => shared.append(EntryOrigin::Bot, reply).await,
                None => None,
            };
            if appended.is_none() {
                debug!(session_id = %shared.session_id, "resolver stayed silent");
            }
        });

        Some(PendingReply { user_entry, task })
    }

    /// Snapshot of the log in display order.
    pub async fn entries(&self) -> Vec<ChatEntry> {
        self.shared.conversation.lock().await.entries().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.shared.conversation.lock().await.len()
    }

    /// Receive every entry appended from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.shared.events.subscribe()
    }

    /// Number of replies still waiting on their timer.
    pub async fn pending_replies(&self) -> usize {
        let mut guard = self.tasks.lock().await;
        match guard.as_mut() {
            Some(tasks) => {
                while tasks.try_join_next().is_some() {}
                tasks.len()
            }
            None => 0,
        }
    }

    pub async fn is_closed(&self) -> bool {
        self.tasks.lock().await.is_none()
    }

    /// Tear the screen down: abort every pending reply and refuse further
    /// submissions. Returns how many replies were cancelled. Idempotent.
    pub async fn shutdown(&self) -> usize {
        let Some(mut tasks) = self.tasks.lock().await.take() else {
            return 0;
        };

        while tasks.try_join_next().is_some() {}
        let cancelled = tasks.len();
        tasks.shutdown().await;

        info!(session_id = %self.id(), cancelled, "conversation closed");
        let _ = self.shared.events.send(ChatEvent::SessionClosed {
            session_id: self.id(),
            cancelled_replies: cancelled,
        });

        cancelled
    }
}

impl std::fmt::Debug for ConversationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationController")
            .field("session_id", &self.shared.session_id)
            .field("reply_delay", &self.reply_delay)
            .finish_non_exhaustive()
    }
}
