//! The append-only message log behind a chat screen.

use super::entry::{ChatEntry, EntryOrigin};

/// First seed message shown when a chat screen opens.
pub const SEED_REMINDER: &str =
    "Sasa! Time to send your 1K contribution for July. Please send via M-Pesa before the 15th!";

/// Second seed message shown when a chat screen opens.
pub const SEED_GREETING: &str = "How can I help you today?";

/// Ordered, append-only sequence of [`ChatEntry`] values.
///
/// Ids come from a counter owned by the log, so two entries appended in the
/// same instant still get distinct, strictly increasing ids.
#[derive(Debug, Clone)]
pub struct Conversation {
    entries: Vec<ChatEntry>,
    next_id: u64,
}

impl Conversation {
    /// An empty log whose first entry will get id 1.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// A log holding the two bot messages every chat screen starts with.
    pub fn seeded() -> Self {
        let mut conversation = Self::new();
        conversation.append(EntryOrigin::Bot, SEED_REMINDER);
        conversation.append(EntryOrigin::Bot, SEED_GREETING);
        conversation
    }

    /// Add an entry at the tail and return it.
    ///
    /// Blank text is refused with `None` and consumes no id.
    pub fn append(&mut self, origin: EntryOrigin, text: impl Into<String>) -> Option<&ChatEntry> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(ChatEntry::new(id, origin, text));
        self.entries.last()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_log_starts_with_two_bot_entries() {
        let conversation = Conversation::seeded();

        assert_eq!(conversation.len(), 2);
        assert!(conversation.entries().iter().all(ChatEntry::is_bot));
        assert_eq!(conversation.entries()[0].text(), SEED_REMINDER);
        assert_eq!(conversation.entries()[1].text(), SEED_GREETING);
    }

    #[test]
    fn append_adds_at_tail_with_increasing_ids() {
        let mut conversation = Conversation::seeded();

        let user_id = conversation.append(EntryOrigin::User, "sent").map(ChatEntry::id);
        let bot_id = conversation.append(EntryOrigin::Bot, "thanks").map(ChatEntry::id);

        assert!(bot_id > user_id);
        assert_eq!(conversation.last().map(ChatEntry::text), Some("thanks"));

        let ids: Vec<u64> = conversation.entries().iter().map(ChatEntry::id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn append_never_touches_earlier_entries() {
        let mut conversation = Conversation::seeded();
        let before: Vec<ChatEntry> = conversation.entries().to_vec();

        conversation.append(EntryOrigin::User, "hello");

        assert_eq!(&conversation.entries()[..before.len()], before.as_slice());
    }

    #[test]
    fn blank_text_is_refused_without_consuming_an_id() {
        let mut conversation = Conversation::new();

        assert!(conversation.append(EntryOrigin::User, "").is_none());
        assert!(conversation.append(EntryOrigin::Bot, "  \n").is_none());
        assert!(conversation.is_empty());

        let first = conversation.append(EntryOrigin::User, "hello").map(ChatEntry::id);
        assert_eq!(first, Some(1));
    }

    #[test]
    fn entries_serialize_with_origin_as_from() {
        let mut conversation = Conversation::new();
        conversation.append(EntryOrigin::User, "hi");

        let value = serde_json::to_value(&conversation.entries()[0]).expect("serialize entry");
        assert_eq!(value["id"], 1);
        assert_eq!(value["from"], "user");
        assert_eq!(value["text"], "hi");
    }
}
