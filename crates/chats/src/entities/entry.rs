use serde::Serialize;

/// Who authored a chat entry.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrigin {
    User,
    Bot,
}

impl EntryOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryOrigin::User => "user",
            EntryOrigin::Bot => "bot",
        }
    }
}

impl std::fmt::Display for EntryOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a conversation.
///
/// Entries are only created by [`Conversation::append`](super::Conversation::append)
/// and expose no setters, so they cannot change once logged.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatEntry {
    id: u64,
    #[serde(rename = "from")]
    origin: EntryOrigin,
    text: String,
}

impl ChatEntry {
    pub(crate) fn new(id: u64, origin: EntryOrigin, text: String) -> Self {
        Self { id, origin, text }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn origin(&self) -> EntryOrigin {
        self.origin
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bot(&self) -> bool {
        self.origin == EntryOrigin::Bot
    }
}
