//! Message log storage.

use serde::{Deserialize, Serialize};

use super::entry::{Message, MessageKind};

/// Ordered, append-only record of what the player has seen.
///
/// Entries are never edited. `clear` drops everything at once; the drain
/// cursor lets a front end fetch only what is new since its last call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    entries: Vec<Message>,
    #[serde(skip)]
    drained: usize,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn append(&mut self, message: Message) {
        self.entries.push(message);
    }

    /// Append a new message of `kind`.
    pub fn push(&mut self, kind: MessageKind, content: impl Into<String>) {
        self.append(Message::new(kind, content));
    }

    /// Get all entries.
    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.drained = 0;
    }

    /// Entries appended since the previous call.
    pub fn drain_new(&mut self) -> Vec<Message> {
        let fresh = self.entries[self.drained..].to_vec();
        self.drained = self.entries.len();
        fresh
    }
}
