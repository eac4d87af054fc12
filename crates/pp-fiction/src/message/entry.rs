//! Message and notification types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a message should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    /// Story text and location descriptions.
    Narration,
    /// Echoes of what the player typed or picked.
    PlayerInput,
    /// Reports, prompts and notices.
    System,
    /// Boss fights.
    Combat,
    /// Item listings.
    Item,
    /// Spell casts and spell listings.
    Spell,
    /// Code snippets.
    Code,
    /// Failures.
    Error,
    /// Successes.
    Success,
    /// Concept explanations; supports inline markup.
    Concept,
}

impl MessageKind {
    /// Every kind, in declaration order.
    pub const ALL: [MessageKind; 10] = [
        Self::Narration,
        Self::PlayerInput,
        Self::System,
        Self::Combat,
        Self::Item,
        Self::Spell,
        Self::Code,
        Self::Error,
        Self::Success,
        Self::Concept,
    ];

    /// The kebab-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Narration => "narration",
            Self::PlayerInput => "player-input",
            Self::System => "system",
            Self::Combat => "combat",
            Self::Item => "item",
            Self::Spell => "spell",
            Self::Code => "code",
            Self::Error => "error",
            Self::Success => "success",
            Self::Concept => "concept",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry of the message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique id.
    pub id: Uuid,
    /// Text content, possibly with heading or inline markup.
    pub content: String,
    /// Rendering kind.
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped now.
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            kind,
            timestamp: Utc::now(),
        }
    }

    /// Narration shorthand.
    pub fn narration(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Narration, content)
    }

    /// System shorthand.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageKind::System, content)
    }

    /// Heading level: the number of leading `#` characters.
    ///
    /// Narration, system and concept text may be headings. Code and echoed
    /// input never are, since a Python comment also starts with `#`.
    pub fn heading_level(&self) -> Option<usize> {
        if !matches!(
            self.kind,
            MessageKind::Narration | MessageKind::System | MessageKind::Concept
        ) {
            return None;
        }
        let level = self.content.chars().take_while(|&c| c == '#').count();
        (level > 0).then_some(level)
    }

    /// Content without the heading marker.
    pub fn heading_text(&self) -> &str {
        match self.heading_level() {
            Some(level) => self.content[level..].trim_start(),
            None => &self.content,
        }
    }
}

/// A short out-of-band announcement, such as a newly unlocked spell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Headline.
    pub title: String,
    /// Detail line.
    pub description: String,
}

impl Notification {
    /// Create a notification.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels() {
        assert_eq!(Message::narration("# Academy").heading_level(), Some(1));
        assert_eq!(Message::system("## Python Mastery").heading_level(), Some(2));
        assert_eq!(Message::narration("### Examples:").heading_text(), "Examples:");
        assert_eq!(Message::narration("Plain text").heading_level(), None);
        assert_eq!(Message::narration("#Secret Library").heading_level(), Some(1));
        assert_eq!(Message::narration("##Vault").heading_text(), "Vault");
        let code = Message::new(MessageKind::Code, "# Your list comprehension:");
        assert_eq!(code.heading_level(), None);
        assert_eq!(code.heading_text(), "# Your list comprehension:");
        assert_eq!(Message::new(MessageKind::PlayerInput, "# hi").heading_level(), None);
    }

    #[test]
    fn kind_serializes_kebab_case() {
        for kind in MessageKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn message_json_shape() {
        let msg = Message::new(MessageKind::PlayerInput, "> look");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "player-input");
        assert_eq!(value["content"], "> look");
        assert!(value["id"].is_string());
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn ids_are_unique() {
        let a = Message::system("a");
        let b = Message::system("a");
        assert_ne!(a.id, b.id);
    }
}
