use serde::{Deserialize, Serialize};

/// A character the player can talk to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    /// Unique NPC id, typed after `talk`.
    pub id: String,
    /// Display name used as the speaker prefix.
    pub name: String,
    /// Shown by `look`.
    pub description: String,
    /// Node every new conversation starts at.
    pub initial_dialogue: String,
    /// Dialogue nodes, keyed by their ids.
    #[serde(default)]
    pub dialogue: Vec<DialogueNode>,
}

impl Npc {
    /// Look up a dialogue node by id.
    pub fn node(&self, id: &str) -> Option<&DialogueNode> {
        self.dialogue.iter().find(|n| n.id == id)
    }

    /// The node conversations start at.
    pub fn initial_node(&self) -> Option<&DialogueNode> {
        self.node(&self.initial_dialogue)
    }
}

/// One line of an NPC's dialogue tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    /// Node id, unique within the NPC.
    pub id: String,
    /// What the NPC says.
    pub text: String,
    /// Responses offered to the player.
    #[serde(default)]
    pub responses: Vec<ResponseOption>,
}

impl DialogueNode {
    /// Create a node with no responses.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            responses: Vec::new(),
        }
    }

    /// Add a response.
    pub fn with_response(mut self, response: ResponseOption) -> Self {
        self.responses.push(response);
        self
    }

    /// A node with no responses ends the conversation.
    pub fn is_terminal(&self) -> bool {
        self.responses.is_empty()
    }

    /// Resolve a response by id or by its 1-based position.
    pub fn response(&self, key: &str) -> Option<&ResponseOption> {
        self.responses.iter().find(|r| r.id == key).or_else(|| {
            key.parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| self.responses.get(i))
        })
    }
}

/// A response the player may pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseOption {
    /// Response id, unique within the node.
    pub id: String,
    /// Text shown to the player.
    pub text: String,
    /// Node to continue with; `None` ends the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl ResponseOption {
    /// Create a response that ends the conversation.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            next: None,
        }
    }

    /// Continue with the given node.
    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }
}
