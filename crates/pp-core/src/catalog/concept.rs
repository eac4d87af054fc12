use std::fmt;

use serde::{Deserialize, Serialize};

/// A static unit of topical knowledge the player learns by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// Unique concept id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the concept is about.
    pub description: String,
    /// Book chapter the concept comes from.
    pub reference: String,
    /// Mastery counter raised when the concept is learned.
    pub topic: MasteryTopic,
    /// Example snippets, in display order.
    #[serde(default)]
    pub examples: Vec<String>,
}

/// The five per-topic mastery counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryTopic {
    /// Sequences, mappings and sets.
    DataStructures,
    /// Functions as objects, closures, decorators.
    Functions,
    /// Classes and the data model.
    Classes,
    /// Descriptors, metaclasses, attribute access.
    Metaprogramming,
    /// Iteration, comprehensions, context managers.
    ControlFlow,
}

impl MasteryTopic {
    /// All topics in report order.
    pub const ALL: [MasteryTopic; 5] = [
        Self::DataStructures,
        Self::Functions,
        Self::Classes,
        Self::ControlFlow,
        Self::Metaprogramming,
    ];
}

impl fmt::Display for MasteryTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataStructures => write!(f, "Data Structures"),
            Self::Functions => write!(f, "Functions"),
            Self::Classes => write!(f, "Classes"),
            Self::Metaprogramming => write!(f, "Metaprogramming"),
            Self::ControlFlow => write!(f, "Control Flow"),
        }
    }
}
