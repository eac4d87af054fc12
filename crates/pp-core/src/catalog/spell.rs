use serde::{Deserialize, Serialize};

/// An ability tied to a concept.
///
/// Catalog entries are always locked; the player's inventory holds unlocked
/// copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    /// Unique spell id, typed after `cast`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flavor description.
    pub description: String,
    /// What casting it does.
    pub effect: String,
    /// The code the spell stands for.
    pub code: String,
    /// Whether this copy can be cast.
    #[serde(default)]
    pub unlocked: bool,
    /// Concept that grants the spell.
    pub concept_id: String,
}

impl Spell {
    /// An unlocked copy of this spell.
    pub fn unlocked_copy(&self) -> Self {
        Self {
            unlocked: true,
            ..self.clone()
        }
    }
}
