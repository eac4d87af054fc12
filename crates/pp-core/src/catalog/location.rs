use serde::{Deserialize, Serialize};

use super::challenge::Challenge;
use super::npc::Npc;

/// A node in the location graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique location id.
    pub id: String,
    /// Display name, used for headings.
    pub name: String,
    /// Full description shown by `look` and on first visit.
    pub description: String,
    /// Outbound edges, in display order.
    #[serde(default)]
    pub connections: Vec<Connection>,
    /// Challenges bound to this location.
    #[serde(default)]
    pub challenges: Vec<Challenge>,
    /// Characters present at this location.
    #[serde(default)]
    pub npcs: Vec<Npc>,
}

/// A named directional edge to another location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Direction label the player types (`north`, `east`, ...).
    pub direction: String,
    /// Target location id.
    pub location_id: String,
    /// What the player sees looking this way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Location {
    /// Find the connection for a direction (case-insensitive).
    pub fn exit(&self, direction: &str) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.direction.eq_ignore_ascii_case(direction))
    }

    /// Find a challenge by id, completed or not.
    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    /// Find an NPC by id.
    pub fn npc(&self, id: &str) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.id == id)
    }
}
