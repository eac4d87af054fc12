//! Mutable game state: player, inventory, progress and settings.
//!
//! Values here are only ever replaced wholesale by [`reduce`](crate::action::reduce);
//! the helpers below are read-only queries plus constructors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{MasteryTopic, Spell};

/// Mastery counters never exceed this value.
pub const MAX_MASTERY: u8 = 10;

/// Everything that changes during play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// The player character.
    pub player: Player,
    /// Exploration and challenge progress.
    pub progress: GameProgress,
    /// Player-adjustable settings.
    pub settings: Settings,
}

impl GameState {
    /// Fresh state for a player starting at `start_location`.
    pub fn new(start_location: impl Into<String>) -> Self {
        let start = start_location.into();
        Self {
            player: Player::new(start.clone()),
            progress: GameProgress::new(start),
            settings: Settings::default(),
        }
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Name given at start; empty until set.
    pub name: String,
    /// Level, experience, health and mastery.
    pub stats: PlayerStats,
    /// Spells, items and learned concepts.
    pub inventory: Inventory,
    /// Id of the location the player is at.
    pub current_location: String,
}

impl Player {
    /// A nameless level-1 player at `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            stats: PlayerStats::default(),
            inventory: Inventory::default(),
            current_location: location.into(),
        }
    }
}

/// Level, experience, health and mastery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience toward the next level.
    pub xp: u32,
    /// Experience threshold of the current level.
    pub xp_to_next_level: u32,
    /// Unbounded insight score.
    pub insight: u32,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Per-topic mastery.
    pub mastery: Mastery,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next_level: 100,
            insight: 0,
            health: 100,
            max_health: 100,
            mastery: Mastery::default(),
        }
    }
}

/// The five mastery counters, each in `0..=10`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mastery {
    /// Sequences, mappings and sets.
    pub data_structures: u8,
    /// Functions as objects.
    pub functions: u8,
    /// Classes and the data model.
    pub classes: u8,
    /// Descriptors and metaclasses.
    pub metaprogramming: u8,
    /// Iteration and comprehensions.
    pub control_flow: u8,
}

impl Mastery {
    /// Current value of one counter.
    pub fn get(&self, topic: MasteryTopic) -> u8 {
        match topic {
            MasteryTopic::DataStructures => self.data_structures,
            MasteryTopic::Functions => self.functions,
            MasteryTopic::Classes => self.classes,
            MasteryTopic::Metaprogramming => self.metaprogramming,
            MasteryTopic::ControlFlow => self.control_flow,
        }
    }

    /// Copy with `amount` added to one counter, clamped at [`MAX_MASTERY`].
    pub fn raised(mut self, topic: MasteryTopic, amount: u8) -> Self {
        let slot = match topic {
            MasteryTopic::DataStructures => &mut self.data_structures,
            MasteryTopic::Functions => &mut self.functions,
            MasteryTopic::Classes => &mut self.classes,
            MasteryTopic::Metaprogramming => &mut self.metaprogramming,
            MasteryTopic::ControlFlow => &mut self.control_flow,
        };
        *slot = slot.saturating_add(amount).min(MAX_MASTERY);
        self
    }
}

/// A carried item. Nothing grants items yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Item id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flavor text.
    pub description: String,
}

/// Spells, items and learned concepts, all in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Unlocked spell copies.
    pub spells: Vec<Spell>,
    /// Carried items.
    pub items: Vec<Item>,
    /// Learned concept ids, without duplicates.
    pub concepts_learned: Vec<String>,
}

impl Inventory {
    /// Look up a held spell by id.
    pub fn spell(&self, id: &str) -> Option<&Spell> {
        self.spells.iter().find(|s| s.id == id)
    }

    /// Whether a concept has been learned.
    pub fn knows_concept(&self, id: &str) -> bool {
        self.concepts_learned.iter().any(|c| c == id)
    }
}

/// Where the player has been and what they have solved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameProgress {
    /// Visited location ids in first-visit order.
    pub visited: Vec<String>,
    /// Completed challenge ids in completion order.
    pub completed_challenges: Vec<String>,
    /// Coarse stage of the game.
    pub stage: GameStage,
}

impl GameProgress {
    /// Progress with only the start location visited.
    pub fn new(start_location: impl Into<String>) -> Self {
        Self {
            visited: vec![start_location.into()],
            completed_challenges: Vec::new(),
            stage: GameStage::Intro,
        }
    }

    /// Whether a location has been visited.
    pub fn has_visited(&self, location_id: &str) -> bool {
        self.visited.iter().any(|v| v == location_id)
    }

    /// Whether a challenge has been completed.
    pub fn has_completed(&self, challenge_id: &str) -> bool {
        self.completed_challenges.iter().any(|c| c == challenge_id)
    }
}

/// Coarse stage of the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStage {
    /// Before any real progress.
    #[default]
    Intro,
    /// First areas explored.
    EarlyGame,
    /// Midway.
    MidGame,
    /// Approaching the end.
    LateGame,
    /// Final stretch.
    EndGame,
}

impl fmt::Display for GameStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intro => write!(f, "intro"),
            Self::EarlyGame => write!(f, "early-game"),
            Self::MidGame => write!(f, "mid-game"),
            Self::LateGame => write!(f, "late-game"),
            Self::EndGame => write!(f, "end-game"),
        }
    }
}

/// Player-adjustable settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// How fast deferred text arrives.
    pub text_speed: TextSpeed,
    /// Whether sound is on. Stored only.
    pub sound_enabled: bool,
    /// How much the help report shows.
    pub help_mode: HelpMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            text_speed: TextSpeed::Normal,
            sound_enabled: true,
            help_mode: HelpMode::Minimal,
        }
    }
}

/// Pacing of deferred messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSpeed {
    /// One and a half times the base delay.
    Slow,
    /// The base delay.
    #[default]
    Normal,
    /// Half the base delay.
    Fast,
    /// No delay at all.
    Instant,
}

impl TextSpeed {
    /// Scale a base delay in milliseconds.
    pub fn scale(self, base_ms: u64) -> u64 {
        match self {
            Self::Slow => base_ms + base_ms / 2,
            Self::Normal => base_ms,
            Self::Fast => base_ms / 2,
            Self::Instant => 0,
        }
    }
}

impl fmt::Display for TextSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slow => write!(f, "slow"),
            Self::Normal => write!(f, "normal"),
            Self::Fast => write!(f, "fast"),
            Self::Instant => write!(f, "instant"),
        }
    }
}

impl FromStr for TextSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "normal" => Ok(Self::Normal),
            "fast" => Ok(Self::Fast),
            "instant" => Ok(Self::Instant),
            other => Err(format!(
                "unknown text speed '{other}' (expected slow, normal, fast or instant)"
            )),
        }
    }
}

/// How much the help report shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelpMode {
    /// Core commands only.
    #[default]
    Minimal,
    /// Every command with examples.
    Detailed,
}

impl fmt::Display for HelpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::Detailed => write!(f, "detailed"),
        }
    }
}

impl FromStr for HelpMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "detailed" => Ok(Self::Detailed),
            other => Err(format!(
                "unknown help mode '{other}' (expected minimal or detailed)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_matches_new_game() {
        let state = GameState::new("starting_area");
        let stats = &state.player.stats;
        assert_eq!(stats.level, 1);
        assert_eq!(stats.xp, 0);
        assert_eq!(stats.xp_to_next_level, 100);
        assert_eq!((stats.health, stats.max_health), (100, 100));
        assert_eq!(stats.mastery, Mastery::default());
        assert_eq!(state.player.current_location, "starting_area");
        assert_eq!(state.progress.visited, vec!["starting_area".to_string()]);
        assert_eq!(state.progress.stage, GameStage::Intro);
        assert!(state.player.name.is_empty());
        assert_eq!(state.settings, Settings::default());
    }

    #[test]
    fn mastery_clamps_at_ten() {
        let m = Mastery::default()
            .raised(MasteryTopic::Functions, 7)
            .raised(MasteryTopic::Functions, 7);
        assert_eq!(m.get(MasteryTopic::Functions), MAX_MASTERY);
        assert_eq!(m.get(MasteryTopic::Classes), 0);
    }

    #[test]
    fn text_speed_scaling() {
        assert_eq!(TextSpeed::Slow.scale(1000), 1500);
        assert_eq!(TextSpeed::Normal.scale(1000), 1000);
        assert_eq!(TextSpeed::Fast.scale(1000), 500);
        assert_eq!(TextSpeed::Instant.scale(1000), 0);
    }

    #[test]
    fn settings_parse_from_str() {
        assert_eq!("FAST".parse::<TextSpeed>(), Ok(TextSpeed::Fast));
        assert!("warp".parse::<TextSpeed>().is_err());
        assert_eq!("detailed".parse::<HelpMode>(), Ok(HelpMode::Detailed));
    }

    #[test]
    fn stage_serializes_kebab_case() {
        let json = serde_json::to_string(&GameStage::EarlyGame).unwrap();
        assert_eq!(json, "\"early-game\"");
    }
}
