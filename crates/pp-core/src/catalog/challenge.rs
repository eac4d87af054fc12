use std::fmt;

use serde::{Deserialize, Serialize};

/// A static puzzle bound to a location, resolved once per game.
///
/// Completion is never recorded here; it lives in
/// [`GameProgress`](crate::state::GameProgress).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Unique challenge id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Staged description shown when the challenge begins.
    pub description: String,
    /// How hard the challenge is.
    pub difficulty: Difficulty,
    /// Experience granted on success.
    pub xp_reward: u32,
    /// Insight granted on success.
    pub insight_reward: u32,
    /// Concept learned on first success.
    pub concept_id: String,
    /// Kind-specific data.
    #[serde(flatten)]
    pub kind: ChallengeKind,
}

/// Challenge difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Introductory.
    Easy,
    /// Some thought required.
    Medium,
    /// Demanding.
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// The four challenge kinds and their specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ChallengeKind {
    /// Pick the correct answer from a list.
    MultipleChoice {
        /// The question put to the player.
        question: String,
        /// Candidate answers in display order.
        choices: Vec<Choice>,
    },
    /// Finish a code template.
    CodeCompletion {
        /// Code shown to the player.
        code_template: String,
        /// Reference solution.
        solution: String,
        /// Hints revealed one at a time.
        #[serde(default)]
        hints: Vec<String>,
    },
    /// Solved by typing an exact command (usually a `cast`).
    Command {
        /// The full normalized command that solves the challenge.
        expected_command: String,
        /// Arguments of the expected command, informational.
        #[serde(default)]
        command_args: Vec<String>,
        /// Hints revealed one at a time.
        #[serde(default)]
        hints: Vec<String>,
    },
    /// A guardian with a stat block.
    Boss {
        /// The boss's stats.
        boss: BossStats,
    },
}

impl ChallengeKind {
    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MultipleChoice { .. } => "multiple-choice",
            Self::CodeCompletion { .. } => "code-completion",
            Self::Command { .. } => "command",
            Self::Boss { .. } => "boss",
        }
    }

    /// Hints for kinds that carry them; empty otherwise.
    pub fn hints(&self) -> &[String] {
        match self {
            Self::CodeCompletion { hints, .. } | Self::Command { hints, .. } => hints,
            Self::MultipleChoice { .. } | Self::Boss { .. } => &[],
        }
    }
}

/// One answer of a multiple-choice challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice id, unique within the challenge.
    pub id: String,
    /// Answer text.
    pub text: String,
    /// Whether picking this answer solves the challenge.
    pub is_correct: bool,
    /// Shown after the answer is judged.
    pub explanation: String,
}

/// Stat block of a boss challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossStats {
    /// Boss name.
    pub name: String,
    /// Starting health.
    pub health: u32,
    /// Attacks the boss can use.
    #[serde(default)]
    pub attacks: Vec<BossAttack>,
}

/// A single boss attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossAttack {
    /// Attack name.
    pub name: String,
    /// Flavor text.
    pub description: String,
    /// Damage dealt.
    pub damage: u32,
}

impl Challenge {
    /// Choices of a multiple-choice challenge; empty for other kinds.
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            ChallengeKind::MultipleChoice { choices, .. } => choices,
            _ => &[],
        }
    }

    /// Resolve a choice by id or by its 1-based position.
    pub fn choice(&self, key: &str) -> Option<&Choice> {
        let choices = self.choices();
        choices.iter().find(|c| c.id == key).or_else(|| {
            key.parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| choices.get(i))
        })
    }

    /// Whether typing `command` solves this challenge.
    pub fn is_solved_by_command(&self, command: &str) -> bool {
        matches!(&self.kind, ChallengeKind::Command { expected_command, .. } if expected_command == command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNE_PUZZLE: &str = r#"{
        "id": "runes",
        "name": "Rune Puzzle",
        "description": "Glowing runes.",
        "kind": "multiple-choice",
        "difficulty": "easy",
        "xp_reward": 50,
        "insight_reward": 10,
        "concept_id": "dunder_methods",
        "question": "Which method?",
        "choices": [
            {"id": "a", "text": "__getitem__", "is_correct": true, "explanation": "Yes."},
            {"id": "b", "text": "__index__", "is_correct": false, "explanation": "No."}
        ]
    }"#;

    #[test]
    fn deserialize_multiple_choice() {
        let challenge: Challenge = serde_json::from_str(RUNE_PUZZLE).unwrap();
        assert_eq!(challenge.kind.label(), "multiple-choice");
        assert_eq!(challenge.choices().len(), 2);
        assert_eq!(challenge.difficulty, Difficulty::Easy);
    }

    #[test]
    fn choice_by_id_or_position() {
        let challenge: Challenge = serde_json::from_str(RUNE_PUZZLE).unwrap();
        assert_eq!(challenge.choice("b").unwrap().text, "__index__");
        assert_eq!(challenge.choice("1").unwrap().id, "a");
        assert!(challenge.choice("0").is_none());
        assert!(challenge.choice("3").is_none());
        assert!(challenge.choice("zzz").is_none());
    }

    #[test]
    fn command_challenge_matches_exact_command() {
        let challenge: Challenge = serde_json::from_str(
            r#"{
                "id": "gate",
                "name": "Gate",
                "description": "Sealed.",
                "kind": "command",
                "difficulty": "easy",
                "xp_reward": 5,
                "insight_reward": 1,
                "concept_id": "sequence_types",
                "expected_command": "cast open_spell"
            }"#,
        )
        .unwrap();
        assert!(challenge.is_solved_by_command("cast open_spell"));
        assert!(!challenge.is_solved_by_command("cast other_spell"));
        assert!(challenge.kind.hints().is_empty());
    }

    #[test]
    fn boss_stats_deserialize() {
        let challenge: Challenge = serde_json::from_str(
            r#"{
                "id": "hydra",
                "name": "The GIL Hydra",
                "description": "Many heads, one lock.",
                "kind": "boss",
                "difficulty": "hard",
                "xp_reward": 200,
                "insight_reward": 50,
                "concept_id": "decorators",
                "boss": {
                    "name": "GIL Hydra",
                    "health": 300,
                    "attacks": [{"name": "Lock", "description": "Freezes threads.", "damage": 20}]
                }
            }"#,
        )
        .unwrap();
        match &challenge.kind {
            ChallengeKind::Boss { boss } => {
                assert_eq!(boss.health, 300);
                assert_eq!(boss.attacks[0].damage, 20);
            }
            other => panic!("expected boss, got {other:?}"),
        }
    }
}
