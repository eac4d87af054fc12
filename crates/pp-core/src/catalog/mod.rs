//! The static content catalog: locations, concepts and spells.
//!
//! A catalog is loaded once from a JSON document and never mutated. All
//! cross references (connections, concept ids, dialogue links) are checked
//! at load time, so lookups during play can treat a missing id as a player
//! error rather than a content bug.

mod challenge;
mod concept;
mod location;
mod npc;
mod spell;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

pub use challenge::{BossAttack, BossStats, Challenge, ChallengeKind, Choice, Difficulty};
pub use concept::{Concept, MasteryTopic};
pub use location::{Connection, Location};
pub use npc::{DialogueNode, Npc, ResponseOption};
pub use spell::Spell;

use crate::error::{CatalogError, CatalogResult};
use crate::state::GameProgress;

/// The content shipped with the game.
const BUILTIN_CONTENT: &str = include_str!("../../content/pythonic_path.json");

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Game title shown in the welcome banner.
    pub title: String,
    /// Where new players begin.
    pub start_location: String,
    /// All locations.
    pub locations: Vec<Location>,
    /// All concepts.
    #[serde(default)]
    pub concepts: Vec<Concept>,
    /// All spells.
    #[serde(default)]
    pub spells: Vec<Spell>,
}

/// Validated, indexed, read-only game content.
#[derive(Debug, Clone)]
pub struct Catalog {
    doc: CatalogDocument,
    by_location: HashMap<String, usize>,
    by_concept: HashMap<String, usize>,
    by_spell: HashMap<String, usize>,
}

impl Catalog {
    /// The catalog embedded in the crate.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json(BUILTIN_CONTENT)
    }

    /// Parse and validate a JSON catalog document.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Validate a document and build lookup indexes.
    pub fn from_document(doc: CatalogDocument) -> CatalogResult<Self> {
        let by_location = index(doc.locations.iter().map(|l| l.id.as_str()), "location")?;
        let by_concept = index(doc.concepts.iter().map(|c| c.id.as_str()), "concept")?;
        let by_spell = index(doc.spells.iter().map(|s| s.id.as_str()), "spell")?;

        let catalog = Self {
            doc,
            by_location,
            by_concept,
            by_spell,
        };
        catalog.validate()?;

        tracing::debug!(
            locations = catalog.doc.locations.len(),
            concepts = catalog.doc.concepts.len(),
            spells = catalog.doc.spells.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn validate(&self) -> CatalogResult<()> {
        if !self.by_location.contains_key(&self.doc.start_location) {
            return Err(CatalogError::MissingStart(self.doc.start_location.clone()));
        }

        let mut challenge_ids = HashSet::new();
        for location in &self.doc.locations {
            for conn in &location.connections {
                if !self.by_location.contains_key(&conn.location_id) {
                    return Err(dangling(
                        format!("location \"{}\" ({})", location.id, conn.direction),
                        "location",
                        &conn.location_id,
                    ));
                }
            }

            for challenge in &location.challenges {
                if !challenge_ids.insert(challenge.id.as_str()) {
                    return Err(CatalogError::DuplicateId {
                        kind: "challenge",
                        id: challenge.id.clone(),
                    });
                }
                if !self.by_concept.contains_key(&challenge.concept_id) {
                    return Err(dangling(
                        format!("challenge \"{}\"", challenge.id),
                        "concept",
                        &challenge.concept_id,
                    ));
                }
                validate_challenge(challenge)?;
            }

            let mut npc_ids = HashSet::new();
            for npc in &location.npcs {
                if !npc_ids.insert(npc.id.as_str()) {
                    return Err(CatalogError::DuplicateId {
                        kind: "npc",
                        id: npc.id.clone(),
                    });
                }
                validate_npc(npc)?;
            }
        }

        for spell in &self.doc.spells {
            if !self.by_concept.contains_key(&spell.concept_id) {
                return Err(dangling(
                    format!("spell \"{}\"", spell.id),
                    "concept",
                    &spell.concept_id,
                ));
            }
        }
        Ok(())
    }

    /// Game title.
    pub fn title(&self) -> &str {
        &self.doc.title
    }

    /// Id of the location new players start at.
    pub fn start_location(&self) -> &str {
        &self.doc.start_location
    }

    /// All locations in document order.
    pub fn locations(&self) -> &[Location] {
        &self.doc.locations
    }

    /// All concepts in document order.
    pub fn concepts(&self) -> &[Concept] {
        &self.doc.concepts
    }

    /// All spells in document order.
    pub fn spells(&self) -> &[Spell] {
        &self.doc.spells
    }

    /// Look up a location by id.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.by_location.get(id).map(|&i| &self.doc.locations[i])
    }

    /// Look up a concept by id.
    pub fn concept(&self, id: &str) -> Option<&Concept> {
        self.by_concept.get(id).map(|&i| &self.doc.concepts[i])
    }

    /// Look up a spell by id.
    pub fn spell(&self, id: &str) -> Option<&Spell> {
        self.by_spell.get(id).map(|&i| &self.doc.spells[i])
    }

    /// The first spell granted by a concept, if any.
    pub fn spell_for_concept(&self, concept_id: &str) -> Option<&Spell> {
        self.doc.spells.iter().find(|s| s.concept_id == concept_id)
    }

    /// Challenges at a location that are not yet completed, in document order.
    pub fn active_challenges<'a>(
        &'a self,
        location_id: &str,
        progress: &GameProgress,
    ) -> Vec<&'a Challenge> {
        self.location(location_id)
            .map(|loc| {
                loc.challenges
                    .iter()
                    .filter(|c| !progress.has_completed(&c.id))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn index<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: &'static str,
) -> CatalogResult<HashMap<String, usize>> {
    let mut map = HashMap::new();
    for (i, id) in ids.enumerate() {
        if map.insert(id.to_string(), i).is_some() {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(map)
}

fn dangling(from: String, kind: &'static str, id: &str) -> CatalogError {
    CatalogError::DanglingReference {
        from,
        kind,
        id: id.to_string(),
    }
}

fn validate_challenge(challenge: &Challenge) -> CatalogResult<()> {
    let invalid = |reason| CatalogError::InvalidChallenge {
        id: challenge.id.clone(),
        reason,
    };
    match &challenge.kind {
        ChallengeKind::MultipleChoice { choices, .. } => {
            if choices.is_empty() {
                return Err(invalid("multiple-choice challenge has no choices"));
            }
            if !choices.iter().any(|c| c.is_correct) {
                return Err(invalid("multiple-choice challenge has no correct choice"));
            }
        }
        ChallengeKind::CodeCompletion { solution, .. } => {
            if solution.trim().is_empty() {
                return Err(invalid("code-completion challenge has an empty solution"));
            }
        }
        ChallengeKind::Command {
            expected_command, ..
        } => {
            if expected_command.trim().is_empty() {
                return Err(invalid("command challenge has no expected command"));
            }
        }
        ChallengeKind::Boss { .. } => {}
    }
    Ok(())
}

fn validate_npc(npc: &Npc) -> CatalogResult<()> {
    if npc.initial_node().is_none() {
        return Err(dangling(
            format!("npc \"{}\"", npc.id),
            "dialogue node",
            &npc.initial_dialogue,
        ));
    }
    for node in &npc.dialogue {
        for response in &node.responses {
            if let Some(next) = &response.next {
                if npc.node(next).is_none() {
                    return Err(dangling(
                        format!("npc \"{}\" response \"{}\"", npc.id, response.id),
                        "dialogue node",
                        next,
                    ));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(locations: &str) -> String {
        format!(
            r#"{{
                "title": "Test",
                "start_location": "a",
                "locations": {locations},
                "concepts": [{{
                    "id": "c1", "name": "C1", "description": "d", "reference": "r",
                    "topic": "functions", "examples": []
                }}],
                "spells": []
            }}"#
        )
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.start_location(), "starting_area");
        assert_eq!(catalog.locations().len(), 5);
        assert_eq!(catalog.concepts().len(), 5);
        assert_eq!(catalog.spells().len(), 5);
        assert!(catalog.location("data_structure_caves").is_some());
        assert!(catalog.spell("list_comprehension_spell").is_some());
    }

    #[test]
    fn spell_for_concept_finds_match() {
        let catalog = Catalog::builtin().unwrap();
        let spell = catalog.spell_for_concept("dunder_methods").unwrap();
        assert_eq!(spell.id, "dunder_call_spell");
        assert!(catalog.spell_for_concept("nope").is_none());
    }

    #[test]
    fn active_challenges_skip_completed() {
        let catalog = Catalog::builtin().unwrap();
        let mut progress = GameProgress::new("starting_area");
        let before = catalog.active_challenges("sequence_chamber", &progress);
        assert_eq!(before.len(), 3);

        progress.completed_challenges.push("list_vs_tuple".to_string());
        let after = catalog.active_challenges("sequence_chamber", &progress);
        assert_eq!(after.len(), 2);
        assert!(after.iter().all(|c| c.id != "list_vs_tuple"));
    }

    #[test]
    fn active_challenges_unknown_location_is_empty() {
        let catalog = Catalog::builtin().unwrap();
        let progress = GameProgress::new("starting_area");
        assert!(catalog.active_challenges("nowhere", &progress).is_empty());
    }

    #[test]
    fn rejects_missing_start() {
        let json = minimal(r#"[{"id": "b", "name": "B", "description": "d"}]"#);
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CatalogError::MissingStart(id) if id == "a"));
    }

    #[test]
    fn rejects_dangling_connection() {
        let json = minimal(
            r#"[{"id": "a", "name": "A", "description": "d",
                 "connections": [{"direction": "north", "location_id": "z"}]}]"#,
        );
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CatalogError::DanglingReference { kind: "location", .. }));
    }

    #[test]
    fn rejects_duplicate_location() {
        let json = minimal(
            r#"[{"id": "a", "name": "A", "description": "d"},
                {"id": "a", "name": "A2", "description": "d"}]"#,
        );
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { kind: "location", .. }));
    }

    #[test]
    fn rejects_unknown_dialogue_link() {
        let json = minimal(
            r#"[{"id": "a", "name": "A", "description": "d",
                 "npcs": [{"id": "n", "name": "N", "description": "d",
                           "initial_dialogue": "hi",
                           "dialogue": [{"id": "hi", "text": "Hi",
                                         "responses": [{"id": "x", "text": "X", "next": "gone"}]}]}]}]"#,
        );
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CatalogError::DanglingReference { kind: "dialogue node", .. }));
    }

    #[test]
    fn rejects_choice_challenge_without_correct_answer() {
        let json = minimal(
            r#"[{"id": "a", "name": "A", "description": "d",
                 "challenges": [{"id": "q", "name": "Q", "description": "d",
                                 "kind": "multiple-choice", "difficulty": "easy",
                                 "xp_reward": 1, "insight_reward": 1, "concept_id": "c1",
                                 "question": "?",
                                 "choices": [{"id": "x", "text": "X", "is_correct": false, "explanation": "e"}]}]}]"#,
        );
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidChallenge { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
