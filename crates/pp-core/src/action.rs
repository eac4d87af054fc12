//! The closed set of state transitions and the reducer that applies them.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, MasteryTopic};
use crate::state::{GameStage, GameState, HelpMode, TextSpeed};

/// A named state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Set the current location and mark it visited.
    MovePlayer(String),
    /// Record a challenge as completed.
    CompleteChallenge(String),
    /// Add experience, levelling up at most once.
    GainXp(u32),
    /// Add insight.
    GainInsight(u32),
    /// Raise the level, threshold and maximum health.
    LevelUp,
    /// Record a concept as learned.
    LearnConcept(String),
    /// Add an unlocked copy of a catalog spell.
    UnlockSpell(String),
    /// Replace the player's name.
    SetPlayerName(String),
    /// Replace one setting.
    ToggleSetting(Setting),
    /// Raise one mastery counter.
    GainMastery(MasteryTopic, u8),
    /// Replace the game stage.
    SetStage(GameStage),
}

/// One setting with its new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Setting {
    /// Text pacing.
    TextSpeed(TextSpeed),
    /// Sound on or off.
    Sound(bool),
    /// Help verbosity.
    HelpMode(HelpMode),
}

/// Apply `action` to `state`, returning the next state.
///
/// Pure and total: the input is never modified and no action fails. Ids
/// that are already recorded (visited locations, completed challenges,
/// learned concepts, held spells) are not recorded twice, and an unknown
/// spell id leaves the state unchanged.
pub fn reduce(state: &GameState, action: &Action, catalog: &Catalog) -> GameState {
    let mut next = state.clone();
    match action {
        Action::MovePlayer(location_id) => {
            next.player.current_location = location_id.clone();
            push_unique(&mut next.progress.visited, location_id);
        }
        Action::CompleteChallenge(challenge_id) => {
            push_unique(&mut next.progress.completed_challenges, challenge_id);
        }
        Action::GainXp(amount) => {
            let stats = &mut next.player.stats;
            let total = stats.xp.saturating_add(*amount);
            if total >= stats.xp_to_next_level {
                stats.level += 1;
                stats.xp = total - stats.xp_to_next_level;
                stats.xp_to_next_level = next_threshold(stats.xp_to_next_level);
            } else {
                stats.xp = total;
            }
        }
        Action::GainInsight(amount) => {
            let stats = &mut next.player.stats;
            stats.insight = stats.insight.saturating_add(*amount);
        }
        Action::LevelUp => {
            let stats = &mut next.player.stats;
            stats.level += 1;
            stats.xp_to_next_level = next_threshold(stats.xp_to_next_level);
            stats.max_health = stats.max_health.saturating_add(20);
            stats.health = stats.max_health;
        }
        Action::LearnConcept(concept_id) => {
            push_unique(&mut next.player.inventory.concepts_learned, concept_id);
        }
        Action::UnlockSpell(spell_id) => match catalog.spell(spell_id) {
            Some(spell) => {
                let spells = &mut next.player.inventory.spells;
                if !spells.iter().any(|s| s.id == spell.id) {
                    spells.push(spell.unlocked_copy());
                }
            }
            None => {
                tracing::warn!(spell = %spell_id, "unlock of unknown spell ignored");
            }
        },
        Action::SetPlayerName(name) => {
            next.player.name = name.clone();
        }
        Action::ToggleSetting(setting) => match *setting {
            Setting::TextSpeed(speed) => next.settings.text_speed = speed,
            Setting::Sound(on) => next.settings.sound_enabled = on,
            Setting::HelpMode(mode) => next.settings.help_mode = mode,
        },
        Action::GainMastery(topic, amount) => {
            let mastery = next.player.stats.mastery;
            next.player.stats.mastery = mastery.raised(*topic, *amount);
        }
        Action::SetStage(stage) => {
            next.progress.stage = *stage;
        }
    }
    tracing::debug!(?action, "state reduced");
    next
}

/// Threshold × 1.5, rounded down.
fn next_threshold(threshold: u32) -> u32 {
    let scaled = u64::from(threshold) * 3 / 2;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

fn push_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MAX_MASTERY;
    use proptest::prelude::*;

    fn setup() -> (Catalog, GameState) {
        let catalog = Catalog::builtin().unwrap();
        let state = GameState::new(catalog.start_location());
        (catalog, state)
    }

    #[test]
    fn move_player_marks_visited() {
        let (catalog, state) = setup();
        let next = reduce(
            &state,
            &Action::MovePlayer("data_structure_caves".into()),
            &catalog,
        );
        assert_eq!(next.player.current_location, "data_structure_caves");
        assert_eq!(next.progress.visited, vec!["starting_area", "data_structure_caves"]);
        // input untouched
        assert_eq!(state.player.current_location, "starting_area");
    }

    #[test]
    fn revisit_does_not_duplicate() {
        let (catalog, state) = setup();
        let there = reduce(&state, &Action::MovePlayer("sequence_chamber".into()), &catalog);
        let back = reduce(&there, &Action::MovePlayer("starting_area".into()), &catalog);
        assert_eq!(back.progress.visited, vec!["starting_area", "sequence_chamber"]);
    }

    #[test]
    fn gain_xp_below_threshold() {
        let (catalog, state) = setup();
        let next = reduce(&state, &Action::GainXp(50), &catalog);
        assert_eq!(next.player.stats.xp, 50);
        assert_eq!(next.player.stats.level, 1);
    }

    #[test]
    fn gain_xp_levels_up_once_with_remainder() {
        let (catalog, state) = setup();
        let next = reduce(&state, &Action::GainXp(130), &catalog);
        assert_eq!(next.player.stats.level, 2);
        assert_eq!(next.player.stats.xp, 30);
        assert_eq!(next.player.stats.xp_to_next_level, 150);
        assert_eq!(next.player.stats.max_health, 100);
    }

    #[test]
    fn gain_xp_never_loops() {
        let (catalog, state) = setup();
        let next = reduce(&state, &Action::GainXp(1000), &catalog);
        assert_eq!(next.player.stats.level, 2);
        assert_eq!(next.player.stats.xp, 900);
    }

    #[test]
    fn level_up_restores_health() {
        let (catalog, mut state) = setup();
        state.player.stats.health = 40;
        let next = reduce(&state, &Action::LevelUp, &catalog);
        assert_eq!(next.player.stats.level, 2);
        assert_eq!(next.player.stats.max_health, 120);
        assert_eq!(next.player.stats.health, 120);
        assert_eq!(next.player.stats.xp_to_next_level, 150);
    }

    #[test]
    fn duplicates_filtered() {
        let (catalog, state) = setup();
        let once = reduce(&state, &Action::CompleteChallenge("x".into()), &catalog);
        let twice = reduce(&once, &Action::CompleteChallenge("x".into()), &catalog);
        assert_eq!(twice.progress.completed_challenges, vec!["x"]);

        let once = reduce(&state, &Action::LearnConcept("decorators".into()), &catalog);
        let twice = reduce(&once, &Action::LearnConcept("decorators".into()), &catalog);
        assert_eq!(twice.player.inventory.concepts_learned, vec!["decorators"]);

        let once = reduce(&state, &Action::UnlockSpell("decorator_spell".into()), &catalog);
        let twice = reduce(&once, &Action::UnlockSpell("decorator_spell".into()), &catalog);
        assert_eq!(twice.player.inventory.spells.len(), 1);
        assert!(twice.player.inventory.spells[0].unlocked);
    }

    #[test]
    fn unlock_unknown_spell_is_noop() {
        let (catalog, state) = setup();
        let next = reduce(&state, &Action::UnlockSpell("fireball".into()), &catalog);
        assert_eq!(next, state);
    }

    #[test]
    fn settings_and_name() {
        let (catalog, state) = setup();
        let next = reduce(&state, &Action::SetPlayerName("Ada".into()), &catalog);
        let next = reduce(
            &next,
            &Action::ToggleSetting(Setting::TextSpeed(TextSpeed::Fast)),
            &catalog,
        );
        let next = reduce(&next, &Action::ToggleSetting(Setting::Sound(false)), &catalog);
        let next = reduce(
            &next,
            &Action::ToggleSetting(Setting::HelpMode(HelpMode::Detailed)),
            &catalog,
        );
        let next = reduce(&next, &Action::SetStage(GameStage::MidGame), &catalog);
        assert_eq!(next.player.name, "Ada");
        assert_eq!(next.settings.text_speed, TextSpeed::Fast);
        assert!(!next.settings.sound_enabled);
        assert_eq!(next.settings.help_mode, HelpMode::Detailed);
        assert_eq!(next.progress.stage, GameStage::MidGame);
    }

    #[test]
    fn action_serializes_with_type_tag() {
        let json = serde_json::to_string(&Action::GainXp(5)).unwrap();
        assert_eq!(json, r#"{"type":"GAIN_XP","payload":5}"#);
    }

    fn topic() -> impl Strategy<Value = MasteryTopic> {
        prop::sample::select(MasteryTopic::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn xp_stays_below_threshold(raw in prop::collection::vec(any::<u32>(), 1..40)) {
            let (catalog, mut state) = setup();
            for r in raw {
                let amount = r % (state.player.stats.xp_to_next_level + 1);
                state = reduce(&state, &Action::GainXp(amount), &catalog);
                prop_assert!(state.player.stats.xp < state.player.stats.xp_to_next_level);
            }
        }

        #[test]
        fn level_up_adds_twenty_max_health(ups in 1usize..10, damage in 0u32..100) {
            let (catalog, mut state) = setup();
            for _ in 0..ups {
                state.player.stats.health = state.player.stats.health.saturating_sub(damage);
                let before = state.player.stats.max_health;
                state = reduce(&state, &Action::LevelUp, &catalog);
                prop_assert_eq!(state.player.stats.max_health, before + 20);
                prop_assert_eq!(state.player.stats.health, state.player.stats.max_health);
            }
        }

        #[test]
        fn unknown_spell_leaves_state_unchanged(id in "[a-z_]{1,24}") {
            let (catalog, state) = setup();
            prop_assume!(catalog.spell(&id).is_none());
            prop_assert_eq!(reduce(&state, &Action::UnlockSpell(id), &catalog), state);
        }

        #[test]
        fn first_visit_appends_exactly_one(order in Just(vec![
            "data_structure_caves", "sequence_chamber", "mapping_alcove", "function_groves",
        ]).prop_shuffle()) {
            let (catalog, mut state) = setup();
            for id in order {
                let before = state.progress.visited.clone();
                state = reduce(&state, &Action::MovePlayer(id.to_string()), &catalog);
                prop_assert_eq!(state.progress.visited.len(), before.len() + 1);
                prop_assert_eq!(&state.progress.visited[..before.len()], &before[..]);
                prop_assert_eq!(state.progress.visited.last().map(String::as_str), Some(id));
            }
        }

        #[test]
        fn mastery_never_exceeds_cap(gains in prop::collection::vec((topic(), any::<u8>()), 0..30)) {
            let (catalog, mut state) = setup();
            for (topic, amount) in gains {
                state = reduce(&state, &Action::GainMastery(topic, amount), &catalog);
                for t in MasteryTopic::ALL {
                    prop_assert!(state.player.stats.mastery.get(t) <= MAX_MASTERY);
                }
            }
        }
    }
}
