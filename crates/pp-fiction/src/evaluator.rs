//! Checking answers and computing the rewards of a solved challenge.

use pp_core::catalog::{Challenge, ChallengeKind, Choice, Concept, Spell};
use pp_core::{Action, Catalog, GameProgress, GameStage, GameState};

use crate::error::{FictionError, FictionResult};

/// Resolve the picked answer of a multiple-choice challenge.
pub fn judge_choice<'a>(challenge: &'a Challenge, key: &str) -> FictionResult<&'a Choice> {
    if !matches!(challenge.kind, ChallengeKind::MultipleChoice { .. }) {
        return Err(wrong_kind(challenge));
    }
    challenge
        .choice(key)
        .ok_or_else(|| FictionError::InvalidChoice(key.to_string()))
}

/// Whether `submitted` solves a code-completion challenge.
pub fn judge_code(challenge: &Challenge, submitted: &str) -> FictionResult<bool> {
    match &challenge.kind {
        ChallengeKind::CodeCompletion { solution, .. } => {
            Ok(normalize_code(solution) == normalize_code(submitted))
        }
        _ => Err(wrong_kind(challenge)),
    }
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn normalize_code(code: &str) -> String {
    code.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The first unfinished command challenge at `location_id` that `command`
/// solves.
pub fn command_challenge<'a>(
    catalog: &'a Catalog,
    location_id: &str,
    progress: &GameProgress,
    command: &str,
) -> Option<&'a Challenge> {
    catalog
        .active_challenges(location_id, progress)
        .into_iter()
        .find(|c| c.is_solved_by_command(command))
}

fn wrong_kind(challenge: &Challenge) -> FictionError {
    let how = match challenge.kind {
        ChallengeKind::MultipleChoice { .. } => "Use `answer <number>`.",
        ChallengeKind::CodeCompletion { .. } => "Use `submit <code>`.",
        ChallengeKind::Command { .. } => "Enter the right command.",
        ChallengeKind::Boss { .. } => "It must be overcome another way.",
    };
    FictionError::WrongChallengeKind {
        name: challenge.name.clone(),
        how,
    }
}

/// Everything a correct resolution grants.
#[derive(Debug, Clone)]
pub struct Rewards<'a> {
    /// Actions to apply, in order.
    pub actions: Vec<Action>,
    /// The concept learned for the first time, if any.
    pub concept: Option<&'a Concept>,
    /// The spell unlocked for the first time, if any.
    pub spell: Option<&'a Spell>,
}

/// Rewards for solving `challenge` from `state`.
///
/// Completion, experience and insight are always granted. A concept the
/// player does not know yet is learned, raises its mastery topic by one and
/// unlocks the first catalog spell bound to it.
pub fn rewards<'a>(challenge: &Challenge, state: &GameState, catalog: &'a Catalog) -> Rewards<'a> {
    let mut actions = vec![
        Action::CompleteChallenge(challenge.id.clone()),
        Action::GainXp(challenge.xp_reward),
        Action::GainInsight(challenge.insight_reward),
    ];

    let inventory = &state.player.inventory;
    let concept = catalog
        .concept(&challenge.concept_id)
        .filter(|c| !inventory.knows_concept(&c.id));

    let mut spell = None;
    if let Some(concept) = concept {
        actions.push(Action::LearnConcept(concept.id.clone()));
        actions.push(Action::GainMastery(concept.topic, 1));
        spell = catalog
            .spell_for_concept(&concept.id)
            .filter(|s| inventory.spell(&s.id).is_none());
        if let Some(spell) = spell {
            actions.push(Action::UnlockSpell(spell.id.clone()));
        }
    }

    let completed = state.progress.completed_challenges.len() + 1;
    let stage = stage_for(completed, total_challenges(catalog));
    if stage != state.progress.stage {
        actions.push(Action::SetStage(stage));
    }

    Rewards {
        actions,
        concept,
        spell,
    }
}

fn total_challenges(catalog: &Catalog) -> usize {
    catalog.locations().iter().map(|l| l.challenges.len()).sum()
}

/// Game stage after `completed` of `total` challenges.
pub fn stage_for(completed: usize, total: usize) -> GameStage {
    if completed == 0 || total == 0 {
        return GameStage::Intro;
    }
    if completed >= total {
        return GameStage::EndGame;
    }
    match completed * 4 / total {
        0 => GameStage::EarlyGame,
        1 => GameStage::MidGame,
        _ => GameStage::LateGame,
    }
}
