//! Error types for the session engine.
//!
//! Every variant's `Display` is the exact text shown to the player; the
//! session turns errors into log messages instead of returning them.

use thiserror::Error;

use crate::message::MessageKind;

/// Result type for session operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Player-facing failures. None of them change game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FictionError {
    /// Input matched no command.
    #[error("I don't understand that command. Type 'help' for a list of available commands.")]
    UnknownCommand,

    /// No exit in that direction.
    #[error("You cannot go {0} from here.")]
    NoExit(String),

    /// Spell id is not in the catalog.
    #[error("You don't know that spell.{}", did_you_mean(.0))]
    UnknownSpell(Option<String>),

    /// Spell exists but the player has not unlocked it.
    #[error("You haven't unlocked that spell yet.")]
    SpellLocked,

    /// No such NPC at the current location.
    #[error("There's no one called {id} here.{}", did_you_mean(.suggestion))]
    NpcNotHere {
        /// Id the player typed.
        id: String,
        /// Closest id at this location, if any.
        suggestion: Option<String>,
    },

    /// No such challenge at the current location.
    #[error("Challenge {id} not found in this location.{}", did_you_mean(.suggestion))]
    ChallengeNotHere {
        /// Id the player typed.
        id: String,
        /// Closest id at this location, if any.
        suggestion: Option<String>,
    },

    /// The challenge was already solved.
    #[error("You've already completed the \"{0}\" challenge.")]
    AlreadyCompleted(String),

    /// `answer`, `submit` or `hint` with nothing in progress.
    #[error("You are not attempting a challenge right now. Use `challenge <id>` to begin one.")]
    NoActiveChallenge,

    /// The active challenge does not take this kind of answer.
    #[error("The \"{name}\" challenge cannot be solved that way. {how}")]
    WrongChallengeKind {
        /// Active challenge name.
        name: String,
        /// How it is solved instead.
        how: &'static str,
    },

    /// Choice key matched nothing.
    #[error("There is no answer \"{0}\". Pick one of the numbered choices.")]
    InvalidChoice(String),

    /// `reply` with no conversation open.
    #[error("You are not talking to anyone. Use `talk <character>` first.")]
    NoConversation,

    /// Response key matched nothing.
    #[error("\"{0}\" is not one of your options. Pick one of the numbered responses.")]
    InvalidResponse(String),

    /// All hints have been shown.
    #[error("There are no more hints for this challenge.")]
    NoMoreHints,

    /// `set` with an unknown setting or value.
    #[error("{0}")]
    InvalidSetting(String),

    /// A command was missing its argument.
    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    /// A location id the catalog does not contain.
    #[error("location not found: {0}")]
    UnknownLocation(String),
}

impl FictionError {
    /// The message kind this error is logged as.
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::UnknownCommand | Self::NoExit(_) | Self::AlreadyCompleted(_) => {
                MessageKind::System
            }
            _ => MessageKind::Error,
        }
    }
}

fn did_you_mean(candidate: &Option<String>) -> String {
    match candidate {
        Some(id) => format!(" Did you mean \"{id}\"?"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_player_text() {
        assert_eq!(
            FictionError::NoExit("up".into()).to_string(),
            "You cannot go up from here."
        );
        assert_eq!(
            FictionError::UnknownSpell(None).to_string(),
            "You don't know that spell."
        );
        assert_eq!(
            FictionError::AlreadyCompleted("The Rune Puzzle".into()).to_string(),
            "You've already completed the \"The Rune Puzzle\" challenge."
        );
    }

    #[test]
    fn suggestions_are_appended() {
        let err = FictionError::NpcNotHere {
            id: "guido".into(),
            suggestion: Some("instructor_guido".into()),
        };
        assert_eq!(
            err.to_string(),
            "There's no one called guido here. Did you mean \"instructor_guido\"?"
        );
    }

    #[test]
    fn challenge_and_spell_suggestions() {
        let err = FictionError::ChallengeNotHere {
            id: "data_model".into(),
            suggestion: Some("data_model_basics".into()),
        };
        assert_eq!(
            err.to_string(),
            "Challenge data_model not found in this location. Did you mean \"data_model_basics\"?"
        );
        let err = FictionError::ChallengeNotHere {
            id: "zzz".into(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "Challenge zzz not found in this location.");
        assert_eq!(
            FictionError::UnknownSpell(Some("decorator_spell".into())).to_string(),
            "You don't know that spell. Did you mean \"decorator_spell\"?"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(FictionError::UnknownCommand.kind(), MessageKind::System);
        assert_eq!(FictionError::NoExit("x".into()).kind(), MessageKind::System);
        assert_eq!(FictionError::SpellLocked.kind(), MessageKind::Error);
        assert_eq!(FictionError::NoConversation.kind(), MessageKind::Error);
    }
}
