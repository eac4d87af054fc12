//! Command parsing for player input.

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move along a named exit.
    Move {
        /// Direction label, lowercased.
        direction: String,
    },
    /// Describe the current location.
    Look,
    /// List commands.
    Help,
    /// Show player stats.
    Status,
    /// Show spells and items.
    Inventory,
    /// Show learned concepts.
    Concepts,
    /// Empty the message log.
    Clear,
    /// Begin a challenge at this location.
    Challenge {
        /// Challenge id.
        id: String,
    },
    /// Cast an unlocked spell.
    Cast {
        /// Spell id.
        spell: String,
    },
    /// Start a conversation.
    Talk {
        /// NPC id.
        npc: String,
    },
    /// Pick an answer of the active multiple-choice challenge.
    Answer {
        /// Choice id or 1-based number.
        choice: String,
    },
    /// Submit code for the active code-completion challenge.
    Submit {
        /// Code as typed, case preserved.
        code: String,
    },
    /// Pick a response in the active conversation.
    Reply {
        /// Response id or 1-based number.
        option: String,
    },
    /// Reveal the next hint of the active challenge.
    Hint,
    /// Change a setting.
    Set {
        /// Setting name.
        setting: String,
        /// New value, if given.
        value: Option<String>,
    },
    /// Start over.
    Reset,
    /// Leave the game.
    Quit,
    /// Input that matched nothing.
    Unknown {
        /// The normalized input.
        input: String,
    },
}

const MOVE_VERBS: &[&str] = &["go ", "move "];
const RESET_WORDS: &[&str] = &["reset", "restart"];
const QUIT_WORDS: &[&str] = &["quit", "exit"];

/// Parse a player input string into a command.
///
/// Input is trimmed and lowercased, then matched against each pattern in a
/// fixed priority order; the first match wins. Only `submit` keeps the
/// original casing of its argument.
pub fn parse_command(input: &str) -> Command {
    let raw = input.trim();
    let normalized = raw.to_lowercase();
    let cmd = normalized.as_str();

    if MOVE_VERBS.iter().any(|v| cmd.starts_with(v)) {
        return Command::Move {
            direction: second_word(cmd),
        };
    }
    if cmd.starts_with("look") {
        return Command::Look;
    }
    if cmd.starts_with("help") {
        return Command::Help;
    }
    if cmd.starts_with("status") || cmd == "stats" {
        return Command::Status;
    }
    if cmd.starts_with("spells") || cmd == "inventory" {
        return Command::Inventory;
    }
    if cmd.starts_with("concepts") {
        return Command::Concepts;
    }
    if cmd == "clear" {
        return Command::Clear;
    }
    if cmd.starts_with("challenge ") {
        return Command::Challenge {
            id: second_word(cmd),
        };
    }
    if cmd.starts_with("cast ") {
        return Command::Cast {
            spell: second_word(cmd),
        };
    }
    if cmd.starts_with("talk ") {
        return Command::Talk {
            npc: second_word(cmd),
        };
    }
    if cmd.starts_with("answer ") {
        return Command::Answer {
            choice: second_word(cmd),
        };
    }
    if cmd.starts_with("submit ") {
        return Command::Submit {
            code: raw
                .get("submit ".len()..)
                .unwrap_or_default()
                .trim()
                .to_string(),
        };
    }
    if cmd.starts_with("reply ") {
        return Command::Reply {
            option: second_word(cmd),
        };
    }
    if cmd == "hint" {
        return Command::Hint;
    }
    if cmd.starts_with("set ") {
        let mut words = cmd.split_whitespace().skip(1);
        return Command::Set {
            setting: words.next().unwrap_or_default().to_string(),
            value: words.next().map(str::to_string),
        };
    }
    if RESET_WORDS.contains(&cmd) {
        return Command::Reset;
    }
    if QUIT_WORDS.contains(&cmd) {
        return Command::Quit;
    }

    Command::Unknown {
        input: normalized,
    }
}

fn second_word(cmd: &str) -> String {
    cmd.split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(d: &str) -> Command {
        Command::Move {
            direction: d.to_string(),
        }
    }

    #[test]
    fn parse_movement() {
        assert_eq!(parse_command("go north"), mv("north"));
        assert_eq!(parse_command("  MOVE East  "), mv("east"));
        assert_eq!(parse_command("go north quickly"), mv("north"));
    }

    #[test]
    fn bare_go_is_unknown() {
        assert!(matches!(parse_command("go"), Command::Unknown { .. }));
    }

    #[test]
    fn prefix_reports() {
        assert_eq!(parse_command("look"), Command::Look);
        assert_eq!(parse_command("look around"), Command::Look);
        assert_eq!(parse_command("HELP"), Command::Help);
        assert_eq!(parse_command("status"), Command::Status);
        assert_eq!(parse_command("stats"), Command::Status);
        assert_eq!(parse_command("spells"), Command::Inventory);
        assert_eq!(parse_command("inventory"), Command::Inventory);
        assert_eq!(parse_command("concepts"), Command::Concepts);
        assert_eq!(parse_command("clear"), Command::Clear);
    }

    #[test]
    fn exact_words_do_not_match_as_prefix() {
        assert!(matches!(parse_command("stats please"), Command::Unknown { .. }));
        assert!(matches!(parse_command("inventory now"), Command::Unknown { .. }));
        assert!(matches!(parse_command("clear all"), Command::Unknown { .. }));
    }

    #[test]
    fn targeted_commands_take_second_word() {
        assert_eq!(
            parse_command("challenge data_model_basics"),
            Command::Challenge {
                id: "data_model_basics".into()
            }
        );
        assert_eq!(
            parse_command("Cast List_Comprehension_Spell"),
            Command::Cast {
                spell: "list_comprehension_spell".into()
            }
        );
        assert_eq!(
            parse_command("talk instructor_guido"),
            Command::Talk {
                npc: "instructor_guido".into()
            }
        );
        assert_eq!(
            parse_command("answer 2"),
            Command::Answer { choice: "2".into() }
        );
        assert_eq!(
            parse_command("reply ready"),
            Command::Reply {
                option: "ready".into()
            }
        );
    }

    #[test]
    fn submit_keeps_case() {
        assert_eq!(
            parse_command("SUBMIT [X**2 for X in range(10)]"),
            Command::Submit {
                code: "[X**2 for X in range(10)]".into()
            }
        );
    }

    #[test]
    fn set_and_session_words() {
        assert_eq!(
            parse_command("set speed fast"),
            Command::Set {
                setting: "speed".into(),
                value: Some("fast".into())
            }
        );
        assert_eq!(
            parse_command("set sound"),
            Command::Set {
                setting: "sound".into(),
                value: None
            }
        );
        assert_eq!(parse_command("hint"), Command::Hint);
        assert_eq!(parse_command("restart"), Command::Reset);
        assert_eq!(parse_command("exit"), Command::Quit);
    }

    #[test]
    fn priority_order() {
        // "look" wins over anything that follows it
        assert_eq!(parse_command("lookout"), Command::Look);
        // "go " is checked before "talk "
        assert_eq!(parse_command("go talk"), mv("talk"));
    }

    #[test]
    fn unknown_keeps_normalized_input() {
        assert_eq!(
            parse_command(" Frobnicate "),
            Command::Unknown {
                input: "frobnicate".into()
            }
        );
        assert!(matches!(parse_command(""), Command::Unknown { .. }));
    }
}
