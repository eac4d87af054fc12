//! Read-only reports: look, status, help, inventory, concepts.

use pp_core::catalog::{Location, MasteryTopic};
use pp_core::state::MAX_MASTERY;
use pp_core::{Catalog, GameState, HelpMode};

use crate::message::{Message, MessageKind};

/// Describe a location: heading, description, open challenges, characters
/// and exits.
pub fn look(location: &Location, state: &GameState, catalog: &Catalog) -> Vec<Message> {
    let mut out = vec![
        Message::narration(format!("# {}", location.name)),
        Message::narration(&location.description),
    ];

    let challenges = catalog.active_challenges(&location.id, &state.progress);
    if !challenges.is_empty() {
        out.push(Message::narration("You notice the following challenges here:"));
        for c in challenges {
            out.push(Message::narration(format!("- {}: {}", c.name, c.description)));
        }
    }

    if !location.npcs.is_empty() {
        out.push(Message::narration("You see the following characters:"));
        for npc in &location.npcs {
            out.push(Message::narration(format!("- {}: {}", npc.name, npc.description)));
        }
    }

    if !location.connections.is_empty() {
        out.push(Message::narration("You can go in these directions:"));
        for conn in &location.connections {
            let line = match &conn.description {
                Some(desc) => format!("- {}: {desc}", conn.direction),
                None => format!("- {}", conn.direction),
            };
            out.push(Message::narration(line));
        }
    }
    out
}

/// Player name, level, health, experience, insight and mastery.
pub fn status(state: &GameState) -> Vec<Message> {
    let stats = &state.player.stats;
    let mut out = vec![
        Message::system(format!(
            "# {} - Level {} Pythonista",
            state.player.name, stats.level
        )),
        Message::system(format!("Health: {}/{}", stats.health, stats.max_health)),
        Message::system(format!("XP: {}/{}", stats.xp, stats.xp_to_next_level)),
        Message::system(format!("Insight: {}", stats.insight)),
        Message::system("## Python Mastery"),
    ];
    for topic in MasteryTopic::ALL {
        out.push(Message::system(format!(
            "- {topic}: {}/{MAX_MASTERY}",
            stats.mastery.get(topic)
        )));
    }
    out
}

const BASIC_COMMANDS: &[&str] = &[
    "- `go [direction]` - Move in a direction (north, south, east, west)",
    "- `look` - Examine your surroundings",
    "- `status` or `stats` - Check your character stats",
    "- `spells` or `inventory` - View your learned spells and items",
    "- `concepts` - Review Python concepts you've learned",
    "- `talk [character]` - Speak with an NPC",
    "- `challenge [name]` - Attempt a challenge",
    "- `cast [spell]` - Use a Python 'spell' you've learned",
    "- `help` - Show this help menu",
    "- `clear` - Clear the message history",
];

const DETAILED_COMMANDS: &[&str] = &[
    "- `answer [number]` - Pick an answer in a multiple-choice challenge (e.g. `answer 1`)",
    "- `submit [code]` - Submit code for a code challenge (e.g. `submit [x for x in data]`)",
    "- `reply [number]` - Respond during a conversation (e.g. `reply 2`)",
    "- `hint` - Reveal the next hint for the current challenge",
    "- `set speed [slow|normal|fast|instant]` - Change how fast text appears",
    "- `set sound [on|off]` - Toggle sound",
    "- `set help [minimal|detailed]` - Choose how much this menu shows",
    "- `reset` - Start a new game",
    "- `quit` - Leave the academy",
];

/// The command list; `detailed` mode adds the challenge, dialogue and
/// session commands.
pub fn help(mode: HelpMode) -> Vec<Message> {
    let mut out = vec![Message::system("# Available Commands")];
    out.extend(BASIC_COMMANDS.iter().copied().map(Message::system));
    match mode {
        HelpMode::Minimal => {
            out.push(Message::system(
                "Use `answer`, `submit` and `reply` to respond. Type `set help detailed` for more.",
            ));
        }
        HelpMode::Detailed => {
            out.extend(DETAILED_COMMANDS.iter().copied().map(Message::system));
        }
    }
    out
}

/// Spells and items carried.
pub fn inventory(state: &GameState) -> Vec<Message> {
    let inv = &state.player.inventory;
    let mut out = vec![Message::system("# Your Pythonic Arsenal")];

    if inv.spells.is_empty() {
        out.push(Message::system(
            "You haven't learned any spells yet. Complete challenges to learn new Python techniques!",
        ));
    } else {
        out.push(Message::new(MessageKind::Spell, "## Spells (Python Techniques)"));
        for spell in &inv.spells {
            out.push(Message::new(
                MessageKind::Spell,
                format!("- **{}**: {}", spell.name, spell.description),
            ));
            out.push(Message::new(
                MessageKind::Code,
                format!("  Usage: `{}`", spell.code),
            ));
        }
    }

    if inv.items.is_empty() {
        out.push(Message::system("You don't have any items in your inventory."));
    } else {
        out.push(Message::new(MessageKind::Item, "## Items"));
        for item in &inv.items {
            out.push(Message::new(
                MessageKind::Item,
                format!("- {}: {}", item.name, item.description),
            ));
        }
    }
    out
}

/// Learned concepts with their references and examples.
pub fn concepts(state: &GameState, catalog: &Catalog) -> Vec<Message> {
    let mut out = vec![Message::system("# Python Concepts You've Mastered")];
    let learned = &state.player.inventory.concepts_learned;
    if learned.is_empty() {
        out.push(Message::system(
            "You haven't fully mastered any Python concepts yet. Complete challenges to deepen your understanding!",
        ));
        return out;
    }

    for concept in learned.iter().filter_map(|id| catalog.concept(id)) {
        out.push(Message::new(MessageKind::Concept, format!("## {}", concept.name)));
        out.push(Message::new(MessageKind::Concept, &concept.description));
        out.push(Message::new(
            MessageKind::Concept,
            format!("Book Reference: {}", concept.reference),
        ));
        if !concept.examples.is_empty() {
            out.push(Message::new(MessageKind::Concept, "### Examples:"));
            for example in &concept.examples {
                out.push(Message::new(MessageKind::Code, format!("- {example}")));
            }
        }
    }
    out
}
