//! Staged scenes: the welcome, challenge openings and dialogue lines.

use pp_core::catalog::{Challenge, ChallengeKind, DialogueNode, Npc};

use crate::message::{Message, MessageKind};

/// Welcome banner and opening paragraph.
pub fn welcome(title: &str) -> Vec<Message> {
    vec![
        Message::narration(format!("# Welcome to {title}")),
        Message::narration(
            "You stand at the threshold of the legendary Python Academy, a place where code and magic intertwine. \
             As an aspiring Pythonista, you seek to master the elegant and powerful ways of Python as chronicled in the sacred tome 'Fluent Python'.",
        ),
    ]
}

/// The second intro paragraph.
pub fn intro_journey() -> Message {
    Message::narration(
        "Your journey will take you through realms of Data Structures, Function Groves, \
         Class Hierarchies, and eventually to the arcane heights of Metaprogramming.",
    )
}

/// Shown immediately when a challenge begins.
pub fn challenge_intro(challenge: &Challenge) -> Vec<Message> {
    vec![
        Message::narration(format!("You begin the \"{}\" challenge:", challenge.name)),
        Message::narration(&challenge.description),
        Message::system(format!(
            "Difficulty: {} | Type: {} | Reward: {} XP",
            challenge.difficulty,
            challenge.kind.label(),
            challenge.xp_reward
        )),
    ]
}

/// Kind-specific detail shown once the challenge has been introduced.
pub fn challenge_detail(challenge: &Challenge) -> Vec<Message> {
    match &challenge.kind {
        ChallengeKind::MultipleChoice { question, choices } => {
            let mut out = vec![Message::system(question)];
            for (i, choice) in choices.iter().enumerate() {
                out.push(Message::system(format!("{}. {}", i + 1, choice.text)));
            }
            out.push(Message::system(
                "Use `answer [number]` to select your answer.",
            ));
            out
        }
        ChallengeKind::CodeCompletion { code_template, .. } => vec![
            Message::new(MessageKind::Code, "Complete the following code:"),
            Message::new(MessageKind::Code, code_template),
            Message::system("Use `submit [code]` to submit your solution."),
        ],
        ChallengeKind::Command { hints, .. } => {
            let mut out = vec![Message::system(
                "Enter the appropriate command to solve this challenge.",
            )];
            if let Some(hint) = hints.first() {
                out.push(Message::system(format!("Hint: {hint}")));
            }
            out
        }
        ChallengeKind::Boss { boss } => {
            let mut out = vec![
                Message::new(MessageKind::Combat, format!("## {}", boss.name)),
                Message::new(MessageKind::Combat, format!("Health: {}", boss.health)),
            ];
            for attack in &boss.attacks {
                out.push(Message::new(
                    MessageKind::Combat,
                    format!(
                        "- {}: {} ({} damage)",
                        attack.name, attack.description, attack.damage
                    ),
                ));
            }
            out
        }
    }
}

/// An NPC speaking a dialogue node.
pub fn dialogue_line(npc: &Npc, node: &DialogueNode) -> Message {
    Message::narration(format!("{}: \"{}\"", npc.name, node.text))
}

/// The response options of a node, numbered.
pub fn response_prompt(node: &DialogueNode) -> Vec<Message> {
    let mut out = vec![Message::system("How do you respond?")];
    for (i, response) in node.responses.iter().enumerate() {
        out.push(Message::system(format!("{}. {}", i + 1, response.text)));
    }
    out
}
