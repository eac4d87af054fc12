//! Terminal rendering for messages and notifications.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use pp_fiction::markup::{Span, parse_inline};
use pp_fiction::{Message, MessageKind, Notification};

use crate::OutputFormat;

pub fn message(out: &mut impl Write, msg: &Message, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, msg)?;
            writeln!(out)
        }
        OutputFormat::Text => writeln!(out, "{}", styled(msg)),
    }
}

pub fn notification(
    out: &mut impl Write,
    note: &Notification,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &serde_json::json!({ "notification": note }))?;
            writeln!(out)
        }
        OutputFormat::Text => writeln!(
            out,
            "\n  {} {}\n",
            format!("* {} *", note.title).yellow().bold(),
            note.description.dimmed()
        ),
    }
}

fn styled(msg: &Message) -> String {
    if let Some(level) = msg.heading_level() {
        let text = msg.heading_text().bold();
        return if level == 1 {
            format!("\n{}", text.underline())
        } else {
            format!("\n{text}")
        };
    }

    match msg.kind {
        MessageKind::PlayerInput => msg.content.dimmed().to_string(),
        MessageKind::Code => indent(&msg.content).green().to_string(),
        kind => parse_inline(&msg.content)
            .iter()
            .map(|span| tint(kind, span).to_string())
            .collect(),
    }
}

fn tint(kind: MessageKind, span: &Span) -> ColoredString {
    let text = match span {
        Span::Plain(t) => t.normal(),
        Span::Bold(t) => t.bold(),
        Span::Italic(t) => t.italic(),
        Span::Code(t) => return t.green(),
    };
    match kind {
        MessageKind::System => text.cyan(),
        MessageKind::Combat => text.red().bold(),
        MessageKind::Item => text.yellow(),
        MessageKind::Spell => text.magenta(),
        MessageKind::Error => text.red(),
        MessageKind::Success => text.green().bold(),
        MessageKind::Concept => text.blue(),
        _ => text,
    }
}

fn indent(code: &str) -> String {
    code.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(msg: &Message) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        message(&mut buf, msg, OutputFormat::Text).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn headings_drop_their_marker() {
        let out = text_of(&Message::narration("## Starting Area"));
        assert_eq!(out, "\nStarting Area\n");
    }

    #[test]
    fn markup_markers_are_removed() {
        let out = text_of(&Message::new(
            MessageKind::Concept,
            "Use **unpacking** with `*rest`.",
        ));
        assert_eq!(out, "Use unpacking with *rest.\n");
    }

    #[test]
    fn code_is_indented() {
        let out = text_of(&Message::new(MessageKind::Code, "a, b = 1, 2\nprint(a)"));
        assert_eq!(out, "    a, b = 1, 2\n    print(a)\n");
    }

    #[test]
    fn code_comments_are_not_headings() {
        let out = text_of(&Message::new(MessageKind::Code, "# Your list comprehension:"));
        assert_eq!(out, "    # Your list comprehension:\n");
    }

    #[test]
    fn json_lines_carry_kind() {
        let mut buf = Vec::new();
        let msg = Message::new(MessageKind::PlayerInput, "> look");
        message(&mut buf, &msg, OutputFormat::Json).unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["type"], "player-input");
        assert_eq!(value["content"], "> look");
    }

    #[test]
    fn json_notification_is_wrapped() {
        let mut buf = Vec::new();
        let note = Notification::new("Level Up!", "You reached level 2!");
        notification(&mut buf, &note, OutputFormat::Json).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(String::from_utf8(buf).unwrap().trim()).unwrap();
        assert_eq!(value["notification"]["title"], "Level Up!");
    }
}
