use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use colored::Colorize;

use pp_core::{Catalog, TextSpeed};
use pp_fiction::{Session, SessionConfig};

use crate::OutputFormat;
use crate::render;

const DEFAULT_NAME: &str = "Pythonista";

pub struct PlayOptions {
    pub name: Option<String>,
    pub speed: TextSpeed,
    pub content: Option<PathBuf>,
    pub format: OutputFormat,
}

pub fn run(options: PlayOptions) -> Result<(), String> {
    let catalog = load_catalog(options.content.as_deref())?;
    let config = SessionConfig::default().with_text_speed(options.speed);
    let mut session = Session::new(Arc::new(catalog), config)
        .map_err(|e| format!("failed to start session: {e}"))?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    let name = match options.name {
        Some(name) => name,
        None if options.format == OutputFormat::Text => ask_name(&mut reader, &mut line)?,
        None => DEFAULT_NAME.to_string(),
    };

    session.start(&name);
    pace(&mut session, options.format)?;

    loop {
        if session.is_finished() {
            break;
        }
        if options.format == OutputFormat::Text {
            print!("{} ", ">".bold());
            io::stdout().flush().map_err(|e| e.to_string())?;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        session.submit(input);
        pace(&mut session, options.format)?;
    }

    tracing::info!(messages = session.log().len(), "session ended");
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, String> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Catalog::from_json(&json).map_err(|e| format!("invalid content: {e}"))
        }
        None => Catalog::builtin().map_err(|e| format!("built-in content is broken: {e}")),
    }
}

fn ask_name(reader: &mut impl BufRead, line: &mut String) -> Result<String, String> {
    print!("What is your name, apprentice? ");
    io::stdout().flush().map_err(|e| e.to_string())?;
    line.clear();
    reader.read_line(line).map_err(|e| e.to_string())?;
    let name = line.trim();
    Ok(if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name.to_string()
    })
}

/// Print what the last input produced, then let pending follow-ups play
/// out in real time. JSON output never waits.
fn pace(session: &mut Session, format: OutputFormat) -> Result<(), String> {
    flush_output(session, format)?;
    while let Some(delay) = session.pending_delay() {
        if format == OutputFormat::Text && delay > 0 {
            thread::sleep(Duration::from_millis(delay));
        }
        session.advance(delay);
        flush_output(session, format)?;
    }
    Ok(())
}

fn flush_output(session: &mut Session, format: OutputFormat) -> Result<(), String> {
    let mut out = io::stdout().lock();
    for msg in session.take_output() {
        render::message(&mut out, &msg, format).map_err(|e| e.to_string())?;
    }
    for note in session.take_notifications() {
        render::notification(&mut out, &note, format).map_err(|e| e.to_string())?;
    }
    out.flush().map_err(|e| e.to_string())
}
