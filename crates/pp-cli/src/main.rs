//! Terminal front end for The Pythonic Path.

mod play;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use pp_core::TextSpeed;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pp",
    about = "The Pythonic Path: learn Python idioms through a text adventure",
    version
)]
struct Cli {
    /// Your character's name (asked for when omitted)
    #[arg(short, long)]
    name: Option<String>,

    /// How fast deferred text appears: slow, normal, fast, instant
    #[arg(short, long, default_value = "normal")]
    speed: TextSpeed,

    /// Load game content from a JSON file instead of the built-in academy
    #[arg(short, long)]
    content: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

/// How messages are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable text.
    Text,
    /// One JSON object per line.
    Json,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if cli.no_color || cli.format == OutputFormat::Json {
        colored::control::set_override(false);
    }

    let options = play::PlayOptions {
        name: cli.name,
        speed: cli.speed,
        content: cli.content,
        format: cli.format,
    };

    if let Err(e) = play::run(options) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
