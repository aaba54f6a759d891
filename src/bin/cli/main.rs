mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashdeck", about = "Flashcard study tool", version)]
struct Cli {
    /// Path to a config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List all cards
    List,

    /// Add a new card
    Add {
        /// Question text
        question: String,
        /// Answer text (use "-" to read from stdin)
        answer: String,
        /// Image file to attach (png, jpg, jpeg); copied into the data directory
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Delete a card by its number as shown by `list`
    Remove {
        number: usize,
    },

    /// Import cards from a CSV file with question, answer and optional image columns
    Import {
        /// CSV file
        file: PathBuf,
        /// Reject the whole file if any row lacks a question or answer
        #[arg(long)]
        strict: bool,
    },

    /// Study the cards that are not currently suppressed
    Study {
        /// Seed for the card order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show totals and the status of every card
    Stats,

    /// Clear all suppression so every card is available again
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Resolve "-" as stdin
fn resolve_text(text: String) -> anyhow::Result<String> {
    if text == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        Ok(buf.trim_end().to_string())
    } else {
        Ok(text)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.config.as_deref())?;

    match cli.command {
        Command::List => {
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Command::Add { question, answer, image } => {
            let answer = resolve_text(answer)?;
            commands::add::run(&mut app, question, answer, image.as_deref(), &cli.format)?;
        }
        Command::Remove { number } => {
            commands::remove::run(&mut app, number, &cli.format)?;
        }
        Command::Import { file, strict } => {
            commands::import::run(&mut app, &file, strict, &cli.format)?;
        }
        Command::Study { seed } => {
            commands::study::run(&mut app, seed, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Reset { yes } => {
            commands::reset::run(&mut app, yes, &cli.format)?;
        }
    }

    Ok(())
}
