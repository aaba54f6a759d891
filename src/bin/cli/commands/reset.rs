use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, yes: bool, format: &OutputFormat) -> Result<()> {
    if !yes {
        print!("This clears all suppression and makes every card available. Continue? [y/N] ");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let cleared = app.deck.scheduler().records().count();
    app.deck.reset_all()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "cleared": cleared }));
        }
        OutputFormat::Plain => {
            println!("Progress reset. {} cards available.", app.deck.len());
        }
    }

    Ok(())
}
