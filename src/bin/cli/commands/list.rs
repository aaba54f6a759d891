use anyhow::Result;
use chrono::Utc;

use flashdeck_lib::flashcards::images::{image_status, ImageStatus};

use crate::app::App;
use crate::render::terminal::{paint, status_label, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let rows = app.deck.status_rows(now);

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = app
                .deck
                .list()
                .iter()
                .zip(&rows)
                .map(|(card, row)| {
                    serde_json::json!({
                        "number": row.index + 1,
                        "id": card.id.to_string(),
                        "question": card.question,
                        "answer": card.answer,
                        "image": card.image,
                        "status": row.status,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if rows.is_empty() {
                println!("No cards yet. Add one with `flashdeck add <question> <answer>`.");
                return Ok(());
            }

            for (card, row) in app.deck.list().iter().zip(&rows) {
                let heading = format!("Card {}", row.index + 1);
                println!(
                    "{}  [{}]",
                    paint(&heading, Color::BOLD, use_color),
                    status_label(&row.status, use_color)
                );
                println!("  Q: {}", card.question.replace('\n', "\n     "));
                println!("  A: {}", card.answer.replace('\n', "\n     "));
                match image_status(card, &app.config.data_dir) {
                    ImageStatus::NoImage => {}
                    ImageStatus::Present(path) => println!("  Image: {}", path.display()),
                    ImageStatus::Missing(path) => println!(
                        "  Image: {}",
                        paint(&format!("{} (not found)", path.display()), Color::RED, use_color)
                    ),
                }
                println!();
            }

            println!("{} cards total", rows.len());
        }
    }

    Ok(())
}
