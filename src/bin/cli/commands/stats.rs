use anyhow::Result;
use chrono::Utc;

use flashdeck_lib::flashcards::CardStatus;

use crate::app::App;
use crate::render::terminal::{local_time, paint, truncate, Color};
use crate::OutputFormat;

const QUESTION_WIDTH: usize = 50;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let stats = app.deck.statistics(now);
    let rows = app.deck.status_rows(now);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "statistics": stats,
                "cards": rows,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if stats.total_cards == 0 {
                println!("No cards available for statistics.");
                return Ok(());
            }

            println!(
                "Total: {}   Available: {}   Suppressed: {}",
                stats.total_cards,
                paint(&stats.available_cards.to_string(), Color::GREEN, use_color),
                paint(&stats.suppressed_cards.to_string(), Color::YELLOW, use_color),
            );
            println!();

            let number_width = rows.len().to_string().len().max(4);
            let status_width = 10;

            println!(
                "{:<nw$} {:<qw$} {:<sw$} {}",
                "Card", "Question", "Status", "Next Review",
                nw = number_width, qw = QUESTION_WIDTH, sw = status_width
            );
            println!(
                "{} {} {} {}",
                "\u{2500}".repeat(number_width),
                "\u{2500}".repeat(QUESTION_WIDTH),
                "\u{2500}".repeat(status_width),
                "\u{2500}".repeat(16)
            );

            for row in &rows {
                let (status, next_review) = match &row.status {
                    CardStatus::Available => ("Available", "Now".to_string()),
                    CardStatus::Suppressed { until } => ("Suppressed", local_time(until)),
                };
                let question = truncate(&row.question, QUESTION_WIDTH);
                // Pad by characters so multi-byte questions line up
                let padding = QUESTION_WIDTH.saturating_sub(question.chars().count());

                println!(
                    "{:<nw$} {}{} {:<sw$} {}",
                    row.index + 1,
                    question,
                    " ".repeat(padding),
                    status,
                    next_review,
                    nw = number_width,
                    sw = status_width
                );
            }
        }
    }

    Ok(())
}
