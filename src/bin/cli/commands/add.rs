use std::path::Path;

use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    question: String,
    answer: String,
    image: Option<&Path>,
    format: &OutputFormat,
) -> Result<()> {
    let index = app
        .config
        .add_card(&mut app.deck, question, answer, image)
        .with_context(|| match image {
            Some(source) => format!("Failed to add card with image {}", source.display()),
            None => "Failed to add card".to_string(),
        })?;
    let card = app.deck.get(index)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "number": index + 1,
                "id": card.id.to_string(),
                "question": card.question,
                "answer": card.answer,
                "image": card.image,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Added card {}: \"{}\"", index + 1, card.question);
            if let Some(image) = &card.image {
                println!("  Image: {}", image);
            }
        }
    }

    Ok(())
}
