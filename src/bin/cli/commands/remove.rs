use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, number: usize, format: &OutputFormat) -> Result<()> {
    let index = app.index_for_number(number)?;
    let removed = app.deck.remove(index)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "number": number,
                "id": removed.id.to_string(),
                "question": removed.question,
                "remaining": app.deck.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted card {}: \"{}\"", number, removed.question);
            if number <= app.deck.len() {
                println!("  Cards after it have moved up by one.");
            }
        }
    }

    Ok(())
}
