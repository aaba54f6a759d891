use std::path::Path;

use anyhow::{Context, Result};

use flashdeck_lib::flashcards::import::read_csv_file;
use flashdeck_lib::flashcards::ImportPolicy;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, file: &Path, strict: bool, format: &OutputFormat) -> Result<()> {
    let rows = read_csv_file(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let total = rows.len();

    let policy = if strict {
        ImportPolicy::RejectBatch
    } else {
        ImportPolicy::SkipInvalid
    };
    let imported = app
        .deck
        .import_batch(rows, policy)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "rows": total,
                "imported": imported,
                "skipped": total - imported,
                "totalCards": app.deck.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Imported {} of {} rows from {}", imported, total, file.display());
            if imported < total {
                println!("  {} rows skipped (missing question or answer)", total - imported);
            }
        }
    }

    Ok(())
}
