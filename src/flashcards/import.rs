//! Batch import of cards from tabular data
//!
//! The CSV must have a header row with `question` and `answer` columns;
//! an `image` column is optional. Column names are matched case-insensitively.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{FlashcardError, Result};

/// One card's worth of imported data, not yet validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ImportRow {
    pub fn new(question: String, answer: String, image: Option<String>) -> Self {
        Self {
            question,
            answer,
            image,
        }
    }
}

/// What to do with rows missing a question or answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPolicy {
    /// Import the valid rows and skip the rest
    #[default]
    SkipInvalid,
    /// Fail the whole batch if any row is invalid
    RejectBatch,
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Parse CSV rows into import rows
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ImportRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| FlashcardError::Format(format!("could not read CSV header: {}", e)))?
        .iter()
        .map(|s| s.trim_start_matches('\u{feff}').to_string())
        .collect();

    let (question_col, answer_col) =
        match (find_column(&headers, "question"), find_column(&headers, "answer")) {
            (Some(q), Some(a)) => (q, a),
            _ => {
                return Err(FlashcardError::Format(
                    "CSV must contain 'question' and 'answer' columns".to_string(),
                ))
            }
        };
    let image_col = find_column(&headers, "image");

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| FlashcardError::Format(format!("CSV row {}: {}", row_idx + 1, e)))?;

        let field = |col: usize| record.get(col).unwrap_or_default().to_string();
        let image = image_col
            .and_then(|col| record.get(col))
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        rows.push(ImportRow::new(field(question_col), field(answer_col), image));
    }

    log::debug!("Read {} rows from CSV", rows.len());
    Ok(rows)
}

/// Parse a CSV file into import rows
pub fn read_csv_file(path: &Path) -> Result<Vec<ImportRow>> {
    let file = File::open(path)?;
    read_csv(file)
}
