//! Flashcard error types

use std::path::Path;

use thiserror::Error;

/// Errors that can occur during flashcard operations
#[derive(Debug, Error)]
pub enum FlashcardError {
    /// A required field was empty or a value was out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation referenced a card index outside the collection
    #[error("Card not found at index {0}")]
    NotFound(usize),

    /// A persisted file or imported batch is structurally malformed
    #[error("Format error: {0}")]
    Format(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FlashcardError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wrap a parse failure of a persisted file, naming the file
    pub(crate) fn malformed_file(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Format(format!("{}: {}", path.display(), err))
    }
}

/// Result type alias for flashcard operations
pub type Result<T> = std::result::Result<T, FlashcardError>;
