//! Storage operations for flashcards
//!
//! Data directory layout:
//! ```text
//! {data_dir}/
//! ├── flashcards.json   # Ordered array of cards
//! ├── progress.json     # Suppression records keyed by card id
//! └── images/           # Copied card images
//! ```
//!
//! Both JSON files are rewritten wholesale after every mutation, via a
//! temporary sibling file that is renamed over the original.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::error::{FlashcardError, Result};
use super::import::{ImportPolicy, ImportRow};
use super::models::Card;

/// Read a JSON document, returning the default value if the file does not exist
pub(crate) fn load_json<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&content).map_err(|e| FlashcardError::malformed_file(path, e))
}

/// Write a JSON document using atomic write (write to .tmp then rename)
pub(crate) fn save_json_atomic<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp_path, json)?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    log::debug!("Saved {}", path.display());
    Ok(())
}

pub(crate) fn validate_fields(question: &str, answer: &str) -> Result<()> {
    if question.trim().is_empty() {
        return Err(FlashcardError::validation("question must not be empty"));
    }
    if answer.trim().is_empty() {
        return Err(FlashcardError::validation("answer must not be empty"));
    }
    Ok(())
}

/// Durable ordered collection of cards
#[derive(Debug)]
pub struct CardStore {
    path: PathBuf,
    cards: Vec<Card>,
}

impl CardStore {
    /// Load the collection from `path`; a missing file is an empty collection
    pub fn open(path: PathBuf) -> Result<Self> {
        let cards: Vec<Card> = load_json(&path)?;
        log::info!("Loaded {} cards from {}", cards.len(), path.display());
        Ok(Self { path, cards })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All cards in insertion order
    pub fn list(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Card> {
        self.cards.get(index).ok_or(FlashcardError::NotFound(index))
    }

    /// Current position of the card with the given id
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    /// Append a card and return its index
    pub fn add(&mut self, question: String, answer: String, image: Option<String>) -> Result<usize> {
        self.add_card(Card::new(question, answer).with_image(image))
    }

    /// Append a card built by the caller, keeping its id
    pub fn add_card(&mut self, card: Card) -> Result<usize> {
        validate_fields(&card.question, &card.answer)?;

        let index = self.cards.len();
        let mut cards = self.cards.clone();
        cards.push(card);
        self.commit(cards)?;

        log::info!("Added card {} at index {}", self.cards[index].id, index);
        Ok(index)
    }

    /// Remove the card at `index`, shifting later cards down by one
    pub fn remove(&mut self, index: usize) -> Result<Card> {
        if index >= self.cards.len() {
            return Err(FlashcardError::NotFound(index));
        }

        let mut cards = self.cards.clone();
        let removed = cards.remove(index);
        self.commit(cards)?;

        log::info!("Removed card {} from index {}", removed.id, index);
        Ok(removed)
    }

    /// Append every valid row, committing them with a single write.
    ///
    /// Rows with an empty question or answer are skipped or fail the whole
    /// batch depending on `policy`. Returns the number of cards added.
    pub fn import_batch(&mut self, rows: Vec<ImportRow>, policy: ImportPolicy) -> Result<usize> {
        let mut staged = Vec::with_capacity(rows.len());

        for (row_number, row) in rows.into_iter().enumerate() {
            if let Err(err) = validate_fields(&row.question, &row.answer) {
                match policy {
                    ImportPolicy::SkipInvalid => {
                        log::warn!("Skipping import row {}: {}", row_number + 1, err);
                        continue;
                    }
                    ImportPolicy::RejectBatch => {
                        return Err(FlashcardError::validation(format!(
                            "row {}: {}",
                            row_number + 1,
                            err
                        )));
                    }
                }
            }
            staged.push(Card::new(row.question, row.answer).with_image(row.image));
        }

        let count = staged.len();
        if count == 0 {
            return Ok(0);
        }

        let mut cards = self.cards.clone();
        cards.extend(staged);
        self.commit(cards)?;

        log::info!("Imported {} cards", count);
        Ok(count)
    }

    /// Give every card loaded without an id a fresh one. Returns whether any changed.
    pub(crate) fn assign_missing_ids(&mut self) -> bool {
        let mut changed = false;
        for card in self.cards.iter_mut().filter(|card| card.id.is_nil()) {
            card.id = Uuid::new_v4();
            changed = true;
        }
        changed
    }

    pub(crate) fn save(&self) -> Result<()> {
        save_json_atomic(&self.path, &self.cards)
    }

    /// Persist `cards`, replacing the in-memory collection only once the write succeeded
    fn commit(&mut self, cards: Vec<Card>) -> Result<()> {
        save_json_atomic(&self.path, &cards)?;
        self.cards = cards;
        Ok(())
    }
}
