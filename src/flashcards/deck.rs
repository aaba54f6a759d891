//! Index-based operations over the card store and the review scheduler
//!
//! Callers address cards by their current position. Suppression records are
//! keyed by card id underneath, so removing a card never moves another
//! card's history.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::error::Result;
use super::import::{ImportPolicy, ImportRow};
use super::models::{Card, CardStatus, CardStatusRow, Statistics, SuppressionRecord};
use super::scheduler::ReviewScheduler;
use super::storage::CardStore;

#[derive(Debug)]
pub struct FlashcardDeck {
    store: CardStore,
    scheduler: ReviewScheduler,
}

impl FlashcardDeck {
    /// Open both files, migrating files written before cards had ids
    pub fn open(cards_path: PathBuf, progress_path: PathBuf) -> Result<Self> {
        let mut store = CardStore::open(cards_path)?;
        let mut scheduler = ReviewScheduler::open(progress_path)?;

        let ids_assigned = store.assign_missing_ids();
        let rekeyed = scheduler.reconcile(store.list());

        if ids_assigned {
            log::info!("Assigned ids to cards in {}", store.path().display());
            store.save()?;
        }
        if rekeyed {
            log::info!("Re-keyed suppression records in {}", scheduler.path().display());
            scheduler.save()?;
        }

        Ok(Self { store, scheduler })
    }

    pub fn list(&self) -> &[Card] {
        self.store.list()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Card> {
        self.store.get(index)
    }

    pub fn add(&mut self, question: String, answer: String, image: Option<String>) -> Result<usize> {
        self.store.add(question, answer, image)
    }

    pub fn add_card(&mut self, card: Card) -> Result<usize> {
        self.store.add_card(card)
    }

    /// Remove a card together with its suppression record.
    ///
    /// The removal is already on disk once the record is dropped, so a
    /// failure to rewrite the progress file only logs a warning. The stale
    /// record is discarded the next time the deck is opened.
    pub fn remove(&mut self, index: usize) -> Result<Card> {
        let removed = self.store.remove(index)?;
        if let Err(err) = self.scheduler.forget(removed.id) {
            log::warn!("Failed to drop suppression record for card {}: {}", removed.id, err);
        }
        Ok(removed)
    }

    pub fn import_batch(&mut self, rows: Vec<ImportRow>, policy: ImportPolicy) -> Result<usize> {
        self.store.import_batch(rows, policy)
    }

    /// Indices of every card eligible for study at `now`
    pub fn eligible(&self, now: DateTime<Utc>) -> Vec<usize> {
        self.scheduler.eligible(self.store.list().iter().enumerate(), now)
    }

    /// The subset of `indices` eligible at `now`, in the given order
    pub fn eligible_among<I>(&self, indices: I, now: DateTime<Utc>) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = usize>,
    {
        let cards = indices
            .into_iter()
            .map(|index| self.store.get(index).map(|card| (index, card)))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.scheduler.eligible(cards, now))
    }

    pub fn rate(&mut self, index: usize, delay_days: f64, now: DateTime<Utc>) -> Result<SuppressionRecord> {
        let card_id = self.store.get(index)?.id;
        self.scheduler.rate(card_id, delay_days, now)
    }

    pub fn reset_all(&mut self) -> Result<()> {
        self.scheduler.reset_all()
    }

    pub fn status(&self, index: usize, now: DateTime<Utc>) -> Result<CardStatus> {
        let card_id = self.store.get(index)?.id;
        Ok(self.scheduler.status(card_id, now))
    }

    pub fn statistics(&self, now: DateTime<Utc>) -> Statistics {
        let total_cards = self.store.len();
        let available_cards = self.eligible(now).len();
        Statistics {
            total_cards,
            available_cards,
            suppressed_cards: total_cards - available_cards,
        }
    }

    pub fn status_rows(&self, now: DateTime<Utc>) -> Vec<CardStatusRow> {
        self.store
            .list()
            .iter()
            .enumerate()
            .map(|(index, card)| CardStatusRow {
                index,
                id: card.id,
                question: card.question.clone(),
                status: self.scheduler.status(card.id, now),
            })
            .collect()
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn scheduler(&self) -> &ReviewScheduler {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::FlashcardError;
    use chrono::{Duration, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_deck() -> (FlashcardDeck, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let deck = open_in(&temp_dir);
        (deck, temp_dir)
    }

    fn open_in(temp_dir: &TempDir) -> FlashcardDeck {
        FlashcardDeck::open(
            temp_dir.path().join("flashcards.json"),
            temp_dir.path().join("progress.json"),
        )
        .unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    fn two_card_deck() -> (FlashcardDeck, TempDir) {
        let (mut deck, temp) = create_test_deck();
        deck.add("Q1".to_string(), "A1".to_string(), None).unwrap();
        deck.add("Q2".to_string(), "A2".to_string(), None).unwrap();
        (deck, temp)
    }

    #[test]
    fn test_suppression_window_scenario() {
        let (mut deck, _temp) = two_card_deck();

        deck.rate(0, 1.0, t0()).unwrap();

        assert_eq!(deck.eligible(t0() + Duration::hours(12)), vec![1]);
        assert_eq!(deck.eligible(t0() + Duration::hours(25)), vec![0, 1]);
    }

    #[test]
    fn test_eligible_among() {
        let (mut deck, _temp) = two_card_deck();
        deck.rate(1, 3.0, t0()).unwrap();

        assert_eq!(deck.eligible_among([1], t0()).unwrap(), Vec::<usize>::new());
        assert_eq!(deck.eligible_among([1, 0], t0()).unwrap(), vec![0]);
        assert!(matches!(deck.eligible_among([2], t0()), Err(FlashcardError::NotFound(2))));
    }

    #[test]
    fn test_rate_unknown_index() {
        let (mut deck, _temp) = two_card_deck();
        assert!(matches!(deck.rate(2, 1.0, t0()), Err(FlashcardError::NotFound(2))));
        assert!(matches!(deck.status(5, t0()), Err(FlashcardError::NotFound(5))));
    }

    #[test]
    fn test_status_reports_suppressed_until() {
        let (mut deck, _temp) = two_card_deck();
        deck.rate(1, 14.0, t0()).unwrap();

        assert_eq!(
            deck.status(1, t0()).unwrap(),
            CardStatus::Suppressed {
                until: t0() + Duration::days(14)
            }
        );
        assert_eq!(deck.status(0, t0()).unwrap(), CardStatus::Available);
    }

    #[test]
    fn test_remove_keeps_history_with_its_card() {
        let (mut deck, temp) = two_card_deck();
        deck.rate(1, 7.0, t0()).unwrap();
        let second = deck.get(1).unwrap().clone();

        deck.remove(0).unwrap();

        assert_eq!(deck.list(), &[second]);
        assert!(!deck.status(0, t0()).unwrap().is_available());

        // Removing the suppressed card drops its record too
        deck.remove(0).unwrap();
        assert_eq!(deck.scheduler().records().count(), 0);

        let reopened = open_in(&temp);
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_remove_succeeds_when_progress_write_fails() {
        let (mut deck, temp) = two_card_deck();
        deck.rate(0, 7.0, t0()).unwrap();

        // A non-empty directory in place of the progress file makes the rename fail
        let progress = temp.path().join("progress.json");
        fs::remove_file(&progress).unwrap();
        fs::create_dir(&progress).unwrap();
        fs::write(progress.join("keep"), b"x").unwrap();

        let removed = deck.remove(0).unwrap();
        assert_eq!(removed.question, "Q1");
        assert_eq!(deck.len(), 1);

        let store = CardStore::open(temp.path().join("flashcards.json")).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].question, "Q2");
    }

    #[test]
    fn test_reset_all() {
        let (mut deck, _temp) = two_card_deck();
        deck.rate(0, 14.0, t0()).unwrap();
        deck.rate(1, 3.0, t0()).unwrap();
        assert!(deck.eligible(t0()).is_empty());

        deck.reset_all().unwrap();
        assert_eq!(deck.eligible(t0()), vec![0, 1]);
    }

    #[test]
    fn test_statistics() {
        let (mut deck, _temp) = two_card_deck();
        deck.add("Q3".to_string(), "A3".to_string(), None).unwrap();
        deck.rate(2, 1.0, t0()).unwrap();

        let stats = deck.statistics(t0());
        assert_eq!(stats.total_cards, 3);
        assert_eq!(stats.available_cards, 2);
        assert_eq!(stats.suppressed_cards, 1);

        let rows = deck.status_rows(t0());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].question, "Q3");
        assert!(!rows[2].status.is_available());
        assert!(rows[0].status.is_available());
    }

    #[test]
    fn test_reopen_preserves_state() {
        let (mut deck, temp) = two_card_deck();
        deck.rate(0, 3.0, t0()).unwrap();

        let reopened = open_in(&temp);
        assert_eq!(reopened.list(), deck.list());
        assert_eq!(reopened.eligible(t0()), vec![1]);
    }

    #[test]
    fn test_migrates_index_keyed_files() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("flashcards.json"),
            r#"[{"question":"Q1","answer":"A1"},{"question":"Q2","answer":"A2","image":"images/1_x.png"}]"#,
        )
        .unwrap();
        fs::write(
            temp.path().join("progress.json"),
            r#"{"1": {"suppress_until": "2999-01-01T00:00:00", "last_reviewed": "2026-01-01T00:00:00"}}"#,
        )
        .unwrap();

        let deck = open_in(&temp);
        let now = Utc::now();
        assert_eq!(deck.eligible(now), vec![0]);
        assert!(deck.list().iter().all(|card| !card.id.is_nil()));

        let second_id = deck.get(1).unwrap().id.to_string();
        let progress = fs::read_to_string(temp.path().join("progress.json")).unwrap();
        assert!(progress.contains(&second_id));

        // A second open sees the migrated files unchanged
        let reopened = open_in(&temp);
        assert_eq!(reopened.list(), deck.list());
        assert_eq!(reopened.eligible(now), vec![0]);
    }
}
