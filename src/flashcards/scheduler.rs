//! Suppression scheduling
//!
//! A card is `Available` when it has no suppression record or its
//! `suppress_until` has passed, and `Suppressed` otherwise. The only way
//! back into `Suppressed` is an explicit [`ReviewScheduler::rate`].

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::{FlashcardError, Result};
use super::models::{Card, CardStatus, SuppressionRecord};
use super::rating::delay_duration;
use super::storage::{load_json, save_json_atomic};

/// Suppression records keyed by card id, persisted as a JSON object
#[derive(Debug)]
pub struct ReviewScheduler {
    path: PathBuf,
    records: BTreeMap<String, SuppressionRecord>,
}

impl ReviewScheduler {
    /// Load the suppression map from `path`; a missing file is an empty map
    pub fn open(path: PathBuf) -> Result<Self> {
        let records: BTreeMap<String, SuppressionRecord> = load_json(&path)?;
        log::info!("Loaded {} suppression records from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, card_id: Uuid) -> Option<&SuppressionRecord> {
        self.records.get(&card_id.to_string())
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &SuppressionRecord)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn is_eligible(&self, card_id: Uuid, now: DateTime<Utc>) -> bool {
        self.record(card_id)
            .map_or(true, |record| !record.is_suppressed_at(now))
    }

    /// Indices of the given cards that are not suppressed at `now`, in input order
    pub fn eligible<'a, I>(&self, cards: I, now: DateTime<Utc>) -> Vec<usize>
    where
        I: IntoIterator<Item = (usize, &'a Card)>,
    {
        cards
            .into_iter()
            .filter(|(_, card)| self.is_eligible(card.id, now))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn status(&self, card_id: Uuid, now: DateTime<Utc>) -> CardStatus {
        match self.record(card_id).and_then(|record| record.suppress_until) {
            Some(until) if now < until => CardStatus::Suppressed { until },
            _ => CardStatus::Available,
        }
    }

    /// Hide a card until `now + delay_days` and record the review time
    pub fn rate(&mut self, card_id: Uuid, delay_days: f64, now: DateTime<Utc>) -> Result<SuppressionRecord> {
        let delay = delay_duration(delay_days)?;
        let suppress_until = now.checked_add_signed(delay).ok_or_else(|| {
            FlashcardError::validation(format!("delay of {} days is out of range", delay_days))
        })?;

        let record = SuppressionRecord::new(suppress_until, now);
        let mut records = self.records.clone();
        records.insert(card_id.to_string(), record.clone());
        self.commit(records)?;

        log::info!("Card {} suppressed until {}", card_id, suppress_until);
        Ok(record)
    }

    /// Clear every record, making all cards eligible
    pub fn reset_all(&mut self) -> Result<()> {
        let cleared = self.records.len();
        self.commit(BTreeMap::new())?;
        log::info!("Cleared {} suppression records", cleared);
        Ok(())
    }

    /// Drop the record of a card that no longer exists. Returns whether one was removed.
    pub fn forget(&mut self, card_id: Uuid) -> Result<bool> {
        let key = card_id.to_string();
        if !self.records.contains_key(&key) {
            return Ok(false);
        }

        let mut records = self.records.clone();
        records.remove(&key);
        self.commit(records)?;
        Ok(true)
    }

    /// Re-key records to the current card ids.
    ///
    /// Keys that are already a card id are kept. Keys holding a decimal
    /// position (the older file format) move to the id of the card at that
    /// position. Anything else is dropped. Returns whether the map changed;
    /// the caller decides when to persist.
    pub(crate) fn reconcile(&mut self, cards: &[Card]) -> bool {
        let known: HashSet<String> = cards.iter().map(|card| card.id.to_string()).collect();
        let mut reconciled = BTreeMap::new();
        let mut changed = false;

        for (key, record) in &self.records {
            if known.contains(key) {
                reconciled.insert(key.clone(), record.clone());
            }
        }

        for (key, record) in &self.records {
            if known.contains(key) {
                continue;
            }
            changed = true;

            match key.trim().parse::<usize>().ok().and_then(|index| cards.get(index)) {
                Some(card) => {
                    let new_key = card.id.to_string();
                    if reconciled.contains_key(&new_key) {
                        log::warn!("Dropping suppression record {:?}: card already has one", key);
                    } else {
                        log::info!("Migrating suppression record {:?} to card {}", key, card.id);
                        reconciled.insert(new_key, record.clone());
                    }
                }
                None => log::warn!("Dropping suppression record {:?} for unknown card", key),
            }
        }

        self.records = reconciled;
        changed
    }

    pub(crate) fn save(&self) -> Result<()> {
        save_json_atomic(&self.path, &self.records)
    }

    fn commit(&mut self, records: BTreeMap<String, SuppressionRecord>) -> Result<()> {
        save_json_atomic(&self.path, &records)?;
        self.records = records;
        Ok(())
    }
}
