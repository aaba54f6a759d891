//! One shuffled pass over the cards eligible when the session started
//!
//! The session owns no persistent state. Eligibility is computed once at
//! start; restarting reshuffles that same set rather than recomputing it.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::deck::FlashcardDeck;
use super::error::Result;
use super::models::{Card, SuppressionRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySession {
    eligible_indices: Vec<usize>,
    cursor: usize,
    revealed: bool,
}

impl StudySession {
    /// Start a session over the cards of `deck` eligible at `now`
    pub fn start<R>(deck: &FlashcardDeck, now: DateTime<Utc>, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_eligible(deck.eligible(now), rng)
    }

    pub fn from_eligible<R>(mut eligible_indices: Vec<usize>, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        eligible_indices.shuffle(rng);
        log::debug!("Study session started with {} cards", eligible_indices.len());
        Self {
            eligible_indices,
            cursor: 0,
            revealed: false,
        }
    }

    /// Index of the card being studied, or `None` once the pass is exhausted
    pub fn current(&self) -> Option<usize> {
        self.eligible_indices.get(self.cursor).copied()
    }

    /// The card being studied. `None` when exhausted or the card was removed meanwhile.
    pub fn current_card<'a>(&self, deck: &'a FlashcardDeck) -> Option<&'a Card> {
        self.current().and_then(|index| deck.get(index).ok())
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.eligible_indices.len()
    }

    /// Number of cards in this pass
    pub fn len(&self) -> usize {
        self.eligible_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eligible_indices.is_empty()
    }

    /// Zero-based position in the pass
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn order(&self) -> &[usize] {
        &self.eligible_indices
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Move to the next card and hide its answer
    pub fn advance(&mut self) {
        if self.cursor < self.eligible_indices.len() {
            self.cursor += 1;
        }
        self.revealed = false;
    }

    pub fn skip(&mut self) {
        self.advance();
    }

    /// Rate the current card and move on.
    ///
    /// Returns `None` without touching the deck when the pass is exhausted.
    /// If rating fails the cursor stays where it is.
    pub fn rate(
        &mut self,
        deck: &mut FlashcardDeck,
        delay_days: f64,
        now: DateTime<Utc>,
    ) -> Result<Option<SuppressionRecord>> {
        let Some(index) = self.current() else {
            return Ok(None);
        };

        let record = deck.rate(index, delay_days, now)?;
        self.advance();
        Ok(Some(record))
    }

    /// Reshuffle the same eligible set and go back to the first card
    pub fn restart<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.eligible_indices.shuffle(rng);
        self.cursor = 0;
        self.revealed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::FlashcardError;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    fn create_test_deck(cards: usize) -> (FlashcardDeck, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut deck = FlashcardDeck::open(
            temp_dir.path().join("flashcards.json"),
            temp_dir.path().join("progress.json"),
        )
        .unwrap();
        for i in 0..cards {
            deck.add(format!("Q{}", i), format!("A{}", i), None).unwrap();
        }
        (deck, temp_dir)
    }

    fn sorted(mut indices: Vec<usize>) -> Vec<usize> {
        indices.sort_unstable();
        indices
    }

    #[test]
    fn test_seeded_sessions_are_deterministic() {
        let (deck, _temp) = create_test_deck(20);

        let a = StudySession::start(&deck, t0(), &mut StdRng::seed_from_u64(7));
        let b = StudySession::start(&deck, t0(), &mut StdRng::seed_from_u64(7));

        assert_eq!(a.order(), b.order());
        assert_eq!(sorted(a.order().to_vec()), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_only_eligible_cards_are_included() {
        let (mut deck, _temp) = create_test_deck(4);
        deck.rate(1, 3.0, t0()).unwrap();
        deck.rate(3, 1.0, t0()).unwrap();

        let session = StudySession::start(&deck, t0(), &mut StdRng::seed_from_u64(1));
        assert_eq!(sorted(session.order().to_vec()), vec![0, 2]);
    }

    #[test]
    fn test_traversal_until_exhausted() {
        let (deck, _temp) = create_test_deck(3);
        let mut session = StudySession::start(&deck, t0(), &mut StdRng::seed_from_u64(3));

        let mut seen = Vec::new();
        while let Some(index) = session.current() {
            assert_eq!(session.current_card(&deck).unwrap().question, format!("Q{}", index));
            seen.push(index);
            session.skip();
        }

        assert!(session.is_exhausted());
        assert_eq!(sorted(seen), vec![0, 1, 2]);

        // Advancing past the end is harmless
        session.advance();
        assert_eq!(session.cursor(), 3);
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_reveal_is_cleared_on_advance() {
        let (deck, _temp) = create_test_deck(2);
        let mut session = StudySession::start(&deck, t0(), &mut StdRng::seed_from_u64(5));

        assert!(!session.is_revealed());
        session.reveal();
        session.reveal();
        assert!(session.is_revealed());

        session.advance();
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_rate_suppresses_and_advances() {
        let (mut deck, _temp) = create_test_deck(2);
        let mut session = StudySession::start(&deck, t0(), &mut StdRng::seed_from_u64(11));
        let first = session.current().unwrap();

        let record = session.rate(&mut deck, 3.0, t0()).unwrap().unwrap();
        assert_eq!(record.suppress_until, Some(t0() + Duration::days(3)));
        assert_eq!(session.cursor(), 1);
        assert!(!deck.status(first, t0()).unwrap().is_available());
    }

    #[test]
    fn test_rate_when_exhausted_is_noop() {
        let (mut deck, _temp) = create_test_deck(0);
        let mut session = StudySession::start(&deck, t0(), &mut StdRng::seed_from_u64(0));

        assert!(session.is_empty());
        assert!(session.is_exhausted());
        assert_eq!(session.rate(&mut deck, 1.0, t0()).unwrap(), None);
    }

    #[test]
    fn test_failed_rate_keeps_cursor() {
        let (mut deck, _temp) = create_test_deck(2);
        let mut session = StudySession::start(&deck, t0(), &mut StdRng::seed_from_u64(2));

        let result = session.rate(&mut deck, -1.0, t0());
        assert!(matches!(result, Err(FlashcardError::Validation(_))));
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_eligible_set_frozen_for_session() {
        let (mut deck, _temp) = create_test_deck(3);
        let mut session = StudySession::start(&deck, t0(), &mut StdRng::seed_from_u64(9));
        let order = session.order().to_vec();

        // Suppressing a later card mid-session does not remove it from the pass
        deck.rate(order[2], 14.0, t0()).unwrap();
        session.skip();
        session.skip();
        assert_eq!(session.current(), Some(order[2]));
    }

    #[test]
    fn test_restart_reshuffles_same_set() {
        let (mut deck, _temp) = create_test_deck(6);
        deck.rate(0, 1.0, t0()).unwrap();
        let mut session = StudySession::start(&deck, t0(), &mut StdRng::seed_from_u64(4));
        let original = sorted(session.order().to_vec());

        while !session.is_exhausted() {
            session.skip();
        }

        // Card 0 has become eligible again, but a restart does not pick it up
        assert!(deck.status(0, t0() + Duration::days(2)).unwrap().is_available());
        session.reveal();
        session.restart(&mut StdRng::seed_from_u64(5));

        assert_eq!(session.cursor(), 0);
        assert!(!session.is_revealed());
        assert_eq!(sorted(session.order().to_vec()), original);
        assert!(!session.order().contains(&0));
    }
}
