//! Flashcard study core
//!
//! This module provides:
//! - Card storage (ordered collection persisted as JSON)
//! - Suppression scheduling (cards hidden for a fixed delay after rating)
//! - Shuffled study sessions over the eligible cards
//! - CSV batch import and image file handling

pub mod deck;
pub mod error;
pub mod images;
pub mod import;
pub mod models;
pub mod rating;
pub mod scheduler;
pub mod session;
pub mod storage;

pub use deck::FlashcardDeck;
pub use error::{FlashcardError, Result};
pub use import::{ImportPolicy, ImportRow};
pub use models::*;
pub use rating::{Rating, RatingDelays};
pub use scheduler::ReviewScheduler;
pub use session::StudySession;
pub use storage::CardStore;
