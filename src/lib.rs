//! Flashdeck: a single-user flashcard study tool.
//!
//! Cards live in an ordered JSON collection. Rating a card after review
//! hides it from study for a fixed number of days.

pub mod config;
pub mod flashcards;

pub use config::Config;
