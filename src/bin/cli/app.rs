use std::path::Path;

use anyhow::{bail, Context, Result};

use flashdeck_lib::flashcards::FlashcardDeck;
use flashdeck_lib::Config;

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub deck: FlashcardDeck,
}

impl App {
    /// Load configuration and open the deck in the configured data directory
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path).context("Failed to load configuration")?;
        let deck = config.open_deck().with_context(|| {
            format!("Failed to open flashcards in {}", config.data_dir.display())
        })?;

        Ok(Self { config, deck })
    }

    /// Convert a 1-based card number from the command line to an index
    pub fn index_for_number(&self, number: usize) -> Result<usize> {
        if number == 0 || number > self.deck.len() {
            bail!(
                "No card number {}. There {} {} card{}.",
                number,
                if self.deck.len() == 1 { "is" } else { "are" },
                self.deck.len(),
                if self.deck.len() == 1 { "" } else { "s" }
            );
        }
        Ok(number - 1)
    }
}
