//! Application configuration
//!
//! Loaded from a TOML file; every field is optional:
//! ```toml
//! data_dir = "/home/me/.local/share/flashdeck"
//! cards_file = "flashcards.json"
//! progress_file = "progress.json"
//! images_dir = "images"
//!
//! [ratings]
//! hard = 1
//! medium = 3
//! easy = 7
//! perfect = 14
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::flashcards::images::store_image;
use crate::flashcards::storage::validate_fields;
use crate::flashcards::{Card, FlashcardDeck, FlashcardError, RatingDelays, Result};

/// Environment variable that overrides `data_dir`
pub const DATA_DIR_ENV: &str = "FLASHDECK_DATA_DIR";

const APP_DIR_NAME: &str = "flashdeck";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the card and progress files
    pub data_dir: PathBuf,
    pub cards_file: String,
    pub progress_file: String,
    /// Where added images are copied; relative paths are under `data_dir`
    pub images_dir: PathBuf,
    /// Day counts offered on the study screen
    pub ratings: RatingDelays,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cards_file: "flashcards.json".to_string(),
            progress_file: "progress.json".to_string(),
            images_dir: PathBuf::from("images"),
            ratings: RatingDelays::default(),
        }
    }
}

/// Platform data directory, falling back to a dot-directory in the working directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".flashdeck"))
}

/// Platform location of the config file, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the platform config file is
    /// used when present and defaults otherwise. `FLASHDECK_DATA_DIR` wins
    /// over any configured data directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|path| path.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_data_dir_override(std::env::var_os(DATA_DIR_ENV));
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FlashcardError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        log::info!("Loading config from {}", path.display());
        Self::from_toml_str(&content).map_err(|e| match e {
            FlashcardError::Config(msg) => {
                FlashcardError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| FlashcardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.cards_file.trim().is_empty() || self.progress_file.trim().is_empty() {
            return Err(FlashcardError::Config(
                "cards_file and progress_file must not be empty".to_string(),
            ));
        }
        if self.cards_file == self.progress_file {
            return Err(FlashcardError::Config(
                "cards_file and progress_file must differ".to_string(),
            ));
        }
        self.ratings
            .validate()
            .map_err(|e| FlashcardError::Config(format!("ratings: {}", e)))
    }

    fn apply_data_dir_override(&mut self, value: Option<OsString>) {
        if let Some(dir) = value.filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
    }

    pub fn cards_path(&self) -> PathBuf {
        self.data_dir.join(&self.cards_file)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.data_dir.join(&self.progress_file)
    }

    pub fn images_path(&self) -> PathBuf {
        self.data_dir.join(&self.images_dir)
    }

    /// Create the data directory and open the deck stored in it
    pub fn open_deck(&self) -> Result<FlashcardDeck> {
        fs::create_dir_all(&self.data_dir)?;
        FlashcardDeck::open(self.cards_path(), self.progress_path())
    }

    /// Add a card, copying `image` into the images directory first.
    ///
    /// The card records the image relative to `data_dir`. A copied image
    /// is deleted again if the card cannot be saved.
    pub fn add_card(
        &self,
        deck: &mut FlashcardDeck,
        question: String,
        answer: String,
        image: Option<&Path>,
    ) -> Result<usize> {
        validate_fields(&question, &answer)?;

        let card = Card::new(question, answer);
        let Some(source) = image else {
            return deck.add_card(card);
        };

        let stored = store_image(&self.data_dir, &self.images_dir, card.id, source)?;
        let card = card.with_image(Some(stored.to_string_lossy().into_owned()));
        deck.add_card(card).map_err(|err| {
            if let Err(remove_err) = fs::remove_file(self.data_dir.join(&stored)) {
                log::warn!("Failed to remove image {}: {}", stored.display(), remove_err);
            }
            err
        })
    }
}
