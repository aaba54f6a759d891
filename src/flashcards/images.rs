//! Card image files
//!
//! Cards only ever hold a path. A path that no longer points at a file is
//! reported, never treated as an error.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::error::{FlashcardError, Result};
use super::models::Card;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Whether a card's image can be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    NoImage,
    Present(PathBuf),
    Missing(PathBuf),
}

/// Copy an image into the images directory as `{card_id}_{file_name}`.
///
/// Returns the stored path relative to `data_dir` (absolute only when
/// `images_dir` is), which is what a card records.
pub fn store_image(data_dir: &Path, images_dir: &Path, card_id: Uuid, source: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| FlashcardError::validation(format!("invalid image path: {}", source.display())))?;

    let extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(FlashcardError::validation(format!(
            "unsupported image type {:?}; expected one of {}",
            file_name,
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let stored = images_dir.join(format!("{}_{}", card_id.simple(), file_name));
    let target = data_dir.join(&stored);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, &target)?;

    log::info!("Stored image {} as {}", source.display(), target.display());
    Ok(stored)
}

/// Resolve a card's image against `base_dir` and check that it exists
pub fn image_status(card: &Card, base_dir: &Path) -> ImageStatus {
    let Some(image) = card.image.as_deref() else {
        return ImageStatus::NoImage;
    };

    let path = base_dir.join(image);
    if path.is_file() {
        ImageStatus::Present(path)
    } else {
        log::warn!("Image for card {} not found: {}", card.id, path.display());
        ImageStatus::Missing(path)
    }
}
