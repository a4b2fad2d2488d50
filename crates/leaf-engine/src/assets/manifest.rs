use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Asset manifest describing every page and the shared audio assets of a book.
/// Loaded from a JSON file at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookManifest {
    /// Placeholder clip that stands for "no narration on this page".
    pub silent: String,
    /// Looping soundtrack.
    pub background: String,
    /// One-shot sound played on every flip.
    pub flip_effect: String,
    /// Pages in reading order.
    pub pages: Vec<PageEntry>,
}

/// Describes a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    /// Relative path to the full-page image.
    pub image: String,
    /// Relative path to the narration clip.
    #[serde(default)]
    pub voice: Option<String>,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("manifest has no pages")]
    NoPages,
    #[error("page {page} has no image")]
    MissingImage { page: usize },
}

impl BookManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }
}
