use leaf_engine::{Book, BookConfig, BookManifest, ManifestError};

const MANIFEST: &str = include_str!("../book.json");

/// The Slackmas story: a silent cover, narrated pages, a silent stretch in
/// the middle and a narrated ending.
pub struct SlackmasBook;

impl SlackmasBook {
    pub fn new() -> Self {
        Self
    }
}

impl Book for SlackmasBook {
    fn config(&self) -> BookConfig {
        BookConfig::default()
    }

    fn manifest(&self) -> Result<BookManifest, ManifestError> {
        BookManifest::from_json(MANIFEST)
    }
}
