use crate::api::types::PageIndex;
use crate::assets::manifest::{BookManifest, ManifestError};

/// One page of the book. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
    pub image_ref: String,
    pub voice_ref: Option<String>,
}

/// Ordered, validated page list plus the shared audio assets.
/// Never empty, so there is always a valid current page.
#[derive(Debug, Clone)]
pub struct PageCatalog {
    pages: Vec<PageDescriptor>,
    silent_ref: String,
    background_ref: String,
    flip_effect_ref: String,
}

impl PageCatalog {
    /// Build a catalog from a parsed manifest.
    pub fn from_manifest(manifest: &BookManifest) -> Result<Self, ManifestError> {
        if manifest.pages.is_empty() {
            return Err(ManifestError::NoPages);
        }
        let mut pages = Vec::with_capacity(manifest.pages.len());
        for (page, entry) in manifest.pages.iter().enumerate() {
            if entry.image.trim().is_empty() {
                return Err(ManifestError::MissingImage { page });
            }
            pages.push(PageDescriptor {
                image_ref: entry.image.clone(),
                voice_ref: entry.voice.clone().filter(|v| !v.is_empty()),
            });
        }
        Ok(Self {
            pages,
            silent_ref: manifest.silent.clone(),
            background_ref: manifest.background.clone(),
            flip_effect_ref: manifest.flip_effect.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn last_index(&self) -> PageIndex {
        PageIndex(self.pages.len().saturating_sub(1) as u32)
    }

    pub fn is_last(&self, page: PageIndex) -> bool {
        page >= self.last_index()
    }

    /// Clamp an arbitrary index into `[0, len-1]`.
    pub fn clamp(&self, page: PageIndex) -> PageIndex {
        page.min(self.last_index())
    }

    pub fn get(&self, page: PageIndex) -> Option<&PageDescriptor> {
        self.pages.get(page.as_usize())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageDescriptor> {
        self.pages.iter()
    }

    /// Narration clip for a page, if it has one (the silent placeholder counts).
    pub fn voice(&self, page: PageIndex) -> Option<&str> {
        self.get(page).and_then(|p| p.voice_ref.as_deref())
    }

    /// True when the page has no real narration: either no clip at all or
    /// the silent placeholder.
    pub fn is_silent(&self, page: PageIndex) -> bool {
        match self.voice(page) {
            Some(voice) => voice == self.silent_ref,
            None => true,
        }
    }

    pub fn silent_ref(&self) -> &str {
        &self.silent_ref
    }

    pub fn background_ref(&self) -> &str {
        &self.background_ref
    }

    pub fn flip_effect_ref(&self) -> &str {
        &self.flip_effect_ref
    }
}

#[cfg(test)]
pub(crate) fn test_catalog(voices: &[Option<&str>]) -> PageCatalog {
    let manifest = BookManifest {
        silent: "silent.mp3".to_string(),
        background: "music.mp3".to_string(),
        flip_effect: "flip.mp3".to_string(),
        pages: voices
            .iter()
            .enumerate()
            .map(|(i, voice)| crate::assets::manifest::PageEntry {
                image: format!("page{i}.jpg"),
                voice: voice.map(str::to_string),
            })
            .collect(),
    };
    PageCatalog::from_manifest(&manifest).expect("test catalog is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest() {
        let json = r#"{
            "silent": "empty.mp3",
            "background": "music.mp3",
            "flip_effect": "flip.mp3",
            "pages": [
                { "image": "cover.jpg", "voice": "empty.mp3" },
                { "image": "one.jpg", "voice": "one.mp3" }
            ]
        }"#;
        let manifest = BookManifest::from_json(json).unwrap();
        let catalog = PageCatalog::from_manifest(&manifest).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.is_silent(PageIndex(0)));
        assert!(!catalog.is_silent(PageIndex(1)));
        assert_eq!(catalog.voice(PageIndex(1)), Some("one.mp3"));
        assert_eq!(catalog.background_ref(), "music.mp3");
    }

    #[test]
    fn rejects_empty_and_imageless_pages() {
        let mut manifest = BookManifest {
            silent: "s.mp3".into(),
            background: "b.mp3".into(),
            flip_effect: "f.mp3".into(),
            pages: vec![],
        };
        assert!(matches!(
            PageCatalog::from_manifest(&manifest),
            Err(ManifestError::NoPages)
        ));

        manifest.pages.push(crate::assets::manifest::PageEntry {
            image: " ".into(),
            voice: None,
        });
        assert!(matches!(
            PageCatalog::from_manifest(&manifest),
            Err(ManifestError::MissingImage { page: 0 })
        ));
    }

    #[test]
    fn clamp_and_last() {
        let catalog = test_catalog(&[None, Some("a.mp3"), None]);
        assert_eq!(catalog.last_index(), PageIndex(2));
        assert_eq!(catalog.clamp(PageIndex(99)), PageIndex(2));
        assert_eq!(catalog.clamp(PageIndex(1)), PageIndex(1));
        assert!(catalog.is_last(PageIndex(2)));
        assert!(!catalog.is_last(PageIndex(1)));
    }

    #[test]
    fn missing_voice_is_silent_without_clip() {
        let catalog = test_catalog(&[None, Some("")]);
        assert!(catalog.is_silent(PageIndex(0)));
        assert_eq!(catalog.voice(PageIndex(0)), None);
        // Empty strings are treated as no clip.
        assert_eq!(catalog.voice(PageIndex(1)), None);
    }
}
