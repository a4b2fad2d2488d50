use serde::{Deserialize, Serialize};
use crate::api::types::ViewportSize;
use crate::assets::manifest::{BookManifest, ManifestError};

/// Configuration for the presenter, provided by the book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookConfig {
    /// Delay between a page becoming current and its narration starting.
    /// Lets the flip animation settle first (default: 1200 ms).
    pub voice_delay_ms: f64,
    /// Autoplay wait on pages without narration (default: 900 ms).
    pub autoplay_fallback_ms: f64,
    /// Debounce window for window resize notifications (default: 150 ms).
    pub resize_debounce_ms: f64,
    /// Debounce window for visual-viewport resizes, which fire far more often
    /// on mobile while toolbars slide (default: 80 ms).
    pub visual_resize_debounce_ms: f64,
    /// Minimum change on either axis that warrants a rebuild (default: 6 px).
    pub rebuild_threshold_px: u32,
    /// Breathing room subtracted from each side of the viewport (default: 12 px).
    pub viewport_padding_px: u32,
    /// Whether autoplay starts enabled.
    pub autoplay: bool,
    /// DOM id of the sizing wrapper.
    pub wrap_element_id: String,
    /// DOM id of the element the flip engine renders into.
    pub book_element_id: String,
    pub background_volume: f64,
    pub effect_volume: f64,
    pub flip: FlipSettings,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            voice_delay_ms: 1200.0,
            autoplay_fallback_ms: 900.0,
            resize_debounce_ms: 150.0,
            visual_resize_debounce_ms: 80.0,
            rebuild_threshold_px: 6,
            viewport_padding_px: 12,
            autoplay: false,
            wrap_element_id: "bookWrap".to_string(),
            book_element_id: "book".to_string(),
            background_volume: 0.5,
            effect_volume: 0.6,
            flip: FlipSettings::default(),
        }
    }
}

/// Static options for the page-flip engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FlipSettings {
    /// Intrinsic page resolution the engine scales from.
    pub page_width: u32,
    pub page_height: u32,
    pub use_portrait: bool,
    pub show_cover: bool,
    pub auto_size: bool,
    pub max_shadow_opacity: f32,
    pub use_mouse_events: bool,
    pub mobile_scroll_support: bool,
    pub flipping_time_ms: u32,
}

impl Default for FlipSettings {
    fn default() -> Self {
        Self {
            page_width: 1024,
            page_height: 1536,
            use_portrait: true,
            show_cover: false,
            auto_size: true,
            max_shadow_opacity: 0.25,
            use_mouse_events: true,
            mobile_scroll_support: false,
            flipping_time_ms: 700,
        }
    }
}

impl FlipSettings {
    /// Construction options for one engine instance, stretch-fit and pinned
    /// to exactly `size`.
    pub fn engine_options(&self, size: ViewportSize) -> EngineOptions {
        EngineOptions {
            width: self.page_width,
            height: self.page_height,
            size: "stretch".to_string(),
            min_width: size.width,
            max_width: size.width,
            min_height: size.height,
            max_height: size.height,
            use_portrait: self.use_portrait,
            show_cover: self.show_cover,
            auto_size: self.auto_size,
            max_shadow_opacity: self.max_shadow_opacity,
            use_mouse_events: self.use_mouse_events,
            mobile_scroll_support: self.mobile_scroll_support,
            flipping_time: self.flipping_time_ms,
        }
    }
}

/// Settings object in the shape the page-flip library expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    pub width: u32,
    pub height: u32,
    pub size: String,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub use_portrait: bool,
    pub show_cover: bool,
    pub auto_size: bool,
    pub max_shadow_opacity: f32,
    pub use_mouse_events: bool,
    pub mobile_scroll_support: bool,
    pub flipping_time: u32,
}

impl EngineOptions {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The contract every presentation must fulfill.
pub trait Book {
    /// Return presenter configuration. Called once before init.
    fn config(&self) -> BookConfig {
        BookConfig::default()
    }

    /// The page and audio assets. Called once at startup.
    fn manifest(&self) -> Result<BookManifest, ManifestError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_options_pin_size() {
        let opts = FlipSettings::default().engine_options(ViewportSize::new(400, 600));
        assert_eq!((opts.min_width, opts.max_width), (400, 400));
        assert_eq!((opts.min_height, opts.max_height), (600, 600));
        assert_eq!((opts.width, opts.height), (1024, 1536));
    }

    #[test]
    fn engine_options_serialize_camel_case() {
        let json = FlipSettings::default()
            .engine_options(ViewportSize::new(300, 450))
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["size"], "stretch");
        assert_eq!(value["minWidth"], 300);
        assert_eq!(value["maxHeight"], 450);
        assert_eq!(value["usePortrait"], true);
        assert_eq!(value["showCover"], false);
        assert_eq!(value["mobileScrollSupport"], false);
        assert_eq!(value["flippingTime"], 700);
    }

    #[test]
    fn default_timings() {
        let config = BookConfig::default();
        assert_eq!(config.voice_delay_ms, 1200.0);
        assert_eq!(config.autoplay_fallback_ms, 900.0);
        assert_eq!(config.rebuild_threshold_px, 6);
        assert!(!config.autoplay);
    }
}
