pub mod api;
pub mod core;
pub mod audio;
pub mod controller;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::book::{Book, BookConfig, FlipSettings, EngineOptions};
pub use api::types::{PageIndex, ViewportSize, Channel, Command, BookEvent};
pub use assets::manifest::{BookManifest, PageEntry, ManifestError};
pub use assets::catalog::{PageCatalog, PageDescriptor};
pub use audio::channels::{AudioChannels, UnlockState};
pub use audio::voice::VoiceScheduler;
pub use controller::autoplay::AutoplayCoordinator;
pub use controller::flip::{FlipController, FlipState, Prerequisites};
pub use controller::presenter::Presenter;
pub use crate::core::timer::SingleSlot;
pub use crate::core::viewport::{ViewportMetrics, ResizeKind, ResizeMonitor, measure, should_rebuild};
pub use input::queue::{Event, CommandQueue};
pub use bridge::protocol::{KEY_ARROW_LEFT, KEY_ARROW_RIGHT};
