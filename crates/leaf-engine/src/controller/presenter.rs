//! The single controller object. Owns every piece of mutable state and turns
//! `Event`s and frame ticks into `Command`s for the host bridge.

use crate::api::book::{Book, BookConfig};
use crate::api::types::{BookEvent, Command, PageIndex};
use crate::assets::catalog::PageCatalog;
use crate::assets::manifest::ManifestError;
use crate::audio::channels::AudioChannels;
use crate::audio::voice::VoiceScheduler;
use crate::bridge::protocol::{
    EVENT_AUDIO_UNLOCKED, EVENT_AUTOPLAY_CHANGED, EVENT_NARRATION_STARTED,
    EVENT_PAGE_CHANGED, EVENT_REBUILT, KEY_ARROW_LEFT, KEY_ARROW_RIGHT, MAX_BOOK_EVENTS,
};
use crate::controller::autoplay::AutoplayCoordinator;
use crate::controller::flip::{FlipController, Prerequisites};
use crate::core::viewport::{ResizeMonitor, ViewportMetrics};
use crate::input::queue::{CommandQueue, Event};

pub struct Presenter {
    config: BookConfig,
    catalog: PageCatalog,
    flip: FlipController,
    audio: AudioChannels,
    voice: VoiceScheduler,
    autoplay: AutoplayCoordinator,
    resize: ResizeMonitor,
    commands: CommandQueue,
    events: Vec<BookEvent>,
}

impl Presenter {
    pub fn new(config: BookConfig, catalog: PageCatalog) -> Self {
        Self {
            flip: FlipController::new(catalog.last_index()),
            audio: AudioChannels::new(),
            voice: VoiceScheduler::new(config.voice_delay_ms),
            autoplay: AutoplayCoordinator::new(config.autoplay, config.autoplay_fallback_ms),
            resize: ResizeMonitor::new(&config),
            commands: CommandQueue::new(),
            events: Vec::new(),
            config,
            catalog,
        }
    }

    /// Build a presenter from a book's configuration and manifest.
    pub fn from_book<B: Book>(book: &B) -> Result<Self, ManifestError> {
        let manifest = book.manifest()?;
        let catalog = PageCatalog::from_manifest(&manifest)?;
        Ok(Self::new(book.config(), catalog))
    }

    /// Build the first engine instance at the cover.
    /// Skipped (returns false) when the engine or its container is missing.
    pub fn init(&mut self, prerequisites: Prerequisites, metrics: ViewportMetrics) -> bool {
        if !prerequisites.is_satisfied() {
            log::warn!(
                "presentation not started: container={} engine={}",
                prerequisites.container, prerequisites.engine
            );
            return false;
        }
        let size = self.resize.accept(metrics);
        let start = self.flip.current();
        self.flip.build(size, start, &mut self.commands);
        self.push_event(BookEvent::new(EVENT_REBUILT, size.width as f32, size.height as f32));
        true
    }

    /// Dispatch one event. Its side effects are complete when this returns.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Gesture => {
                self.audio.unlock(&mut self.commands);
            }
            Event::UnlockSettled => {
                if self.audio.unlock_settled() {
                    self.push_event(BookEvent::new(EVENT_AUDIO_UNLOCKED, 0.0, 0.0));
                }
            }
            Event::KeyDown { key_code } => match key_code {
                KEY_ARROW_RIGHT => self.flip.next(&mut self.commands),
                KEY_ARROW_LEFT => self.flip.previous(&mut self.commands),
                _ => {}
            },
            Event::Flip { index } => self.on_flip(index),
            Event::VoiceEnded => self.on_voice_ended(),
            Event::SetAutoplay(enabled) => self.set_autoplay(enabled),
            Event::ToggleAutoplay => self.set_autoplay(!self.autoplay.is_enabled()),
            Event::GoTo(page) => self.flip.go_to(page, &mut self.commands),
            Event::Resize { kind, metrics } => self.resize.notify(kind, metrics),
            Event::BuildFailed => self.on_build_failed(),
        }
    }

    /// Advance virtual time by one animation frame.
    pub fn tick(&mut self, dt_ms: f64) {
        if let Some(size) = self.resize.tick(dt_ms, self.flip.is_ready()) {
            if self.flip.is_ready() {
                let keep = self.flip.current();
                self.flip.build(size, keep, &mut self.commands);
                self.push_event(BookEvent::new(EVENT_REBUILT, size.width as f32, size.height as f32));
            }
        }

        if let Some(page) = self.voice.tick(dt_ms, &mut self.commands) {
            self.push_event(BookEvent::new(EVENT_NARRATION_STARTED, page.0 as f32, 0.0));
        }

        let on_last = self.catalog.is_last(self.flip.current());
        if self.autoplay.tick(dt_ms, on_last) {
            // The page is leaving; its placeholder clip must not end later
            // and request a second advance.
            self.voice.stop(&mut self.commands);
            self.flip.next(&mut self.commands);
        }
    }

    /// Stop narration, drop every timer and destroy the engine instance.
    pub fn shutdown(&mut self) {
        self.voice.stop(&mut self.commands);
        self.autoplay.reset();
        self.resize.reset();
        self.flip.teardown(&mut self.commands);
    }

    /// The host could not create an engine instance. Navigation stays a
    /// no-op until the presenter is initialised again.
    fn on_build_failed(&mut self) {
        if !self.flip.is_ready() {
            return;
        }
        log::warn!("flip engine unavailable, navigation disabled");
        self.voice.stop(&mut self.commands);
        self.autoplay.reset();
        self.resize.reset();
        self.flip.invalidate();
    }

    fn on_flip(&mut self, index: u32) {
        if !self.flip.is_ready() {
            return;
        }
        self.audio.play_effect(&mut self.commands);
        self.autoplay.on_flip();

        let Some(page) = self.flip.on_flip(index) else {
            return;
        };
        // The cover never starts the soundtrack; only a flip past it does.
        if page >= PageIndex(1) {
            self.audio.start_background_once(&mut self.commands);
        }
        self.voice.play_for(page, &self.catalog, &mut self.commands);
        if self.autoplay.is_enabled() && self.catalog.is_silent(page) {
            self.autoplay.arm_fallback();
        }

        self.push_event(BookEvent::new(
            EVENT_PAGE_CHANGED,
            page.0 as f32,
            self.catalog.len() as f32,
        ));
    }

    fn on_voice_ended(&mut self) {
        if !self.flip.is_ready() {
            return;
        }
        let on_last = self.catalog.is_last(self.flip.current());
        if self.autoplay.on_voice_ended(on_last) {
            self.flip.next(&mut self.commands);
        }
    }

    fn set_autoplay(&mut self, enabled: bool) {
        if !self.autoplay.set_enabled(enabled) {
            return;
        }
        self.push_event(BookEvent::new(
            EVENT_AUTOPLAY_CHANGED,
            if enabled { 1.0 } else { 0.0 },
            0.0,
        ));
        if enabled && self.flip.is_ready() {
            let page = self.flip.current();
            self.voice.play_for(page, &self.catalog, &mut self.commands);
            if self.catalog.is_silent(page) {
                self.autoplay.arm_fallback();
            }
        }
    }

    fn push_event(&mut self, event: BookEvent) {
        if self.events.len() >= MAX_BOOK_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    // ---- Host accessors ----

    /// Drain pending commands for execution.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        self.commands.drain()
    }

    pub fn events(&self) -> &[BookEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PageCatalog {
        &self.catalog
    }

    pub fn current_page(&self) -> PageIndex {
        self.flip.current()
    }

    pub fn page_count(&self) -> u32 {
        self.catalog.len() as u32
    }

    pub fn is_ready(&self) -> bool {
        self.flip.is_ready()
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay.is_enabled()
    }

    pub fn audio_unlocked(&self) -> bool {
        self.audio.is_unlocked()
    }

    pub fn background_started(&self) -> bool {
        self.audio.background_started()
    }

    /// Page whose narration is waiting for its delayed start.
    pub fn pending_voice(&self) -> Option<PageIndex> {
        self.voice.pending()
    }

    pub fn autoplay_fallback_armed(&self) -> bool {
        self.autoplay.fallback_armed()
    }
}
