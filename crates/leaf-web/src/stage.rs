use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Array, Promise};
use leaf_engine::{
    BookConfig, Channel, Command, Event, FlipSettings, PageCatalog, PageIndex, Prerequisites,
    ViewportMetrics, ViewportSize,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

use crate::audio::AudioElement;
use crate::dom::{read_metrics, BookDom};
use crate::page_flip::{self, PageFlip};
use crate::runner::dispatch;

/// Every browser resource the presenter drives: the three audio channels,
/// the page elements and the flip engine instance.
pub struct Stage {
    window: Window,
    dom: Option<BookDom>,
    engine: Option<PageFlip>,
    /// Set while an engine instance is being positioned. Flip notifications
    /// raised meanwhile are not user flips and are dropped.
    building: Rc<Cell<bool>>,
    on_flip: Closure<dyn FnMut(JsValue)>,
    voice: AudioElement,
    background: AudioElement,
    effect: AudioElement,
    /// Kept alive for the voice element's `onended` hook.
    _on_voice_ended: Closure<dyn FnMut(JsValue)>,
    on_unlock_settled: Closure<dyn FnMut(JsValue)>,
}

impl Stage {
    pub fn new(window: Window, config: &BookConfig, catalog: &PageCatalog) -> Result<Self, JsValue> {
        let voice = AudioElement::new(Channel::Voice, None, 1.0)?;
        let background = AudioElement::new(
            Channel::Background,
            Some(catalog.background_ref()),
            config.background_volume,
        )?;
        let effect = AudioElement::new(
            Channel::FlipEffect,
            Some(catalog.flip_effect_ref()),
            config.effect_volume,
        )?;

        let on_voice_ended: Closure<dyn FnMut(JsValue)> =
            Closure::new(|_: JsValue| dispatch(Event::VoiceEnded));
        voice.set_on_ended(Some(on_voice_ended.as_ref().unchecked_ref()));

        let on_unlock_settled: Closure<dyn FnMut(JsValue)> =
            Closure::new(|_: JsValue| dispatch(Event::UnlockSettled));

        let building = Rc::new(Cell::new(false));
        let on_flip: Closure<dyn FnMut(JsValue)> = {
            let building = building.clone();
            Closure::new(move |event: JsValue| {
                if building.get() {
                    log::debug!("flip notification during build dropped");
                    return;
                }
                if let Some(index) = page_flip::flip_target(&event) {
                    dispatch(Event::Flip { index });
                }
            })
        };

        let dom = window
            .document()
            .and_then(|document| Self::prepare_dom(&document, config, catalog));

        Ok(Self {
            window,
            dom,
            engine: None,
            building,
            on_flip,
            voice,
            background,
            effect,
            _on_voice_ended: on_voice_ended,
            on_unlock_settled,
        })
    }

    fn prepare_dom(document: &Document, config: &BookConfig, catalog: &PageCatalog) -> Option<BookDom> {
        let dom = BookDom::find(document, config)?;
        if let Err(err) = dom.populate(document, catalog) {
            log::error!("failed to create page elements: {:?}", err);
            return None;
        }
        Some(dom)
    }

    pub fn prerequisites(&self) -> Prerequisites {
        Prerequisites {
            container: self.dom.is_some(),
            engine: page_flip::is_available(&self.window),
        }
    }

    pub fn metrics(&self) -> ViewportMetrics {
        read_metrics(&self.window)
    }

    pub fn execute(&mut self, command: Command, config: &BookConfig, catalog: &PageCatalog) {
        match command {
            Command::UnlockChannels => self.unlock(),
            Command::PlayEffect => self.effect.restart(),
            Command::StartBackground => self.background.play(),
            Command::StopVoice => self.voice.stop(),
            Command::PlayVoice { page } => self.play_voice(page, catalog),
            Command::Build { size, start } => {
                if !self.build(size, start, &config.flip) {
                    dispatch(Event::BuildFailed);
                }
            }
            Command::FlipNext => match &self.engine {
                Some(engine) => engine.flip_next(),
                None => log::warn!("next page dropped: no page flip instance"),
            },
            Command::FlipPrev => match &self.engine {
                Some(engine) => engine.flip_prev(),
                None => log::warn!("previous page dropped: no page flip instance"),
            },
            Command::FlipTo { page } => match &self.engine {
                Some(engine) => engine.flip(page.0),
                None => log::warn!("jump to page {} dropped: no page flip instance", page.0),
            },
            Command::Teardown => self.destroy_engine(),
        }
    }

    fn unlock(&self) {
        let attempts = Array::new();
        for channel in [&self.background, &self.effect, &self.voice] {
            attempts.push(&channel.unlock_attempt());
        }
        let _ = Promise::all(&attempts).then(&self.on_unlock_settled);
    }

    fn play_voice(&self, page: PageIndex, catalog: &PageCatalog) {
        let Some(src) = catalog.voice(page) else {
            return;
        };
        self.voice.set_src(src);
        self.voice.play();
    }

    /// Replace the engine instance. False when none could be created.
    fn build(&mut self, size: ViewportSize, start: PageIndex, flip: &FlipSettings) -> bool {
        self.destroy_engine();
        let Some(dom) = &self.dom else {
            return false;
        };
        if let Err(err) = dom.pin_size(size) {
            log::warn!("could not pin book size: {:?}", err);
        }

        let settings = match flip.engine_options(size).to_json() {
            Ok(json) => match js_sys::JSON::parse(&json) {
                Ok(settings) => settings,
                Err(err) => {
                    log::error!("flip settings rejected: {:?}", err);
                    return false;
                }
            },
            Err(err) => {
                log::error!("flip settings not serializable: {}", err);
                return false;
            }
        };
        let engine = match PageFlip::new(dom.book(), &settings) {
            Ok(engine) => engine,
            Err(err) => {
                log::error!("page flip construction failed: {:?}", err);
                return false;
            }
        };

        self.building.set(true);
        engine.on("flip", self.on_flip.as_ref().unchecked_ref());
        match dom.pages() {
            Ok(pages) => engine.load_from_html(&pages),
            Err(err) => log::error!("page elements unavailable: {:?}", err),
        }
        engine.turn_to_page(start.0);
        self.building.set(false);

        self.engine = Some(engine);
        true
    }

    fn destroy_engine(&mut self) {
        if let Some(engine) = self.engine.take() {
            // The old instance may already be inconsistent; a fresh one follows.
            if let Err(err) = engine.destroy() {
                log::debug!("ignoring page flip destroy failure: {:?}", err);
            }
        }
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        self.destroy_engine();
    }
}
