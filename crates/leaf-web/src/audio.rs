use js_sys::{Function, Promise};
use leaf_engine::Channel;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// One playback channel backed by its own `<audio>` element.
///
/// Every play is best effort: autoplay-policy rejections are swallowed.
pub struct AudioElement {
    element: HtmlAudioElement,
    channel: Channel,
    /// Rejection sink shared by every play promise.
    ignore: Closure<dyn FnMut(JsValue)>,
    /// Pause and rewind after a successful unlock play.
    rewind: Closure<dyn FnMut(JsValue)>,
}

impl AudioElement {
    pub fn new(channel: Channel, src: Option<&str>, volume: f64) -> Result<Self, JsValue> {
        let element = HtmlAudioElement::new()?;
        if let Some(src) = src {
            element.set_src(src);
        }
        element.set_preload("auto");
        element.set_loop(channel.looping());
        element.set_volume(volume);

        let ignore = Closure::new(|_: JsValue| {});
        let rewind = {
            let element = element.clone();
            Closure::new(move |_: JsValue| {
                let _ = element.pause();
                element.set_current_time(0.0);
            })
        };

        Ok(Self {
            element,
            channel,
            ignore,
            rewind,
        })
    }

    pub fn set_src(&self, src: &str) {
        self.element.set_src(src);
    }

    pub fn play(&self) {
        match self.element.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.ignore);
            }
            Err(err) => log::debug!("{:?} play refused: {:?}", self.channel, err),
        }
    }

    /// Pause and rewind.
    pub fn stop(&self) {
        let _ = self.element.pause();
        self.element.set_current_time(0.0);
    }

    /// Stop, rewind, play from the top.
    pub fn restart(&self) {
        self.stop();
        self.play();
    }

    /// Silent play immediately paused and rewound. The returned promise
    /// resolves whether or not the browser allowed playback.
    pub fn unlock_attempt(&self) -> Promise {
        match self.element.play() {
            Ok(promise) => promise.then2(&self.rewind, &self.ignore),
            Err(_) => Promise::resolve(&JsValue::UNDEFINED),
        }
    }

    pub fn set_on_ended(&self, callback: Option<&Function>) {
        self.element.set_onended(callback);
    }
}

impl Drop for AudioElement {
    fn drop(&mut self) {
        self.element.set_onended(None);
        self.stop();
    }
}
