//! Bindings to the `St.PageFlip` page-turning library.

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, NodeList, Window};

#[wasm_bindgen(js_namespace = St)]
extern "C" {
    pub type PageFlip;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(element: &HtmlElement, settings: &JsValue) -> Result<PageFlip, JsValue>;

    #[wasm_bindgen(method, js_name = loadFromHTML)]
    pub fn load_from_html(this: &PageFlip, items: &NodeList);

    #[wasm_bindgen(method)]
    pub fn on(this: &PageFlip, event: &str, callback: &Function);

    /// Jump without animating. Raises no `flip` event.
    #[wasm_bindgen(method, js_name = turnToPage)]
    pub fn turn_to_page(this: &PageFlip, page: u32);

    #[wasm_bindgen(method, js_name = flipNext)]
    pub fn flip_next(this: &PageFlip);

    #[wasm_bindgen(method, js_name = flipPrev)]
    pub fn flip_prev(this: &PageFlip);

    #[wasm_bindgen(method)]
    pub fn flip(this: &PageFlip, page: u32);

    #[wasm_bindgen(method, catch)]
    pub fn destroy(this: &PageFlip) -> Result<(), JsValue>;
}

/// True when `window.St.PageFlip` is a constructor.
pub fn is_available(window: &Window) -> bool {
    let Ok(st) = Reflect::get(window, &JsValue::from_str("St")) else {
        return false;
    };
    if !st.is_object() {
        return false;
    }
    Reflect::get(&st, &JsValue::from_str("PageFlip"))
        .map(|ctor| ctor.is_function())
        .unwrap_or(false)
}

/// Destination page carried by a `flip` event (`e.data`).
pub fn flip_target(event: &JsValue) -> Option<u32> {
    let data = Reflect::get(event, &JsValue::from_str("data")).ok()?;
    let index = data.as_f64()?;
    (index >= 0.0).then_some(index as u32)
}
