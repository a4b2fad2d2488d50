use leaf_engine::{BookConfig, PageCatalog, ViewportMetrics, ViewportSize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement, NodeList, Window};

/// The sizing wrapper and the element the flip engine renders into.
pub struct BookDom {
    wrap: HtmlElement,
    book: HtmlElement,
}

impl BookDom {
    /// Look up both elements. `None` when either is missing.
    pub fn find(document: &Document, config: &BookConfig) -> Option<Self> {
        let wrap = document
            .get_element_by_id(&config.wrap_element_id)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let book = document
            .get_element_by_id(&config.book_element_id)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self { wrap, book })
    }

    pub fn book(&self) -> &HtmlElement {
        &self.book
    }

    /// Replace the book's children with one `div.page` per catalog entry.
    pub fn populate(&self, document: &Document, catalog: &PageCatalog) -> Result<(), JsValue> {
        self.book.set_inner_html("");
        for page in catalog.iter() {
            let div = document.create_element("div")?;
            div.set_class_name("page");
            let img = document.create_element("img")?.dyn_into::<HtmlImageElement>()?;
            img.set_src(&page.image_ref);
            img.set_alt("Page");
            div.append_child(&img)?;
            self.book.append_child(&div)?;
        }
        Ok(())
    }

    /// Fix the wrapper's pixel size so the browser cannot rescale it.
    pub fn pin_size(&self, size: ViewportSize) -> Result<(), JsValue> {
        let style = self.wrap.style();
        style.set_property("width", &format!("{}px", size.width))?;
        style.set_property("height", &format!("{}px", size.height))?;
        Ok(())
    }

    pub fn pages(&self) -> Result<NodeList, JsValue> {
        self.book.query_selector_all(".page")
    }
}

/// Current layout measurements. The visual viewport is reported when the
/// browser has one.
pub fn read_metrics(window: &Window) -> ViewportMetrics {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let metrics = ViewportMetrics::window(width, height);
    match window.visual_viewport() {
        Some(vv) => metrics.with_visual(vv.width(), vv.height()),
        None => metrics,
    }
}
