pub mod audio;
pub mod dom;
pub mod page_flip;
pub mod runner;
pub mod stage;

pub use leaf_engine;
pub use runner::BookRunner;

/// Generate all `#[wasm_bindgen]` exports for a book.
///
/// The host page script loads the module, calls `book_init()` once the DOM
/// is ready, drives `book_tick(dt_ms)` from `requestAnimationFrame`, and
/// forwards input and layout signals to the matching exports.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod book;
/// use book::MyBook;
///
/// leaf_web::export_book!(MyBook, "my-book");
/// ```
///
/// # Arguments
///
/// - `$book_type`: a type implementing `leaf_engine::Book` with a `new()` constructor
/// - `$book_name`: a string literal used in log messages
#[macro_export]
macro_rules! export_book {
    ($book_type:ty, $book_name:literal) => {
        #[wasm_bindgen]
        pub fn book_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            $crate::runner::start(<$book_type>::new(), $book_name);
        }

        #[wasm_bindgen]
        pub fn book_tick(dt_ms: f64) {
            $crate::runner::tick(dt_ms);
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn book_pointer_down() {
            $crate::runner::dispatch($crate::leaf_engine::Event::Gesture);
        }

        #[wasm_bindgen]
        pub fn book_touch_start() {
            $crate::runner::dispatch($crate::leaf_engine::Event::Gesture);
        }

        #[wasm_bindgen]
        pub fn book_key_down(key_code: u32) {
            $crate::runner::dispatch($crate::leaf_engine::Event::KeyDown { key_code });
        }

        #[wasm_bindgen]
        pub fn book_set_autoplay(enabled: bool) {
            $crate::runner::dispatch($crate::leaf_engine::Event::SetAutoplay(enabled));
        }

        #[wasm_bindgen]
        pub fn book_toggle_autoplay() {
            $crate::runner::dispatch($crate::leaf_engine::Event::ToggleAutoplay);
        }

        #[wasm_bindgen]
        pub fn book_go_to(page: u32) {
            $crate::runner::dispatch($crate::leaf_engine::Event::GoTo(
                $crate::leaf_engine::PageIndex(page),
            ));
        }

        // ---- Layout ----

        #[wasm_bindgen]
        pub fn book_window_resized() {
            $crate::runner::resized($crate::leaf_engine::ResizeKind::Window);
        }

        #[wasm_bindgen]
        pub fn book_visual_viewport_resized() {
            $crate::runner::resized($crate::leaf_engine::ResizeKind::VisualViewport);
        }

        #[wasm_bindgen]
        pub fn book_shutdown() {
            $crate::runner::shutdown();
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_current_page() -> u32 {
            $crate::runner::with_runner(|r| r.current_page()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_page_count() -> u32 {
            $crate::runner::with_runner(|r| r.page_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_autoplay_enabled() -> bool {
            $crate::runner::with_runner(|r| r.autoplay_enabled()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn get_audio_unlocked() -> bool {
            $crate::runner::with_runner(|r| r.audio_unlocked()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn get_book_events_ptr() -> *const f32 {
            $crate::runner::with_runner(|r| r.book_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_book_events_len() -> u32 {
            $crate::runner::with_runner(|r| r.book_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn book_events_consumed() {
            $crate::runner::with_runner(|r| r.book_events_consumed());
        }
    };
}
