use std::cell::RefCell;
use std::collections::VecDeque;

use leaf_engine::{Book, BookEvent, Event, Presenter, ResizeKind};

use crate::stage::Stage;

/// Presenter plus the browser resources it drives.
///
/// Lives in a `thread_local!` because browser callbacks (flip, ended,
/// unlock) need to reach it and wasm-bindgen cannot hand out Rust references.
pub struct BookRunner {
    presenter: Presenter,
    stage: Stage,
}

thread_local! {
    static RUNNER: RefCell<Option<BookRunner>> = RefCell::new(None);
    /// Events raised while the runner was busy. Drained by the outer dispatch.
    static PENDING: RefCell<VecDeque<Event>> = RefCell::new(VecDeque::new());
}

impl BookRunner {
    /// Execute every command the presenter queued.
    fn execute(&mut self) {
        for command in self.presenter.drain_commands() {
            self.stage
                .execute(command, self.presenter.config(), self.presenter.catalog());
        }
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn current_page(&self) -> u32 {
        self.presenter.current_page().0
    }

    pub fn page_count(&self) -> u32 {
        self.presenter.page_count()
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.presenter.autoplay_enabled()
    }

    pub fn audio_unlocked(&self) -> bool {
        self.presenter.audio_unlocked()
    }

    // ---- Pointer accessors for host reads ----

    pub fn book_events_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<BookEvent, f32>(self.presenter.events()).as_ptr()
    }

    pub fn book_events_len(&self) -> u32 {
        self.presenter.events().len() as u32
    }

    pub fn book_events_consumed(&mut self) {
        self.presenter.clear_events();
    }
}

/// Run `f` against the runner. `None` before `start`, or while an outer call
/// already holds it.
pub fn with_runner<R>(f: impl FnOnce(&mut BookRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.try_borrow_mut().ok()?;
        borrow.as_mut().map(f)
    })
}

/// Build the presenter for `book`, prepare the page elements and audio
/// channels, and create the first engine instance.
/// Skipped with a log entry when anything it needs is missing.
pub fn start<B: Book>(book: B, name: &str) {
    let mut presenter = match Presenter::from_book(&book) {
        Ok(presenter) => presenter,
        Err(err) => {
            log::error!("{}: {}", name, err);
            return;
        }
    };
    let Some(window) = web_sys::window() else {
        log::warn!("{}: no window, not starting", name);
        return;
    };
    let stage = match Stage::new(window, presenter.config(), presenter.catalog()) {
        Ok(stage) => stage,
        Err(err) => {
            log::error!("{}: audio setup failed: {:?}", name, err);
            return;
        }
    };

    presenter.init(stage.prerequisites(), stage.metrics());

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(BookRunner { presenter, stage });
    });
    with_runner(|r| r.execute());
    drain_pending();
    log::info!("{}: initialized", name);
}

/// Dispatch one event and everything it triggers.
///
/// Re-entrant calls (a browser callback firing while commands execute) are
/// queued and handled by the outermost call, so each event's side effects
/// finish before the next event is looked at.
pub fn dispatch(event: Event) {
    PENDING.with(|q| q.borrow_mut().push_back(event));
    drain_pending();
}

fn drain_pending() {
    let handled = with_runner(|r| loop {
        let Some(event) = PENDING.with(|q| q.borrow_mut().pop_front()) else {
            break;
        };
        r.presenter.handle(event);
        r.execute();
    });
    if handled.is_none() && RUNNER.with(|cell| matches!(cell.try_borrow(), Ok(b) if b.is_none())) {
        // Nothing to deliver to.
        PENDING.with(|q| q.borrow_mut().clear());
    }
}

/// Advance one animation frame.
pub fn tick(dt_ms: f64) {
    with_runner(|r| {
        r.presenter.tick(dt_ms);
        r.execute();
    });
    drain_pending();
}

/// Layout changed; measure now and let the presenter debounce.
pub fn resized(kind: ResizeKind) {
    let Some(metrics) = with_runner(|r| r.stage.metrics()) else {
        return;
    };
    dispatch(Event::Resize { kind, metrics });
}

/// Stop narration and destroy the engine instance.
pub fn shutdown() {
    with_runner(|r| {
        r.presenter.shutdown();
        r.execute();
    });
    PENDING.with(|q| q.borrow_mut().clear());
}
