use crate::api::types::{Command, PageIndex, ViewportSize};
use crate::input::queue::CommandQueue;

/// Engine instance lifecycle. A rebuild re-enters `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipState {
    #[default]
    Uninitialized,
    Ready,
}

/// What the host found when it looked for the engine and its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prerequisites {
    /// Both the sizing wrapper and the book element exist.
    pub container: bool,
    /// The page-flip library is loaded.
    pub engine: bool,
}

impl Prerequisites {
    pub fn all() -> Self {
        Self {
            container: true,
            engine: true,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.container && self.engine
    }
}

/// Tracks the engine instance and the current page.
#[derive(Debug, Clone)]
pub struct FlipController {
    state: FlipState,
    current: PageIndex,
    last: PageIndex,
}

impl FlipController {
    pub fn new(last: PageIndex) -> Self {
        Self {
            state: FlipState::Uninitialized,
            current: PageIndex::COVER,
            last,
        }
    }

    pub fn state(&self) -> FlipState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == FlipState::Ready
    }

    pub fn current(&self) -> PageIndex {
        self.current
    }

    pub fn clamp(&self, page: PageIndex) -> PageIndex {
        page.min(self.last)
    }

    /// Replace the engine instance at `size`, positioned at `start` without
    /// animating. The jump raises no flip notification.
    pub fn build(&mut self, size: ViewportSize, start: PageIndex, out: &mut CommandQueue) {
        self.current = self.clamp(start);
        self.state = FlipState::Ready;
        out.push(Command::Build {
            size,
            start: self.current,
        });
        log::info!(
            "flip engine built at {}x{}, page {}",
            size.width, size.height, self.current.0
        );
    }

    /// Record a completed flip. Returns the new current page, or `None` when
    /// no engine exists to have flipped.
    pub fn on_flip(&mut self, index: u32) -> Option<PageIndex> {
        if !self.is_ready() {
            log::debug!("flip to {} ignored: engine not built", index);
            return None;
        }
        self.current = self.clamp(PageIndex(index));
        Some(self.current)
    }

    pub fn next(&self, out: &mut CommandQueue) {
        if self.is_ready() {
            out.push(Command::FlipNext);
        } else {
            log::debug!("next page ignored: engine not built");
        }
    }

    pub fn previous(&self, out: &mut CommandQueue) {
        if self.is_ready() {
            out.push(Command::FlipPrev);
        } else {
            log::debug!("previous page ignored: engine not built");
        }
    }

    pub fn go_to(&self, page: PageIndex, out: &mut CommandQueue) {
        if self.is_ready() {
            out.push(Command::FlipTo {
                page: self.clamp(page),
            });
        }
    }

    pub fn teardown(&mut self, out: &mut CommandQueue) {
        if self.is_ready() {
            out.push(Command::Teardown);
            self.state = FlipState::Uninitialized;
        }
    }

    /// The host has no engine instance after all. Nothing to tear down.
    pub fn invalidate(&mut self) {
        self.state = FlipState::Uninitialized;
    }
}
