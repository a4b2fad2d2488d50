use crate::api::types::{Command, PageIndex};
use crate::assets::catalog::PageCatalog;
use crate::core::timer::SingleSlot;
use crate::input::queue::CommandQueue;

/// Delayed, cancellable narration. At most one clip is ever pending or
/// audible: every new request stops the previous one first.
#[derive(Debug, Clone)]
pub struct VoiceScheduler {
    delay_ms: f64,
    pending: SingleSlot<PageIndex>,
}

impl VoiceScheduler {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: SingleSlot::new(),
        }
    }

    /// Stop whatever is pending or playing, then schedule `page`'s clip.
    /// Pages without a clip only stop.
    pub fn play_for(&mut self, page: PageIndex, catalog: &PageCatalog, out: &mut CommandQueue) {
        self.stop(out);
        if catalog.voice(page).is_none() {
            return;
        }
        self.pending.arm(self.delay_ms, page);
    }

    pub fn stop(&mut self, out: &mut CommandQueue) {
        if let Some(page) = self.pending.cancel() {
            log::debug!("voice for page {} cancelled before start", page.0);
        }
        out.push(Command::StopVoice);
    }

    /// Advance the start delay. Returns the page whose clip started.
    pub fn tick(&mut self, dt_ms: f64, out: &mut CommandQueue) -> Option<PageIndex> {
        let page = self.pending.tick(dt_ms)?;
        out.push(Command::PlayVoice { page });
        Some(page)
    }

    /// Page waiting for its delayed start.
    pub fn pending(&self) -> Option<PageIndex> {
        self.pending.payload().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::catalog::test_catalog;

    #[test]
    fn starts_after_delay() {
        let catalog = test_catalog(&[Some("a.mp3"), Some("b.mp3")]);
        let mut voice = VoiceScheduler::new(1200.0);
        let mut out = CommandQueue::new();

        voice.play_for(PageIndex(1), &catalog, &mut out);
        assert_eq!(out.drain(), vec![Command::StopVoice]);
        assert_eq!(voice.tick(1199.0, &mut out), None);
        assert_eq!(voice.tick(1.0, &mut out), Some(PageIndex(1)));
        assert_eq!(out.drain(), vec![Command::PlayVoice { page: PageIndex(1) }]);
    }

    #[test]
    fn newer_request_cancels_pending_start() {
        let catalog = test_catalog(&[Some("a.mp3"), Some("b.mp3")]);
        let mut voice = VoiceScheduler::new(1200.0);
        let mut out = CommandQueue::new();

        voice.play_for(PageIndex(0), &catalog, &mut out);
        voice.tick(800.0, &mut out);
        voice.play_for(PageIndex(1), &catalog, &mut out);

        let mut started = Vec::new();
        for _ in 0..40 {
            if let Some(page) = voice.tick(100.0, &mut out) {
                started.push(page);
            }
        }
        assert_eq!(started, vec![PageIndex(1)]);
        assert!(!out.iter().any(|c| *c == Command::PlayVoice { page: PageIndex(0) }));
    }

    #[test]
    fn page_without_clip_schedules_nothing() {
        let catalog = test_catalog(&[None]);
        let mut voice = VoiceScheduler::new(1200.0);
        let mut out = CommandQueue::new();

        voice.play_for(PageIndex(0), &catalog, &mut out);
        assert_eq!(voice.pending(), None);
        assert_eq!(voice.tick(5000.0, &mut out), None);
        assert_eq!(out.drain(), vec![Command::StopVoice]);
    }

    #[test]
    fn stop_cancels_pending() {
        let catalog = test_catalog(&[Some("a.mp3")]);
        let mut voice = VoiceScheduler::new(1200.0);
        let mut out = CommandQueue::new();

        voice.play_for(PageIndex(0), &catalog, &mut out);
        voice.stop(&mut out);
        assert_eq!(voice.tick(5000.0, &mut out), None);
    }
}
