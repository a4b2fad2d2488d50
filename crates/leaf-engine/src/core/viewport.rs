//! Viewport sizing: the 2:3 portrait box, the rebuild threshold, and the
//! debounced next-frame rebuild.

use crate::api::book::BookConfig;
use crate::api::types::ViewportSize;
use crate::core::timer::SingleSlot;

/// Raw layout measurements reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Visual viewport size, when the browser exposes one. Mobile toolbars
    /// change this independently of the window.
    pub visual: Option<(f64, f64)>,
    pub window_width: f64,
    pub window_height: f64,
}

impl ViewportMetrics {
    pub fn window(width: f64, height: f64) -> Self {
        Self {
            visual: None,
            window_width: width,
            window_height: height,
        }
    }

    pub fn with_visual(mut self, width: f64, height: f64) -> Self {
        self.visual = Some((width, height));
        self
    }

    /// Usable area, floored to whole pixels.
    pub fn available(&self) -> (i64, i64) {
        let (w, h) = self
            .visual
            .unwrap_or((self.window_width, self.window_height));
        (w.floor() as i64, h.floor() as i64)
    }
}

/// Which layout signal fired. They debounce with different windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeKind {
    Window,
    VisualViewport,
}

/// Largest 2:3 portrait box that fits the padded available area.
pub fn measure(metrics: &ViewportMetrics, padding: u32) -> ViewportSize {
    let (vw, vh) = metrics.available();
    let pad = padding as i64 * 2;
    let max_w = (vw - pad).max(0);
    let max_h = (vh - pad).max(0);

    let width = max_w.min(max_h * 2 / 3);
    let height = width * 3 / 2;
    ViewportSize::new(width as u32, height as u32)
}

/// True when either dimension moved by at least `threshold` pixels.
pub fn should_rebuild(new: ViewportSize, last: ViewportSize, threshold: u32) -> bool {
    new.width.abs_diff(last.width) >= threshold || new.height.abs_diff(last.height) >= threshold
}

/// Coalesces layout notifications into at most one rebuild per settled layout.
#[derive(Debug, Clone)]
pub struct ResizeMonitor {
    debounce: SingleSlot<()>,
    metrics: Option<ViewportMetrics>,
    accepted: ViewportSize,
    /// Size waiting for the next animation frame.
    in_flight: Option<ViewportSize>,
    window_debounce_ms: f64,
    visual_debounce_ms: f64,
    padding: u32,
    threshold: u32,
}

impl ResizeMonitor {
    pub fn new(config: &BookConfig) -> Self {
        Self {
            debounce: SingleSlot::new(),
            metrics: None,
            accepted: ViewportSize::default(),
            in_flight: None,
            window_debounce_ms: config.resize_debounce_ms,
            visual_debounce_ms: config.visual_resize_debounce_ms,
            padding: config.viewport_padding_px,
            threshold: config.rebuild_threshold_px,
        }
    }

    /// Measure `metrics` and adopt the result as the accepted size.
    /// Used for the initial build.
    pub fn accept(&mut self, metrics: ViewportMetrics) -> ViewportSize {
        let size = measure(&metrics, self.padding);
        self.metrics = Some(metrics);
        self.accepted = size;
        size
    }

    pub fn accepted(&self) -> ViewportSize {
        self.accepted
    }

    /// Record fresh measurements and restart the debounce window.
    pub fn notify(&mut self, kind: ResizeKind, metrics: ViewportMetrics) {
        self.metrics = Some(metrics);
        let delay = match kind {
            ResizeKind::Window => self.window_debounce_ms,
            ResizeKind::VisualViewport => self.visual_debounce_ms,
        };
        self.debounce.arm(delay, ());
    }

    pub fn rebuild_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Advance one frame. Returns the size to rebuild at on this frame, if a
    /// rebuild was scheduled by an earlier frame. `ready` is false while no
    /// engine instance exists, which drops settled layouts.
    ///
    /// The caller rebuilds synchronously on the frame the size is returned,
    /// so a layout settling on that same frame is compared against the
    /// size just applied.
    pub fn tick(&mut self, dt_ms: f64, ready: bool) -> Option<ViewportSize> {
        let due = self.in_flight.take();
        if let Some(size) = due {
            self.accepted = size;
        }

        if self.debounce.tick(dt_ms).is_some() {
            self.settle(ready);
        }
        due
    }

    /// Forget pending work, e.g. on teardown.
    pub fn reset(&mut self) {
        self.debounce.cancel();
        self.in_flight = None;
    }

    fn settle(&mut self, ready: bool) {
        if !ready {
            return;
        }
        let Some(metrics) = self.metrics else {
            return;
        };
        let size = measure(&metrics, self.padding);
        if should_rebuild(size, self.accepted, self.threshold) {
            log::debug!(
                "viewport settled at {}x{} (was {}x{}), rebuilding next frame",
                size.width, size.height, self.accepted.width, self.accepted.height
            );
            self.in_flight = Some(size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> ResizeMonitor {
        ResizeMonitor::new(&BookConfig::default())
    }

    #[test]
    fn measure_portrait_screen() {
        // 390x844 phone: width-bound.
        let size = measure(&ViewportMetrics::window(390.0, 844.0), 12);
        assert_eq!(size, ViewportSize::new(366, 549));
    }

    #[test]
    fn measure_landscape_screen() {
        // 1920x1080 desktop: height-bound.
        let size = measure(&ViewportMetrics::window(1920.0, 1080.0), 12);
        assert_eq!(size.width, (1080 - 24) * 2 / 3);
        assert_eq!(size.height, size.width * 3 / 2);
        assert!(size.height <= 1080 - 24);
    }

    #[test]
    fn measure_prefers_visual_viewport() {
        // Toolbar up: the visual viewport is 500.9 tall, floored to 500.
        let metrics = ViewportMetrics::window(390.0, 844.0).with_visual(390.0, 500.9);
        let size = measure(&metrics, 12);
        assert_eq!(size, ViewportSize::new(317, 475));
    }

    #[test]
    fn measure_keeps_ratio_within_bounds() {
        for (w, h) in [(320.0, 480.0), (1024.0, 768.0), (555.5, 999.9), (30.0, 20.0), (2560.0, 1440.0)] {
            let size = measure(&ViewportMetrics::window(w, h), 12);
            assert_eq!(size.height, size.width * 3 / 2, "{w}x{h}");
            assert!(size.width as f64 <= (w.floor() - 24.0).max(0.0), "{w}x{h}");
            assert!(size.height as f64 <= (h.floor() - 24.0).max(0.0), "{w}x{h}");
        }
    }

    #[test]
    fn measure_saturates_tiny_viewports() {
        let size = measure(&ViewportMetrics::window(10.0, 10.0), 12);
        assert_eq!(size, ViewportSize::new(0, 0));
    }

    #[test]
    fn rebuild_threshold() {
        let last = ViewportSize::new(400, 600);
        assert!(!should_rebuild(ViewportSize::new(405, 600), last, 6));
        assert!(!should_rebuild(ViewportSize::new(395, 595), last, 6));
        assert!(should_rebuild(ViewportSize::new(406, 600), last, 6));
        assert!(should_rebuild(ViewportSize::new(400, 594), last, 6));
    }

    #[test]
    fn rapid_resizes_coalesce_into_one_rebuild() {
        let mut m = monitor();
        m.accept(ViewportMetrics::window(390.0, 844.0));

        m.notify(ResizeKind::Window, ViewportMetrics::window(800.0, 900.0));
        assert_eq!(m.tick(100.0, true), None);
        m.notify(ResizeKind::Window, ViewportMetrics::window(1000.0, 1000.0));
        assert_eq!(m.tick(100.0, true), None);
        // Debounce settles, rebuild deferred to the next frame.
        assert_eq!(m.tick(50.0, true), None);
        assert!(m.rebuild_in_flight());

        let expected = measure(&ViewportMetrics::window(1000.0, 1000.0), 12);
        assert_eq!(m.tick(16.0, true), Some(expected));
        assert_eq!(m.accepted(), expected);
        assert_eq!(m.tick(1000.0, true), None);
    }

    #[test]
    fn visual_viewport_uses_shorter_window() {
        let mut m = monitor();
        m.accept(ViewportMetrics::window(390.0, 844.0));
        m.notify(
            ResizeKind::VisualViewport,
            ViewportMetrics::window(390.0, 844.0).with_visual(390.0, 400.0),
        );
        assert_eq!(m.tick(80.0, true), None);
        assert!(m.rebuild_in_flight());
    }

    #[test]
    fn settling_on_the_apply_frame_compares_against_applied_size() {
        let mut m = monitor();
        m.accept(ViewportMetrics::window(390.0, 844.0));
        let big = ViewportMetrics::window(1000.0, 1000.0);
        m.notify(ResizeKind::Window, big);
        assert_eq!(m.tick(150.0, true), None);

        // Same layout settles again on the frame that applies the rebuild.
        m.notify(ResizeKind::VisualViewport, big);
        assert_eq!(m.tick(80.0, true), Some(measure(&big, 12)));
        assert!(!m.rebuild_in_flight());

        // A different layout settling on an apply frame queues a fresh rebuild.
        m.notify(ResizeKind::Window, ViewportMetrics::window(390.0, 844.0));
        assert_eq!(m.tick(150.0, true), None);
        let toolbar = ViewportMetrics::window(390.0, 844.0).with_visual(390.0, 400.0);
        m.notify(ResizeKind::VisualViewport, toolbar);
        assert_eq!(
            m.tick(80.0, true),
            Some(measure(&ViewportMetrics::window(390.0, 844.0), 12))
        );
        assert!(m.rebuild_in_flight());
        assert_eq!(m.tick(16.0, true), Some(measure(&toolbar, 12)));
    }

    #[test]
    fn jitter_below_threshold_is_ignored() {
        let mut m = monitor();
        m.accept(ViewportMetrics::window(390.0, 844.0));
        m.notify(ResizeKind::Window, ViewportMetrics::window(393.0, 844.0));
        m.tick(150.0, true);
        assert!(!m.rebuild_in_flight());
        assert_eq!(m.tick(16.0, true), None);
    }

    #[test]
    fn not_ready_drops_settled_layout() {
        let mut m = monitor();
        m.notify(ResizeKind::Window, ViewportMetrics::window(1000.0, 1000.0));
        m.tick(150.0, false);
        assert!(!m.rebuild_in_flight());
    }
}
