use crate::core::timer::SingleSlot;

/// Optional hands-free mode. Advances when narration ends, or after a short
/// wait on pages that have none.
#[derive(Debug, Clone)]
pub struct AutoplayCoordinator {
    enabled: bool,
    fallback_ms: f64,
    fallback: SingleSlot<()>,
    /// An advance was requested and its flip has not landed yet.
    advancing: bool,
}

impl AutoplayCoordinator {
    pub fn new(enabled: bool, fallback_ms: f64) -> Self {
        Self {
            enabled,
            fallback_ms,
            fallback: SingleSlot::new(),
            advancing: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns true when the mode actually changed. Disabling always clears
    /// the fallback.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if !enabled {
            self.fallback.cancel();
        }
        if self.enabled == enabled {
            return false;
        }
        self.enabled = enabled;
        self.advancing = false;
        log::info!("autoplay {}", if enabled { "on" } else { "off" });
        true
    }

    /// Start the wait on a page without narration. Ignored while disabled.
    pub fn arm_fallback(&mut self) {
        if self.enabled {
            self.fallback.arm(self.fallback_ms, ());
        }
    }

    pub fn cancel_fallback(&mut self) {
        self.fallback.cancel();
    }

    pub fn fallback_armed(&self) -> bool {
        self.fallback.is_armed()
    }

    pub fn advancing(&self) -> bool {
        self.advancing
    }

    /// A flip landed: the requested advance, if any, is complete.
    pub fn on_flip(&mut self) {
        self.fallback.cancel();
        self.advancing = false;
    }

    /// Drop the fallback and any outstanding advance.
    pub fn reset(&mut self) {
        self.fallback.cancel();
        self.advancing = false;
    }

    /// Narration finished. Returns true when the book should advance.
    /// A racing fallback wins; the ended clip is then the silent placeholder.
    pub fn on_voice_ended(&mut self, on_last_page: bool) -> bool {
        if !self.enabled || on_last_page || self.advancing || self.fallback.is_armed() {
            return false;
        }
        self.advancing = true;
        true
    }

    /// Advance the fallback wait. Returns true when the book should advance.
    pub fn tick(&mut self, dt_ms: f64, on_last_page: bool) -> bool {
        if self.fallback.tick(dt_ms).is_none() {
            return false;
        }
        log::debug!("autoplay fallback fired");
        if !self.enabled || on_last_page || self.advancing {
            return false;
        }
        self.advancing = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_requires_enabled() {
        let mut auto = AutoplayCoordinator::new(false, 900.0);
        auto.arm_fallback();
        assert!(!auto.fallback_armed());

        auto.set_enabled(true);
        auto.arm_fallback();
        assert!(!auto.tick(899.0, false));
        assert!(auto.tick(1.0, false));
    }

    #[test]
    fn disabling_cancels_fallback() {
        let mut auto = AutoplayCoordinator::new(true, 900.0);
        auto.arm_fallback();
        auto.tick(500.0, false);
        assert!(auto.set_enabled(false));
        assert!(!auto.fallback_armed());
        assert!(!auto.tick(10_000.0, false));
    }

    #[test]
    fn never_advances_from_last_page() {
        let mut auto = AutoplayCoordinator::new(true, 900.0);
        assert!(!auto.on_voice_ended(true));
        auto.arm_fallback();
        assert!(!auto.tick(900.0, true));
    }

    #[test]
    fn voice_end_yields_to_racing_fallback() {
        let mut auto = AutoplayCoordinator::new(true, 900.0);
        auto.arm_fallback();
        assert!(!auto.on_voice_ended(false));
        assert!(auto.fallback_armed());

        auto.cancel_fallback();
        assert!(auto.on_voice_ended(false));
    }

    #[test]
    fn one_advance_until_the_flip_lands() {
        let mut auto = AutoplayCoordinator::new(true, 900.0);
        auto.arm_fallback();
        assert!(auto.tick(900.0, false));
        assert!(auto.advancing());

        // The placeholder clip ends before the page has turned.
        assert!(!auto.on_voice_ended(false));
        auto.arm_fallback();
        assert!(!auto.tick(900.0, false));

        auto.on_flip();
        assert!(!auto.advancing());
        assert!(auto.on_voice_ended(false));
        assert!(!auto.on_voice_ended(false));
    }

    #[test]
    fn reenabling_clears_stale_advance() {
        let mut auto = AutoplayCoordinator::new(true, 900.0);
        assert!(auto.on_voice_ended(false));
        auto.set_enabled(false);
        auto.set_enabled(true);
        assert!(!auto.advancing());
        assert!(auto.on_voice_ended(false));
    }

    #[test]
    fn set_same_value_is_noop() {
        let mut auto = AutoplayCoordinator::new(false, 900.0);
        assert!(!auto.set_enabled(false));
        assert!(auto.set_enabled(true));
        assert!(!auto.set_enabled(true));
    }
}
