/// Single-slot scheduled task.
///
/// Holds at most one pending payload. Arming a new task replaces whatever was
/// pending, so superseded work can never fire. Time only moves when the owner
/// calls [`SingleSlot::tick`] with the elapsed frame time.
#[derive(Debug, Clone)]
pub struct SingleSlot<T> {
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    remaining_ms: f64,
    payload: T,
}

impl<T> SingleSlot<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `payload` to fire after `delay_ms`.
    /// Returns the payload that was superseded, if any.
    pub fn arm(&mut self, delay_ms: f64, payload: T) -> Option<T> {
        let previous = self.pending.take().map(|p| p.payload);
        self.pending = Some(Pending {
            remaining_ms: delay_ms.max(0.0),
            payload,
        });
        previous
    }

    /// Drop the pending task without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    /// Advance by `dt_ms`. Returns the payload when its delay has elapsed.
    pub fn tick(&mut self, dt_ms: f64) -> Option<T> {
        let pending = self.pending.as_mut()?;
        pending.remaining_ms -= dt_ms;
        if pending.remaining_ms <= 0.0 {
            self.pending.take().map(|p| p.payload)
        } else {
            None
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending task fires.
    pub fn remaining_ms(&self) -> Option<f64> {
        self.pending.as_ref().map(|p| p.remaining_ms)
    }

    pub fn payload(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.payload)
    }
}

impl<T> Default for SingleSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let mut slot = SingleSlot::new();
        slot.arm(100.0, 7u32);
        assert_eq!(slot.tick(60.0), None);
        assert_eq!(slot.tick(40.0), Some(7));
        assert!(!slot.is_armed());
        assert_eq!(slot.tick(1000.0), None);
    }

    #[test]
    fn arming_supersedes_previous() {
        let mut slot = SingleSlot::new();
        slot.arm(100.0, "a");
        assert_eq!(slot.tick(90.0), None);
        assert_eq!(slot.arm(100.0, "b"), Some("a"));
        // The old deadline would have passed here.
        assert_eq!(slot.tick(20.0), None);
        assert_eq!(slot.remaining_ms(), Some(80.0));
        assert_eq!(slot.tick(80.0), Some("b"));
    }

    #[test]
    fn cancel_prevents_fire() {
        let mut slot = SingleSlot::new();
        slot.arm(50.0, ());
        assert_eq!(slot.cancel(), Some(()));
        assert_eq!(slot.tick(100.0), None);
        assert_eq!(slot.cancel(), None);
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let mut slot = SingleSlot::new();
        slot.arm(0.0, 1u8);
        assert_eq!(slot.payload(), Some(&1));
        assert_eq!(slot.tick(0.0), Some(1));
    }
}
