/// Host-facing constants.
/// Must stay in sync with the host page script.
///
/// Book events are read as a flat f32 buffer, four floats per event:
/// ```text
/// [kind, a, b, c] [kind, a, b, c] ...
/// ```

/// Current page changed. `a` = page index, `b` = page count.
pub const EVENT_PAGE_CHANGED: f32 = 1.0;
/// Autoplay toggled. `a` = 1.0 when enabled, 0.0 when disabled.
pub const EVENT_AUTOPLAY_CHANGED: f32 = 2.0;
/// All audio channels have been through their unlock attempt.
pub const EVENT_AUDIO_UNLOCKED: f32 = 3.0;
/// The flip engine was rebuilt. `a` = width, `b` = height in CSS pixels.
pub const EVENT_REBUILT: f32 = 4.0;
/// A narration clip started. `a` = page index.
pub const EVENT_NARRATION_STARTED: f32 = 5.0;

/// `KeyboardEvent.keyCode` values the presenter reacts to.
pub const KEY_ARROW_LEFT: u32 = 37;
pub const KEY_ARROW_RIGHT: u32 = 39;

/// Upper bound on buffered events between host reads. Older events are
/// dropped first when the host stops reading.
pub const MAX_BOOK_EVENTS: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kinds_are_distinct() {
        let kinds = [
            EVENT_PAGE_CHANGED,
            EVENT_AUTOPLAY_CHANGED,
            EVENT_AUDIO_UNLOCKED,
            EVENT_REBUILT,
            EVENT_NARRATION_STARTED,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
