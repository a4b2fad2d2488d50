use bytemuck::{Pod, Zeroable};

/// Zero-based index of a page in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PageIndex(pub u32);

impl PageIndex {
    pub const COVER: PageIndex = PageIndex(0);

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Target viewport box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The three independent playback channels. Each maps to its own element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Voice,
    Background,
    FlipEffect,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Voice, Channel::Background, Channel::FlipEffect];

    /// Background loops; the others are one-shot.
    pub fn looping(self) -> bool {
        matches!(self, Channel::Background)
    }
}

/// Side effect requested by the engine, executed by the host bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Silent play/pause/rewind on every channel; report `Event::UnlockSettled`
    /// once all three attempts have settled.
    UnlockChannels,
    /// Pause, rewind and play the flip sound effect.
    PlayEffect,
    /// Start the looping soundtrack.
    StartBackground,
    /// Pause and rewind the voice channel.
    StopVoice,
    /// Load the page's clip into the voice channel and play it.
    PlayVoice { page: PageIndex },
    /// Destroy any engine instance and create a new one at `size`,
    /// positioned at `start` without animating.
    Build { size: ViewportSize, start: PageIndex },
    FlipNext,
    FlipPrev,
    /// Animated flip to an arbitrary page.
    FlipTo { page: PageIndex },
    /// Destroy the engine instance.
    Teardown,
}

/// A state notification for the host UI, read through a flat buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BookEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl BookEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32) -> Self {
        Self { kind, a, b, c: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<BookEvent>(), BookEvent::FLOATS * 4);
        let events = [BookEvent::new(1.0, 2.0, 3.0)];
        let floats: &[f32] = bytemuck::cast_slice(&events);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn only_background_loops() {
        let looping: Vec<_> = Channel::ALL.iter().filter(|c| c.looping()).collect();
        assert_eq!(looping, vec![&Channel::Background]);
    }
}
