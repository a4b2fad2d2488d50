use crate::api::types::{Command, PageIndex};
use crate::core::viewport::{ResizeKind, ViewportMetrics};

/// Events the presenter understands.
/// Everything the host observes is funnelled through one of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A pointer-down or touch-start anywhere on the page.
    Gesture,
    /// All three channel unlock attempts have settled, whatever the outcome.
    UnlockSettled,
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// The flip engine finished turning to `index`.
    Flip { index: u32 },
    /// The voice channel finished its clip naturally.
    VoiceEnded,
    SetAutoplay(bool),
    ToggleAutoplay,
    /// Animated jump to a page.
    GoTo(PageIndex),
    /// The layout changed; `metrics` are the fresh measurements.
    Resize { kind: ResizeKind, metrics: ViewportMetrics },
    /// The host failed to construct the engine for a `Build` command.
    BuildFailed,
}

/// Outbox of commands for the host bridge.
/// The presenter pushes during dispatch; the bridge drains and executes.
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Drain all pending commands. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Iterate over pending commands without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = CommandQueue::new();
        q.push(Command::PlayEffect);
        q.push(Command::PlayVoice { page: PageIndex(2) });
        assert_eq!(q.len(), 2);
        let commands = q.drain();
        assert_eq!(commands, vec![Command::PlayEffect, Command::PlayVoice { page: PageIndex(2) }]);
        assert!(q.is_empty());
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = CommandQueue::new();
        q.push(Command::StopVoice);
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }
}
