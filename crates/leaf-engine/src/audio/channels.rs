use crate::api::types::Command;
use crate::input::queue::CommandQueue;

/// Autoplay-policy unlock progress. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnlockState {
    #[default]
    Locked,
    /// Silent play/pause attempts issued, waiting for all of them to settle.
    Unlocking,
    Unlocked,
}

/// Owns the process-wide audio latches: gesture unlock and the background
/// soundtrack start. The channels themselves live in the host bridge.
#[derive(Debug, Clone, Default)]
pub struct AudioChannels {
    unlock: UnlockState,
    background_started: bool,
}

impl AudioChannels {
    pub fn new() -> Self {
        Self::default()
    }

    /// First qualifying gesture: give every channel one silent play/pause.
    /// Later calls are no-ops. Returns true when the attempt was issued.
    pub fn unlock(&mut self, out: &mut CommandQueue) -> bool {
        if self.unlock != UnlockState::Locked {
            return false;
        }
        self.unlock = UnlockState::Unlocking;
        out.push(Command::UnlockChannels);
        true
    }

    /// All unlock attempts settled. Success or failure does not matter.
    pub fn unlock_settled(&mut self) -> bool {
        if self.unlock == UnlockState::Unlocked {
            return false;
        }
        self.unlock = UnlockState::Unlocked;
        log::info!("audio channels unlocked");
        true
    }

    pub fn unlock_state(&self) -> UnlockState {
        self.unlock
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlock == UnlockState::Unlocked
    }

    /// Restart the flip effect from the top. Best effort.
    pub fn play_effect(&self, out: &mut CommandQueue) {
        out.push(Command::PlayEffect);
    }

    /// Start the soundtrack unless it was ever started before.
    /// The latch is set when the play is issued, not when it succeeds.
    pub fn start_background_once(&mut self, out: &mut CommandQueue) -> bool {
        if self.background_started {
            return false;
        }
        self.background_started = true;
        out.push(Command::StartBackground);
        log::info!("background music started");
        true
    }

    pub fn background_started(&self) -> bool {
        self.background_started
    }
}
