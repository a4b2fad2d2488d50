// controller/mod.rs
//
// Flip lifecycle, autoplay, and the presenter that wires them to the audio
// components. Every handler is (state, event) -> commands.

pub mod autoplay;
pub mod flip;
pub mod presenter;
