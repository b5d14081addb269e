//! The deck: one long-lived playback handle around the audio subsystem.
//!
//! A dedicated thread owns the output stream and at most one decoded
//! resource at a time. Loads are fire-and-forget commands; each completion
//! comes back as a single generation-tagged event.

mod player;
mod sink;
mod thread;
mod types;

pub use player::Deck;
pub use types::*;

#[cfg(test)]
mod tests;
