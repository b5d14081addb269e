//! Deck-related small types and handles.
//!
//! This module defines the command/event vocabulary of the audio thread and
//! the shared playback info the UI reads.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Lifecycle of the single decoded resource the deck owns.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeckState {
    /// Nothing has been loaded yet.
    Empty,
    /// A load is in flight; the previous resource is gone.
    Loading,
    /// Decoded and playable; also the resting state after a track ends.
    Ready,
    /// Audio is running.
    Playing,
    /// Audio is suspended mid-track.
    Paused,
    /// The most recent load failed to decode.
    Failed,
}

impl Default for DeckState {
    fn default() -> Self {
        Self::Empty
    }
}

#[derive(Debug)]
pub enum DeckCmd {
    /// Decode `data`, superseding whatever the deck currently holds.
    Load { data: Arc<Vec<u8>>, generation: u64 },
    /// Start or resume playback of the loaded resource.
    Play,
    /// Suspend playback. Safe in any state.
    Pause,
    /// Shut the audio thread down.
    Quit,
}

/// Completion notification for one `Load`, tagged with its generation so
/// the controller can discard stale ones.
#[derive(Debug, Clone)]
pub enum DeckEvent {
    Ready { generation: u64, duration: Duration },
    Error { generation: u64, message: String },
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone, Default)]
pub struct DeckInfo {
    pub state: DeckState,
    /// Generation of the load this info describes.
    pub generation: u64,
    /// Total duration; meaningful once the generation's load is ready.
    pub duration: Option<Duration>,
    /// Elapsed playback time for the loaded resource.
    pub elapsed: Duration,
}

pub type DeckHandle = Arc<Mutex<DeckInfo>>;
