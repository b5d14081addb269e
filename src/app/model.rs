//! Session model types: `App`, pane focus and the pending-load slot.
//!
//! The `App` struct is the session controller's state. It turns user intents
//! (open a file, replay a ledger entry, pause) into deck loads, and resolves
//! the deck's completion notifications against the latest issued load.

use std::sync::Arc;
use std::time::Duration;

use crate::browser::FileEntry;
use crate::deck::DeckHandle;
use crate::ledger::{FileMetadata, RecentLedger, format_duration, format_size};
use crate::resource::{ResourceRef, ResourceTable};

/// Which pane has keyboard focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pane {
    Browser,
    Recent,
}

/// What the controller owes the deck once the outstanding load is ready.
#[derive(Clone, Debug)]
pub enum PendingAction {
    /// A freshly opened file: catalog it into the ledger.
    Catalog {
        name: String,
        size_bytes: u64,
        resource: ResourceRef,
    },
    /// A replay of an already-cataloged file: start playback.
    Replay { entry: FileMetadata },
}

/// The single in-flight load. A newer load overwrites this slot, so a
/// completion is acted on only when its generation is still the latest.
#[derive(Clone, Debug)]
pub struct PendingLoad {
    pub generation: u64,
    pub action: PendingAction,
}

/// What the event loop should do after a ready notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReadyOutcome {
    /// Open path: the file was cataloged; nothing further to send.
    Recorded,
    /// Replay path: send the deck a play command.
    Play,
    /// The notification does not match the latest load; ignore it.
    Stale,
}

/// The main application model.
pub struct App {
    pub entries: Vec<FileEntry>,
    pub selected: usize,
    pub recent_selected: usize,
    pub focus: Pane,

    pub recent: RecentLedger,
    pub resources: ResourceTable,
    /// The file bound to the waveform lane; only updated on a matching
    /// ready notification, never on errors.
    pub current: Option<FileMetadata>,
    pub pending: Option<PendingLoad>,

    pub deck_handle: Option<DeckHandle>,
    /// Last one-line diagnostic (load results, play/pause, errors).
    pub status_line: Option<String>,
    pub current_dir: Option<String>,

    generation: u64,
}

impl App {
    /// Create a new `App` over the scanned file `entries`.
    pub fn new(entries: Vec<FileEntry>) -> Self {
        Self {
            entries,
            selected: 0,
            recent_selected: 0,
            focus: Pane::Browser,
            recent: RecentLedger::new(),
            resources: ResourceTable::new(),
            current: None,
            pending: None,
            deck_handle: None,
            status_line: None,
            current_dir: None,
            generation: 0,
        }
    }

    /// Attach the shared `DeckHandle` used to observe playback progress.
    pub fn set_deck_handle(&mut self, h: DeckHandle) {
        self.deck_handle = Some(h);
    }

    /// Record the browsed directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn set_status(&mut self, line: impl Into<String>) {
        self.status_line = Some(line.into());
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected)
    }

    pub fn selected_recent(&self) -> Option<&FileMetadata> {
        self.recent.get(self.recent_selected)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Browser => Pane::Recent,
            Pane::Recent => Pane::Browser,
        };
    }

    /// Move selection down in the focused pane, wrapping around.
    pub fn next(&mut self) {
        match self.focus {
            Pane::Browser => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1) % self.entries.len();
                }
            }
            Pane::Recent => {
                if !self.recent.is_empty() {
                    self.recent_selected = (self.recent_selected + 1) % self.recent.len();
                }
            }
        }
    }

    /// Move selection up in the focused pane, wrapping around.
    pub fn prev(&mut self) {
        match self.focus {
            Pane::Browser => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + self.entries.len() - 1) % self.entries.len();
                }
            }
            Pane::Recent => {
                if !self.recent.is_empty() {
                    self.recent_selected =
                        (self.recent_selected + self.recent.len() - 1) % self.recent.len();
                }
            }
        }
    }

    pub fn select_first(&mut self) {
        match self.focus {
            Pane::Browser => self.selected = 0,
            Pane::Recent => self.recent_selected = 0,
        }
    }

    pub fn select_last(&mut self) {
        match self.focus {
            Pane::Browser => self.selected = self.entries.len().saturating_sub(1),
            Pane::Recent => self.recent_selected = self.recent.len().saturating_sub(1),
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Begin cataloging a freshly read file: register its bytes and claim
    /// the pending slot. Returns the generation and the buffer to hand the
    /// deck.
    pub fn begin_open(&mut self, name: &str, bytes: Vec<u8>) -> (u64, Arc<Vec<u8>>) {
        self.abandon_pending();

        let size_bytes = bytes.len() as u64;
        let data = Arc::new(bytes);
        let resource = self.resources.register(data.clone());
        let generation = self.next_generation();
        self.pending = Some(PendingLoad {
            generation,
            action: PendingAction::Catalog {
                name: name.to_string(),
                size_bytes,
                resource,
            },
        });
        (generation, data)
    }

    /// Begin replaying `entry`. Returns `None` (with a diagnostic) when its
    /// resource has been revoked.
    pub fn begin_replay(&mut self, entry: FileMetadata) -> Option<(u64, Arc<Vec<u8>>)> {
        let Some(data) = self.resources.get(entry.resource) else {
            self.set_status(format!("{}: resource no longer available", entry.name));
            return None;
        };

        self.abandon_pending();

        let generation = self.next_generation();
        self.pending = Some(PendingLoad {
            generation,
            action: PendingAction::Replay { entry },
        });
        Some((generation, data))
    }

    // A superseded catalog load never reaches the ledger; drop its bytes so
    // history stays the only thing keeping resources alive.
    fn abandon_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            if let PendingAction::Catalog { resource, .. } = p.action {
                self.resources.revoke(resource);
            }
        }
    }

    /// Resolve a ready notification against the latest issued load.
    pub fn complete_ready(&mut self, generation: u64, duration: Duration) -> ReadyOutcome {
        let Some(p) = self.pending.take_if(|p| p.generation == generation) else {
            return ReadyOutcome::Stale;
        };

        match p.action {
            PendingAction::Catalog {
                name,
                size_bytes,
                resource,
            } => {
                let meta = FileMetadata {
                    name,
                    size_label: format_size(size_bytes),
                    duration_label: format_duration(duration),
                    resource,
                };
                self.set_status(format!(
                    "Loaded {} [{} / {}]",
                    meta.name, meta.duration_label, meta.size_label
                ));
                self.current = Some(meta.clone());
                if let Some(evicted) = self.recent.record(meta) {
                    self.resources.revoke(evicted.resource);
                }
                self.clamp_recent_selection();
                ReadyOutcome::Recorded
            }
            PendingAction::Replay { entry } => {
                self.set_status(format!("Playing {}", entry.name));
                self.current = Some(entry);
                ReadyOutcome::Play
            }
        }
    }

    /// Resolve an error notification. Ledger and current file stay as they
    /// were; a failed catalog load releases its resource.
    pub fn complete_error(&mut self, generation: u64, message: &str) {
        let Some(p) = self.pending.take_if(|p| p.generation == generation) else {
            return;
        };

        if let PendingAction::Catalog { resource, .. } = p.action {
            self.resources.revoke(resource);
        }
        self.set_status(format!("Error loading audio: {message}"));
    }

    fn clamp_recent_selection(&mut self) {
        if self.recent_selected >= self.recent.len() {
            self.recent_selected = self.recent.len().saturating_sub(1);
        }
    }
}
