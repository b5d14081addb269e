use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Pane, ReadyOutcome};
use crate::config;
use crate::deck::{Deck, DeckCmd, DeckEvent, DeckState};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known deck state as emitted to MPRIS.
    pub last_mpris_state: DeckState,
    /// Last-known current file name as emitted to MPRIS.
    pub last_mpris_title: Option<String>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            pending_gg: false,
            last_mpris_state: DeckState::Empty,
            last_mpris_title: None,
        }
    }
}

fn deck_state(app: &App) -> DeckState {
    app.deck_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|i| i.state))
        .unwrap_or_default()
}

/// Main terminal event loop: handles input, UI drawing, deck completions and
/// MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    deck: &Deck,
    mpris: &MprisHandle,
    deck_events: &mpsc::Receiver<DeckEvent>,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Resolve deck completions. Only the latest load's notification is
        // acted on; stale generations fall out inside the app model.
        while let Ok(ev) = deck_events.try_recv() {
            match ev {
                DeckEvent::Ready {
                    generation,
                    duration,
                } => {
                    if app.complete_ready(generation, duration) == ReadyOutcome::Play {
                        let _ = deck.send(DeckCmd::Play);
                    }
                }
                DeckEvent::Error {
                    generation,
                    message,
                } => {
                    app.complete_error(generation, &message);
                }
            }
        }

        // Keep MPRIS in sync even when changes come from media keys or the
        // track running out.
        let current_state = deck_state(app);
        let current_title = app.current.as_ref().map(|m| m.name.clone());
        if current_state != state.last_mpris_state || current_title != state.last_mpris_title {
            update_mpris(mpris, app);
            state.last_mpris_state = current_state;
            state.last_mpris_title = current_title;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.deck, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, deck, mpris)? {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, deck, control_tx, state)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_control_cmd(
    cmd: ControlCmd,
    app: &mut App,
    deck: &Deck,
    mpris: &MprisHandle,
) -> Result<bool, Box<dyn std::error::Error>> {
    match cmd {
        ControlCmd::Quit => return Ok(true),
        ControlCmd::Play => {
            // Resume. Tolerated as a no-op when nothing is loaded.
            if app.current.is_some() {
                let _ = deck.send(DeckCmd::Play);
                app.set_status("Playing audio...");
            } else {
                app.set_status("Nothing loaded yet");
            }
        }
        ControlCmd::Pause | ControlCmd::Stop => {
            let _ = deck.send(DeckCmd::Pause);
            app.set_status("Audio paused");
        }
        ControlCmd::PlayPause => match deck_state(app) {
            DeckState::Playing => {
                let _ = deck.send(DeckCmd::Pause);
                app.set_status("Audio paused");
            }
            DeckState::Ready | DeckState::Paused => {
                let _ = deck.send(DeckCmd::Play);
                app.set_status("Playing audio...");
            }
            DeckState::Empty | DeckState::Loading | DeckState::Failed => {
                app.set_status("Nothing loaded yet");
            }
        },
    }

    update_mpris(mpris, app);
    Ok(false)
}

fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    deck: &Deck,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return Ok(true);
        }
        KeyCode::Tab => {
            state.pending_gg = false;
            app.toggle_focus();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            match app.focus {
                Pane::Browser => {
                    if app.has_entries() {
                        open_selected(app, deck);
                    }
                }
                Pane::Recent => replay_selected(app, deck),
            }
        }
        KeyCode::Char('p') => {
            state.pending_gg = false;
            // Play the current file from the top (a replay is a fresh load).
            match app.current.clone() {
                Some(current) => {
                    let name = current.name.clone();
                    if let Some((generation, data)) = app.begin_replay(current) {
                        app.set_status(format!("Loading {}", name));
                        let _ = deck.send(DeckCmd::Load { data, generation });
                    }
                }
                None => app.set_status("Nothing loaded yet"),
            }
        }
        KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Pause);
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}

/// Open the browser selection: read its bytes, register them and start the
/// load. An unreadable file is a status-line diagnostic, not a crash.
fn open_selected(app: &mut App, deck: &Deck) {
    let Some(entry) = app.selected_entry().cloned() else {
        return;
    };

    match std::fs::read(&entry.path) {
        Ok(bytes) => {
            let (generation, data) = app.begin_open(&entry.name, bytes);
            app.set_status(format!("Loading {}", entry.name));
            let _ = deck.send(DeckCmd::Load { data, generation });
        }
        Err(e) => app.set_status(format!("{}: {}", entry.name, e)),
    }
}

/// Replay the recent-pane selection. Playback starts when the matching
/// ready notification arrives.
fn replay_selected(app: &mut App, deck: &Deck) {
    let Some(entry) = app.selected_recent().cloned() else {
        return;
    };

    let name = entry.name.clone();
    if let Some((generation, data)) = app.begin_replay(entry) {
        app.set_status(format!("Loading {}", name));
        let _ = deck.send(DeckCmd::Load { data, generation });
    }
}
