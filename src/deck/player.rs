use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use super::thread::spawn_deck_thread;
use super::types::{DeckCmd, DeckEvent, DeckHandle, DeckInfo};

/// Owning handle for the audio thread. Constructed once at startup and torn
/// down exactly once with [`Deck::quit`].
pub struct Deck {
    tx: Sender<DeckCmd>,
    info: DeckHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Deck {
    /// Spawn the audio thread and wait for it to bind the default output
    /// stream. A missing output device aborts construction.
    pub fn new(events: Sender<DeckEvent>) -> Result<Self, Box<dyn std::error::Error>> {
        let (tx, rx) = mpsc::channel::<DeckCmd>();
        let info: DeckHandle = Arc::new(Mutex::new(DeckInfo::default()));
        let (init_tx, init_rx) = mpsc::channel::<Result<(), String>>();

        let join = spawn_deck_thread(rx, info.clone(), events, init_tx);

        match init_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                tx,
                info,
                join: Mutex::new(Some(join)),
            }),
            Ok(Err(msg)) => Err(msg.into()),
            Err(_) => Err("deck thread exited before initializing".into()),
        }
    }

    /// Shared playback info, for the render pass.
    pub fn info_handle(&self) -> DeckHandle {
        self.info.clone()
    }

    pub fn send(&self, cmd: DeckCmd) -> Result<(), mpsc::SendError<DeckCmd>> {
        self.tx.send(cmd)
    }

    /// Stop playback and join the audio thread.
    pub fn quit(&self) {
        let _ = self.send(DeckCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
