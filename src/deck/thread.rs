use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use super::sink::{create_sink, probe_duration};
use super::types::{DeckCmd, DeckEvent, DeckHandle, DeckState};

fn publish(
    info: &DeckHandle,
    state: DeckState,
    generation: u64,
    duration: Option<Duration>,
    elapsed: Duration,
) {
    if let Ok(mut i) = info.lock() {
        i.state = state;
        i.generation = generation;
        i.duration = duration;
        i.elapsed = elapsed;
    }
}

pub(super) fn spawn_deck_thread(
    rx: Receiver<DeckCmd>,
    info: DeckHandle,
    events: Sender<DeckEvent>,
    init_tx: Sender<Result<(), String>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = init_tx.send(Err(format!("no audio output device: {e}")));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);
        let _ = init_tx.send(Ok(()));

        // At most one decoded resource; a new load supersedes the old one.
        let mut sink: Option<Sink> = None;
        let mut generation: u64 = 0;
        let mut duration: Option<Duration> = None;
        let mut paused = true;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    DeckCmd::Load {
                        data,
                        generation: requested,
                    } => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        generation = requested;
                        duration = None;
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        publish(&info, DeckState::Loading, generation, None, Duration::ZERO);

                        match create_sink(&stream, &data) {
                            Ok((new_sink, decoded)) => {
                                // Some containers only reveal their length to
                                // a metadata probe, not the decoder.
                                let total = decoded.or_else(|| probe_duration(&data));
                                sink = Some(new_sink);
                                duration = total;
                                publish(&info, DeckState::Ready, generation, total, Duration::ZERO);
                                let _ = events.send(DeckEvent::Ready {
                                    generation,
                                    duration: total.unwrap_or_default(),
                                });
                            }
                            Err(message) => {
                                publish(&info, DeckState::Failed, generation, None, Duration::ZERO);
                                let _ = events.send(DeckEvent::Error {
                                    generation,
                                    message,
                                });
                            }
                        }
                    }

                    DeckCmd::Play => {
                        // No resource, or the loaded one already ran out:
                        // nothing to start.
                        if let Some(s) = sink.as_ref() {
                            if paused && !s.empty() {
                                s.play();
                                paused = false;
                                started_at = Some(Instant::now());
                                publish(&info, DeckState::Playing, generation, duration, accumulated);
                            }
                        }
                    }

                    DeckCmd::Pause => {
                        if let Some(s) = sink.as_ref() {
                            if !paused {
                                s.pause();
                                if let Some(st) = started_at.take() {
                                    accumulated += st.elapsed();
                                }
                                paused = true;
                                publish(&info, DeckState::Paused, generation, duration, accumulated);
                            }
                        }
                    }

                    DeckCmd::Quit => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        if let Ok(mut i) = info.lock() {
                            i.state = DeckState::Empty;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic elapsed refresh + end-of-track detection.
                    if !paused {
                        if let Some(s) = sink.as_ref() {
                            if s.empty() {
                                let ran = accumulated
                                    + started_at.take().map_or(Duration::ZERO, |st| st.elapsed());
                                paused = true;
                                accumulated = duration.unwrap_or(ran);
                                publish(&info, DeckState::Ready, generation, duration, accumulated);
                            } else {
                                let elapsed = accumulated
                                    + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                                if let Ok(mut i) = info.lock() {
                                    i.elapsed = elapsed;
                                }
                            }
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
