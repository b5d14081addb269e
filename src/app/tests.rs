use std::time::Duration;

use super::*;
use crate::browser::FileEntry;

fn entry(name: &str) -> FileEntry {
    FileEntry {
        path: std::path::PathBuf::new(),
        name: name.into(),
        size_bytes: 0,
    }
}

fn open(app: &mut App, name: &str, size: usize) -> u64 {
    let (generation, _data) = app.begin_open(name, vec![0u8; size]);
    generation
}

#[test]
fn open_catalogs_on_matching_ready() {
    let mut app = App::new(vec![]);

    let g = open(&mut app, "song.mp3", 2048);
    assert!(app.recent.is_empty());
    assert!(app.current.is_none());

    let outcome = app.complete_ready(g, Duration::from_secs(70));
    assert_eq!(outcome, ReadyOutcome::Recorded);

    let m = app.recent.get(0).unwrap();
    assert_eq!(m.name, "song.mp3");
    assert_eq!(m.duration_label, "1:10");
    assert_eq!(m.size_label, "2 KB");
    assert_eq!(app.current.as_ref().unwrap().name, "song.mp3");
}

#[test]
fn ledger_is_newest_first_up_to_capacity() {
    let mut app = App::new(vec![]);

    for name in ["a.mp3", "b.mp3", "c.mp3"] {
        let g = open(&mut app, name, 100);
        app.complete_ready(g, Duration::from_secs(1));
    }

    let names: Vec<&str> = app.recent.list().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["c.mp3", "b.mp3", "a.mp3"]);
}

#[test]
fn fourth_open_evicts_oldest_and_revokes_its_resource() {
    let mut app = App::new(vec![]);

    let g = open(&mut app, "a.mp3", 100);
    app.complete_ready(g, Duration::from_secs(1));
    let first = app.recent.get(0).unwrap().resource;

    for name in ["b.mp3", "c.mp3", "d.mp3"] {
        let g = open(&mut app, name, 100);
        app.complete_ready(g, Duration::from_secs(1));
    }

    let names: Vec<&str> = app.recent.list().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["d.mp3", "c.mp3", "b.mp3"]);
    assert!(app.resources.get(first).is_none());
    // Only the three surviving entries still hold resources.
    assert_eq!(app.resources.len(), 3);
}

#[test]
fn replay_plays_exactly_once_per_ready() {
    let mut app = App::new(vec![]);

    let g = open(&mut app, "a.mp3", 100);
    app.complete_ready(g, Duration::from_secs(1));

    let meta = app.recent.get(0).unwrap().clone();
    let (rg, _data) = app.begin_replay(meta).expect("resource is live");

    assert_eq!(app.complete_ready(rg, Duration::from_secs(1)), ReadyOutcome::Play);
    // The slot is consumed; a repeated notification does nothing.
    assert_eq!(app.complete_ready(rg, Duration::from_secs(1)), ReadyOutcome::Stale);
    // Replays never grow the ledger.
    assert_eq!(app.recent.len(), 1);
}

#[test]
fn replay_of_revoked_resource_is_refused() {
    let mut app = App::new(vec![]);

    let g = open(&mut app, "a.mp3", 100);
    app.complete_ready(g, Duration::from_secs(1));

    let meta = app.recent.get(0).unwrap().clone();
    app.resources.revoke(meta.resource);

    assert!(app.begin_replay(meta).is_none());
    assert!(app.status_line.as_deref().unwrap().contains("no longer available"));
}

#[test]
fn error_leaves_ledger_and_current_file_unchanged() {
    let mut app = App::new(vec![]);

    let g = open(&mut app, "good.mp3", 100);
    app.complete_ready(g, Duration::from_secs(1));

    let g2 = open(&mut app, "bad.bin", 50);
    app.complete_error(g2, "decode failed: unrecognized format");

    assert_eq!(app.recent.len(), 1);
    assert_eq!(app.recent.get(0).unwrap().name, "good.mp3");
    assert_eq!(app.current.as_ref().unwrap().name, "good.mp3");
    assert!(app.status_line.as_deref().unwrap().contains("decode failed"));
    // The failed open's bytes are released: only the cataloged entry remains.
    assert_eq!(app.resources.len(), 1);
}

#[test]
fn stale_ready_from_superseded_load_is_discarded() {
    let mut app = App::new(vec![]);

    let g1 = open(&mut app, "first.mp3", 100);
    let g2 = open(&mut app, "second.mp3", 100);

    // The superseded open's buffer is already gone.
    assert_eq!(app.resources.len(), 1);

    assert_eq!(app.complete_ready(g1, Duration::from_secs(9)), ReadyOutcome::Stale);
    assert!(app.recent.is_empty());
    assert!(app.current.is_none());

    assert_eq!(app.complete_ready(g2, Duration::from_secs(3)), ReadyOutcome::Recorded);
    assert_eq!(app.recent.get(0).unwrap().name, "second.mp3");
}

#[test]
fn stale_error_does_not_clobber_a_newer_pending_load() {
    let mut app = App::new(vec![]);

    let g1 = open(&mut app, "first.mp3", 100);
    let g2 = open(&mut app, "second.mp3", 100);

    app.complete_error(g1, "late failure");
    assert!(app.pending.is_some());
    assert!(app.status_line.is_none());

    assert_eq!(app.complete_ready(g2, Duration::from_secs(3)), ReadyOutcome::Recorded);
}

#[test]
fn navigation_wraps_within_focused_pane() {
    let mut app = App::new(vec![entry("a.mp3"), entry("b.mp3"), entry("c.mp3")]);

    assert_eq!(app.focus, Pane::Browser);
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);

    for name in ["x.mp3", "y.mp3"] {
        let g = open(&mut app, name, 10);
        app.complete_ready(g, Duration::from_secs(1));
    }

    app.toggle_focus();
    assert_eq!(app.focus, Pane::Recent);
    app.next();
    assert_eq!(app.recent_selected, 1);
    app.next();
    assert_eq!(app.recent_selected, 0);
    app.select_last();
    assert_eq!(app.recent_selected, 1);
}

#[test]
fn selected_recent_follows_display_order() {
    let mut app = App::new(vec![]);

    for name in ["a.mp3", "b.mp3"] {
        let g = open(&mut app, name, 10);
        app.complete_ready(g, Duration::from_secs(1));
    }

    app.focus = Pane::Recent;
    assert_eq!(app.selected_recent().unwrap().name, "b.mp3");
    app.next();
    assert_eq!(app.selected_recent().unwrap().name, "a.mp3");
}
