//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, str::FromStr, sync::LazyLock, time::Duration};

use crate::app::{App, Pane};
use crate::config::{DeckSettings, UiSettings};
use crate::deck::{DeckInfo, DeckState};
use crate::ledger::{RECENT_CAPACITY, format_duration, format_size};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("tab".to_string(), "switch pane".to_string());
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "open / replay".to_string());
    map.insert("p".to_string(), "play current".to_string());
    map.insert("space".to_string(), "pause".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["tab", "j/k", "gg/G", "enter", "p", "space", "q"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn state_text(state: DeckState) -> &'static str {
    match state {
        DeckState::Empty => "Idle",
        DeckState::Loading => "Loading...",
        DeckState::Ready => "Ready",
        DeckState::Playing => "Playing",
        DeckState::Paused => "Paused",
        DeckState::Failed => "Load failed",
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value.trim()).unwrap_or(fallback)
}

/// One row of the waveform lane: a bar pattern split into a played span and
/// a not-yet-played span at `ratio`.
fn waveform_line(width: u16, bar_width: u16, ratio: f64, wave: Color, progress: Color) -> Line<'static> {
    let width = width as usize;
    let period = bar_width.max(1) as usize + 1;

    let mut pattern = String::with_capacity(width);
    for col in 0..width {
        if col % period < period - 1 {
            pattern.push('█');
        } else {
            pattern.push(' ');
        }
    }

    let filled = ((width as f64) * ratio.clamp(0.0, 1.0)).round() as usize;
    let played: String = pattern.chars().take(filled).collect();
    let rest: String = pattern.chars().skip(filled).collect();

    Line::from(vec![
        Span::styled(played, Style::default().fg(progress)),
        Span::styled(rest, Style::default().fg(wave)),
    ])
}

fn playback_ratio(info: &DeckInfo) -> f64 {
    match info.duration {
        Some(total) if total > Duration::ZERO => {
            info.elapsed.as_secs_f64() / total.as_secs_f64()
        }
        _ => 0.0,
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, deck_settings: &DeckSettings, ui_settings: &UiSettings) {
    let info = app
        .deck_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|i| i.clone()))
        .unwrap_or_default();

    let lane_height = deck_settings.height.saturating_add(2);
    let lane_constraint = if deck_settings.responsive {
        Constraint::Min(lane_height)
    } else {
        Constraint::Length(lane_height)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            lane_constraint,
            Constraint::Min(5),
            Constraint::Length(RECENT_CAPACITY as u16 + 2),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" wavescope ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(state_text(info.state).to_string());

        if let Some(ref current) = app.current {
            parts.push(format!(
                "File: {} [{}] [{}]",
                current.name, current.duration_label, current.size_label
            ));
        }

        if let Some(total) = info.duration {
            parts.push(format!(
                "{} / {}",
                format_duration(info.elapsed),
                format_duration(total)
            ));
        }

        if let Some(ref line) = app.status_line {
            parts.push(line.clone());
        }

        if let Some(ref dir) = app.current_dir {
            parts.push(format!("Dir: {}", dir));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Waveform lane
    {
        let block = Block::default().borders(Borders::ALL).title(" waveform ");
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);

        if app.current.is_some() || info.state != DeckState::Empty {
            let wave = parse_color(&deck_settings.wave_color, Color::Blue);
            let progress = parse_color(&deck_settings.progress_color, Color::Cyan);
            let ratio = playback_ratio(&info);

            let lines: Vec<Line> = (0..inner.height)
                .map(|_| waveform_line(inner.width, deck_settings.bar_width, ratio, wave, progress))
                .collect();
            frame.render_widget(Paragraph::new(lines), inner);
        } else {
            let empty = Paragraph::new("No file loaded").alignment(Alignment::Center);
            frame.render_widget(empty, inner);
        }
    }

    // File browser
    {
        // Center the selected item when possible by creating a visible window.
        // Important: only build ListItems for the visible window (avoid
        // allocating the entire list).
        let total = app.entries.len();
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = app.entries[start..end]
            .iter()
            .map(|e| ListItem::new(format!("{} [{}]", e.name, format_size(e.size_bytes))))
            .collect();

        let focused = app.focus == Pane::Browser;
        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" files "))
            .highlight_style(if focused {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            })
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Recent files
    {
        let focused = app.focus == Pane::Recent;
        let block = Block::default().borders(Borders::ALL).title(" recent ");

        if app.recent.is_empty() {
            let inner = block.inner(chunks[4]);
            frame.render_widget(block, chunks[4]);
            frame.render_widget(Paragraph::new("No recent files"), inner);
        } else {
            let items: Vec<ListItem> = app
                .recent
                .list()
                .map(|m| {
                    ListItem::new(format!(
                        "{} [{}] [{}]",
                        m.name, m.duration_label, m.size_label
                    ))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                })
                .highlight_symbol("> ");
            let mut state = ratatui::widgets::ListState::default();
            state.select(Some(app.recent_selected.min(app.recent.len() - 1)));
            frame.render_stateful_widget(list, chunks[4], &mut state);
        }
    }

    // Footer
    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[5]);
}
