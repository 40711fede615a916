//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::config::{ControlsSettings, TimeField, UiSettings};
use crate::controller::PlaybackController;

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("h/l", "prev/next song"),
    ("H/L", ""),
    ("enter", "play selected song"),
    ("space/p", "play/pause"),
    ("gg/G", "top/bottom"),
    ("J/K", "move song down/up"),
    ("a", "add"),
    ("R", "rename"),
    ("dd", "delete"),
    ("m", "play mode"),
    ("q", "quit"),
];

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text, incorporating seek seconds.
fn controls_text(seek_seconds: u64) -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| {
            if *k == "H/L" {
                format!("[H/L] seek -/+{}s", seek_seconds)
            } else {
                format!("[{}] {}", k, v)
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
/// A zero `total` means the length is unknown.
fn now_playing_time_text(elapsed: Duration, total: Duration, ui: &UiSettings) -> Option<String> {
    let total = (!total.is_zero()).then_some(total);
    let parts: Vec<String> = ui
        .now_playing_time_fields
        .iter()
        .filter_map(|f| match f {
            TimeField::Elapsed => Some(format_mmss(elapsed)),
            TimeField::Total => total.map(format_mmss),
            TimeField::Remaining => total.map(|t| format!("-{}", format_mmss(t.saturating_sub(elapsed)))),
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

fn status_text(controller: &PlaybackController, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = vec![format!("PLAYBACK: {}", controller.play_mode().label())];

    match controller.now_playing() {
        Some(np) => {
            match now_playing_time_text(np.elapsed, np.duration, ui) {
                Some(time) => parts.push(format!("Song: {} [{}]", np.title, time)),
                None => parts.push(format!("Song: {}", np.title)),
            }
            parts.push(if controller.is_playing() { "Playing" } else { "Paused" }.to_string());
        }
        None => parts.push("Stopped".to_string()),
    }

    parts.push(format!("{} songs", controller.playlist().len()));
    parts.join(" • ")
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    controller: &PlaybackController,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let prompt_height = if app.prompt().is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(prompt_height),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box, with the last error on its own line.
    let mut status = status_text(controller, ui_settings);
    if let Some(err) = controller.last_error() {
        status.push_str(&format!("\nERROR: {err} (esc to dismiss)"));
    }
    let status_par = Paragraph::new(status)
        .block(Block::bordered().padding(LEFT_PAD).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main list, windowed around the selection.
    {
        let tracks = controller.playlist();
        let current = controller.current_index();
        let total = tracks.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel = app.selected.min(total.saturating_sub(1));
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let start = sel.saturating_sub(half).min(total - list_height);
            (start, start + list_height)
        };

        let visible_items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let item = ListItem::new(track.title.as_str());
                if current == Some(start + offset) {
                    item.bold()
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(sel - start));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    if let Some(prompt) = app.prompt() {
        let input = Paragraph::new(format!("{}_", app.input())).block(
            Block::default()
                .borders(Borders::ALL)
                .padding(LEFT_PAD)
                .title(format!(" {} (enter/esc) ", prompt.label())),
        );
        frame.render_widget(input, chunks[3]);
    }

    let footer = Paragraph::new(controls_text(controls_settings.seek_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}
