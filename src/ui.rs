//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::audio::{Playback, format_time};
use crate::config::{ControlsSettings, Theme, UiSettings};
use crate::storage::KeyValueStore;

const ACCENT: Color = Color::Rgb(108, 92, 231);

/// Colors for one theme.
struct Palette {
    fg: Color,
    bg: Color,
    muted: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            fg: Color::Rgb(45, 52, 54),
            bg: Color::Rgb(245, 246, 250),
            muted: Color::Rgb(99, 110, 114),
        },
        Theme::Dark => Palette {
            fg: Color::Rgb(223, 230, 233),
            bg: Color::Rgb(30, 39, 46),
            muted: Color::Rgb(178, 190, 195),
        },
    }
}

/// Render the controls help text, incorporating the seek and volume steps.
fn controls_text(controls: &ControlsSettings) -> String {
    let seek = format!("seek -/+{}s", controls.seek_seconds);
    let volume = format!("volume -/+{}", controls.volume_step);
    let entries: [(&str, &str); 15] = [
        ("j/k", "up/down"),
        ("gg/G", "top/bottom"),
        ("enter", "play selected"),
        ("space", "play/pause"),
        ("←/→", "prev/next"),
        ("H/L", &seek),
        ("0-9", "jump to 0-90%"),
        ("-/+", &volume),
        ("s/r", "shuffle/repeat"),
        ("/", "search"),
        ("f", "genre"),
        ("d", "remove"),
        ("w/o", "save/saved"),
        ("t", "theme"),
        ("q", "quit"),
    ];
    entries
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn bordered(title: &str, colors: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {title} "))
        .style(Style::default().fg(colors.fg).bg(colors.bg))
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<P: Playback, S: KeyValueStore>(
    frame: &mut Frame,
    app: &App<P, S>,
    display: &[usize],
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let colors = palette(app.theme);
    frame.render_widget(
        Block::default().style(Style::default().fg(colors.fg).bg(colors.bg)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(" tempo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let player = &app.player;
    let playlist = player.playlist();
    let now_playing = match playlist.current_track() {
        Some(track) => {
            let state = if player.is_playing() { "Playing" } else { "Paused" };
            format!(
                "{}\n{} • {}\n{state} • Shuffle: {} • Repeat: {} • Volume: {}%",
                track.title,
                track.artist,
                track.genre,
                on_off(playlist.is_shuffling()),
                on_off(playlist.is_repeating()),
                player.volume().percent(),
            )
        }
        None => format!(
            "No track selected\n\nShuffle: {} • Repeat: {} • Volume: {}%",
            on_off(playlist.is_shuffling()),
            on_off(playlist.is_repeating()),
            player.volume().percent(),
        ),
    };
    let now_playing = Paragraph::new(now_playing)
        .block(bordered("now playing", &colors))
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[1]);

    // Progress
    let (ratio, label) = match player.progress() {
        Some(p) => (
            p.percent() / 100.0,
            format!("{} / {}", format_time(p.elapsed), format_time(p.total)),
        ),
        None => (0.0, format!("{} / {}", format_time(0.0), format_time(0.0))),
    };
    let gauge = Gauge::default()
        .block(bordered("progress", &colors))
        .gauge_style(Style::default().fg(ACCENT).bg(colors.bg))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, chunks[2]);

    // Playlist
    {
        let total = display.len();
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = sel_pos.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let current = playlist.current_index();
        let items: Vec<ListItem> = display[start..end]
            .iter()
            .filter_map(|&i| {
                let track = playlist.tracks().get(i)?;
                let marker = if Some(i) == current { "♪ " } else { "  " };
                let item = ListItem::new(format!(
                    "{marker}{} - {} [{}]",
                    track.title, track.artist, track.genre
                ));
                Some(if Some(i) == current {
                    item.style(Style::default().fg(ACCENT))
                } else {
                    item
                })
            })
            .collect();

        let title = format!(
            "playlist ({}/{}) • genre: {}",
            total,
            playlist.len(),
            app.genre
        );
        let list = List::new(items)
            .block(bordered(&title, &colors))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Input line: search, playlist name prompt or status
    let (input_title, input_text) = match app.mode {
        InputMode::Search => ("search", format!("/{}", app.search_query)),
        InputMode::PlaylistName => ("save playlist as", format!("{}_", app.name_input)),
        InputMode::Normal => {
            let q = app.search_query.trim();
            let status = app.status.as_deref().unwrap_or("");
            if q.is_empty() {
                ("status", status.to_string())
            } else {
                ("status", format!("search: {q} • {status}"))
            }
        }
    };
    let input = Paragraph::new(input_text)
        .style(Style::default().fg(colors.muted))
        .block(bordered(input_title, &colors));
    frame.render_widget(input, chunks[4]);

    // Saved playlists popup
    if let Some(saved) = &app.saved_window {
        let list_area = chunks[3];
        let height = (saved.len() as u16).saturating_add(2);
        let popup_area = centered_rect_sized(60, height, list_area);
        frame.render_widget(Clear, popup_area);

        let text = if saved.is_empty() {
            "No saved playlists".to_string()
        } else {
            saved
                .iter()
                .map(|p| {
                    format!(
                        "{} ({} tracks) • {}",
                        p.name,
                        p.tracks.len(),
                        p.created.format("%Y-%m-%d %H:%M")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        let popup = Paragraph::new(text)
            .block(bordered("saved playlists (o closes)", &colors))
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, popup_area);
    }

    let footer = Paragraph::new(controls_text(controls_settings))
        .style(Style::default().fg(colors.muted))
        .block(bordered("controls", &colors))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}
