use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::audio::Playback;
use crate::config;
use crate::storage::KeyValueStore;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: handles input, UI drawing and the end of the
/// playing track. Returns `Ok(())` when shutdown is requested.
pub fn run<P: Playback, S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<P, S>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if app.player.playback().has_ended() {
            app.on_track_end();
        }

        let display = app.display_indices();
        terminal.draw(|f| ui::draw(f, app, &display, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns `true` when the user asked to quit.
fn handle_key_event<P: Playback, S: KeyValueStore>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<P, S>,
    state: &mut EventLoopState,
) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match app.mode {
        InputMode::Search => {
            state.pending_gg = false;
            match key.code {
                KeyCode::Esc => app.clear_search(),
                KeyCode::Enter => app.exit_search_mode(),
                KeyCode::Backspace => app.pop_search_char(),
                KeyCode::Down => app.next(),
                KeyCode::Up => app.prev(),
                KeyCode::Char('j') | KeyCode::Char('n') if ctrl => app.next(),
                KeyCode::Char('k') | KeyCode::Char('p') if ctrl => app.prev(),
                KeyCode::Char(c) if !c.is_control() => app.push_search_char(c),
                _ => {}
            }
            return false;
        }
        InputMode::PlaylistName => {
            state.pending_gg = false;
            match key.code {
                KeyCode::Esc => app.cancel_save(),
                KeyCode::Enter => app.confirm_save(Utc::now()),
                KeyCode::Backspace => app.pop_name_char(),
                KeyCode::Char(c) if !c.is_control() => app.push_name_char(c),
                _ => {}
            }
            return false;
        }
        InputMode::Normal => {}
    }

    let seek = settings.controls.seek_seconds as f64;
    let step = settings.controls.volume_step;

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::Char('s') | KeyCode::Char('S') => app.toggle_shuffle(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.toggle_repeat(),
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_play_pause(),
        KeyCode::Char('l') | KeyCode::Right => app.next_track(),
        KeyCode::Char('h') | KeyCode::Left => app.previous_track(),
        KeyCode::Char('L') => app.seek_by(seek),
        KeyCode::Char('H') => app.seek_by(-seek),
        KeyCode::Char(c @ '0'..='9') => {
            let tenths = c.to_digit(10).unwrap_or(0);
            app.seek_fraction(f64::from(tenths) / 10.0);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => app.volume_up(step),
        KeyCode::Char('-') => app.volume_down(step),
        KeyCode::Char('f') => app.cycle_genre(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('w') => app.begin_save(),
        KeyCode::Char('o') => app.toggle_saved_window(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Esc => app.saved_window = None,
        _ => {}
    }

    false
}
