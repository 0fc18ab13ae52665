use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{Player, RodioPlayback, Volume};
use crate::config::Settings;
use crate::library;
use crate::playlist::PlaylistState;
use crate::storage::{FileStore, Storage};

mod calculate;
mod event_loop;
pub mod logging;
mod settings;

pub use calculate::run as run_age;
pub use settings::load_settings;

/// Open the player on `paths` and run the TUI until the user quits.
pub fn run(paths: &[PathBuf], settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::new(FileStore::new(settings.storage_dir()));
    let theme = storage.load_theme().unwrap_or(settings.ui.theme);
    let previous = storage.load_current_playlist().unwrap_or_default();

    let playback = RodioPlayback::open()?;
    let playlist = PlaylistState::with_modes(settings.player.shuffle, settings.player.repeat);
    let player = Player::new(playback, playlist, Volume::from_percent(settings.player.volume));
    let mut app = App::new(player, storage, theme);

    let tracks = library::import(paths, &settings.library);
    if !tracks.is_empty() {
        app.import(tracks);
    } else if !previous.is_empty() {
        // Stored tracks carry no audio, so they are only announced.
        info!("previous session had {} tracks", previous.len());
        app.set_status(format!(
            "Last session had {} tracks; pass the files again to play them",
            previous.len()
        ));
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, settings, &mut app, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("tempo shutting down");
    run_result
}
