use chrono::{TimeZone, Utc};

use super::*;
use crate::audio::fake::{Call, RecordingPlayback};
use crate::audio::{Player, Volume};
use crate::config::Theme;
use crate::library::{MediaHandle, Track};
use crate::playlist::{GenreFilter, PlaylistState};
use crate::storage::{MemoryStore, Storage};

fn t(title: &str, genre: &str) -> Track {
    let mut track = Track::new(title, "Unknown Artist", genre);
    track.media = Some(MediaHandle::new(format!("/music/{title}.mp3")));
    track
}

fn app_with(tracks: Vec<Track>) -> App<RecordingPlayback, MemoryStore> {
    let player = Player::new(
        RecordingPlayback::with_duration(180.0),
        PlaylistState::new(),
        Volume::default(),
    );
    let mut app = App::new(player, Storage::new(MemoryStore::default()), Theme::Light);
    app.import(tracks);
    app
}

#[test]
fn import_persists_playlist_and_reports_count() {
    let app = app_with(vec![t("Alpha", "rock"), t("Beta", "jazz")]);
    assert_eq!(app.status.as_deref(), Some("Added 2 tracks"));

    let stored = app.storage().load_current_playlist().unwrap();
    let titles: Vec<&str> = stored.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);
    assert!(stored.iter().all(|t| t.media.is_none()));
}

#[test]
fn display_indices_compose_genre_and_search() {
    let mut app = app_with(vec![
        t("Jazz Night", "jazz"),
        t("Rock On", "rock"),
        t("Late Jazz", "jazz"),
    ]);
    app.push_search_char('j');
    app.push_search_char('a');
    assert_eq!(app.display_indices(), vec![0, 2]);

    app.genre = GenreFilter::Genre("rock".into());
    assert!(app.display_indices().is_empty());

    app.clear_search();
    assert_eq!(app.display_indices(), vec![1]);
}

#[test]
fn search_query_is_trimmed() {
    let mut app = app_with(vec![t("Rock On", "rock")]);
    app.search_query = "   ".into();
    assert_eq!(app.display_indices(), vec![0]);
    app.search_query = "rock ".into();
    assert_eq!(app.display_indices(), vec![0]);
}

#[test]
fn cursor_wraps_within_the_view() {
    let mut app = app_with(vec![t("Alpha", "rock"), t("Beta", "pop"), t("Gamma", "rock")]);
    app.genre = GenreFilter::Genre("rock".into());

    assert_eq!(app.next_in_view_from(0), Some(2));
    assert_eq!(app.next_in_view_from(2), Some(0));
    assert_eq!(app.prev_in_view_from(0), Some(2));
    // A hidden cursor jumps into the view.
    assert_eq!(app.next_in_view_from(1), Some(0));

    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
}

#[test]
fn filtering_moves_cursor_to_first_visible_track() {
    let mut app = app_with(vec![t("Alpha", "rock"), t("Beta", "pop")]);
    app.push_search_char('b');
    assert_eq!(app.selected, 1);
    app.pop_search_char();
    assert_eq!(app.selected, 1);
}

#[test]
fn cycle_genre_steps_through_known_genres() {
    let mut app = app_with(vec![t("Alpha", "pop")]);
    app.cycle_genre();
    assert_eq!(app.genre, GenreFilter::Genre("rock".into()));
    assert!(app.display_indices().is_empty());
    app.cycle_genre();
    assert_eq!(app.display_indices(), vec![0]);
}

#[test]
fn play_selected_plays_cursor_track() {
    let mut app = app_with(vec![t("Alpha", "rock"), t("Beta", "pop")]);
    app.next();
    app.play_selected();

    assert!(app.player.is_playing());
    assert_eq!(app.player.playlist().current_index(), Some(1));
    assert_eq!(
        app.player.playback().media,
        Some(MediaHandle::new("/music/Beta.mp3"))
    );
}

#[test]
fn playback_errors_land_in_status() {
    let player = Player::new(
        RecordingPlayback::default(),
        [Track::new("Restored", "X", "pop")].into_iter().collect(),
        Volume::default(),
    );
    let mut app = App::new(player, Storage::new(MemoryStore::default()), Theme::Light);
    app.toggle_play_pause();

    let status = app.status.unwrap();
    assert!(status.contains("Restored"), "{status}");
}

#[test]
fn remove_selected_updates_cursor_and_storage() {
    let mut app = app_with(vec![t("Alpha", "rock"), t("Beta", "pop")]);
    app.select_last();
    app.remove_selected();

    assert_eq!(app.selected, 0);
    assert_eq!(app.status.as_deref(), Some("Removed \"Beta\""));
    assert_eq!(app.storage().load_current_playlist().unwrap().len(), 1);

    app.remove_selected();
    assert!(app.player.playlist().is_empty());
    assert_eq!(app.selected_id(), None);
    app.remove_selected();
    assert_eq!(app.storage().load_current_playlist().unwrap().len(), 0);
}

#[test]
fn theme_toggle_is_persisted() {
    let mut app = app_with(vec![]);
    app.toggle_theme();
    assert_eq!(app.theme, Theme::Dark);
    assert_eq!(app.storage().load_theme(), Some(Theme::Dark));
}

#[test]
fn volume_steps_are_clamped() {
    let mut app = app_with(vec![]);
    app.volume_up(60);
    assert_eq!(app.player.volume().percent(), 100);
    app.volume_down(30);
    assert_eq!(app.player.volume().percent(), 70);
    assert_eq!(
        app.player.playback().calls.last(),
        Some(&Call::Volume(0.7))
    );
}

#[test]
fn shuffle_and_repeat_report_state() {
    let mut app = app_with(vec![t("Alpha", "rock")]);
    app.toggle_shuffle();
    assert_eq!(app.status.as_deref(), Some("Shuffle on"));
    app.toggle_repeat();
    assert_eq!(app.status.as_deref(), Some("Repeat on"));
    app.toggle_repeat();
    assert_eq!(app.status.as_deref(), Some("Repeat off"));
}

#[test]
fn saving_named_playlist_records_timestamp() {
    let mut app = app_with(vec![t("Alpha", "rock")]);
    let created = Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap();

    app.begin_save();
    assert_eq!(app.mode, InputMode::PlaylistName);
    for c in "Road trip".chars() {
        app.push_name_char(c);
    }
    app.confirm_save(created);

    assert_eq!(app.mode, InputMode::Normal);
    assert_eq!(app.status.as_deref(), Some("Playlist \"Road trip\" saved!"));
    let saved = app.storage().saved_playlists();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].created, created);

    app.toggle_saved_window();
    assert_eq!(app.saved_window.as_ref().map(Vec::len), Some(1));
    app.toggle_saved_window();
    assert!(app.saved_window.is_none());
}

#[test]
fn blank_playlist_name_keeps_prompt_open() {
    let mut app = app_with(vec![t("Alpha", "rock")]);
    app.begin_save();
    app.push_name_char(' ');
    app.confirm_save(Utc::now());

    assert_eq!(app.mode, InputMode::PlaylistName);
    assert_eq!(app.status.as_deref(), Some("Playlist name cannot be empty."));
    assert!(app.storage().saved_playlists().is_empty());
}

#[test]
fn saving_empty_playlist_is_refused() {
    let mut app = app_with(vec![]);
    app.begin_save();
    app.push_name_char('x');
    app.confirm_save(Utc::now());

    assert_eq!(app.mode, InputMode::Normal);
    assert_eq!(app.status.as_deref(), Some("No tracks in playlist to save!"));
}

#[test]
fn track_end_advances_playlist() {
    let mut app = app_with(vec![t("Alpha", "rock"), t("Beta", "pop")]);
    app.play_selected();
    app.on_track_end();
    assert_eq!(app.player.playlist().current_index(), Some(1));
    assert!(app.player.is_playing());
}

#[test]
fn seek_fraction_jumps_within_loaded_track() {
    let mut app = app_with(vec![t("Alpha", "rock")]);
    app.seek_fraction(0.5);
    assert_eq!(app.player.playback().position, 0.0);

    app.play_selected();
    app.seek_fraction(0.5);
    assert_eq!(app.player.playback().position, 90.0);
}
