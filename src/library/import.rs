use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::metadata::load_metadata;
use super::model::{MediaHandle, Track};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_GENRE: &str = "unknown";

/// Genres recognised in file names, in matching order.
pub const KNOWN_GENRES: [&str; 6] = ["rock", "pop", "jazz", "classical", "hip-hop", "electronic"];

/// A file offered for import: its path, file name and MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub mime: &'static str,
}

impl FileEntry {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self {
            path: path.to_path_buf(),
            mime: mime_for(path),
            name,
        })
    }

    pub fn is_audio(&self) -> bool {
        self.mime.starts_with("audio/")
    }
}

/// MIME type guessed from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "m4a" | "aac" => "audio/mp4",
        "weba" => "audio/webm",
        _ => "application/octet-stream",
    }
}

/// Drop the last extension: `a.b.mp3` -> `a.b`. Names ending in a bare dot
/// are kept as they are.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i + 1 < name.len() && !name[i + 1..].contains('/') => &name[..i],
        _ => name,
    }
}

/// First of `KNOWN_GENRES` contained in the file name, else `unknown`.
pub fn guess_genre(filename: &str) -> String {
    let lower = filename.to_lowercase();
    KNOWN_GENRES
        .iter()
        .find(|g| lower.contains(*g))
        .copied()
        .unwrap_or(UNKNOWN_GENRE)
        .to_string()
}

/// Build a track for an audio file; `None` for anything else.
pub fn track_from_file(entry: &FileEntry) -> Option<Track> {
    if !entry.is_audio() {
        return None;
    }

    let mut track = Track::new(
        strip_extension(&entry.name),
        UNKNOWN_ARTIST,
        guess_genre(&entry.name),
    );
    track.media = Some(MediaHandle::new(&entry.path));
    Some(track)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Expand `paths` into file entries: files are taken as given, directories
/// are walked according to `settings` and sorted by name.
pub fn collect_files(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<FileEntry> {
    let mut entries = Vec::new();

    for root in paths {
        if root.is_file() {
            entries.extend(FileEntry::from_path(root));
            continue;
        }
        if !root.is_dir() {
            debug!("skipping missing path {}", root.display());
            continue;
        }

        let mut walker = WalkDir::new(root)
            .follow_links(settings.follow_links)
            .sort_by_file_name();

        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
        {
            if entry.file_type().is_file() {
                entries.extend(FileEntry::from_path(entry.path()));
            }
        }
    }

    entries
}

/// Import every audio file reachable from `paths`, reading metadata as it goes.
pub fn import(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<Track> {
    let files = collect_files(paths, settings);
    let mut tracks: Vec<Track> = files.iter().filter_map(track_from_file).collect();
    for track in &mut tracks {
        load_metadata(track);
    }

    info!(
        "imported {} audio tracks from {} files",
        tracks.len(),
        files.len()
    );
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings() -> LibrarySettings {
        LibrarySettings::default()
    }

    #[test]
    fn collect_files_walks_directories_in_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.mp3"), b"x").unwrap();
        fs::write(dir.path().join("a.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.ogg"), b"x").unwrap();

        let names: Vec<String> = collect_files(&[dir.path().to_path_buf()], &settings())
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.txt", "b.mp3", "c.ogg"]);
    }

    #[test]
    fn collect_files_honours_recursion_and_hidden_settings() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("top.mp3"), b"x").unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("deep.mp3"), b"x").unwrap();

        let flat = LibrarySettings {
            recursive: false,
            ..LibrarySettings::default()
        };
        let names: Vec<String> = collect_files(&[dir.path().to_path_buf()], &flat)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["top.mp3"]);

        let with_hidden = LibrarySettings {
            include_hidden: true,
            ..LibrarySettings::default()
        };
        let count = collect_files(&[dir.path().to_path_buf()], &with_hidden).len();
        assert_eq!(count, 3);
    }

    #[test]
    fn import_skips_non_audio_and_keeps_defaults_for_unreadable_files() {
        let dir = tempdir().unwrap();
        let song = dir.path().join("Late Jazz Session.mp3");
        fs::write(&song, b"not a real mp3").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"x").unwrap();

        let tracks = import(&[dir.path().to_path_buf()], &settings());
        assert_eq!(tracks.len(), 1);
        let t = &tracks[0];
        assert_eq!(t.title, "Late Jazz Session");
        assert_eq!(t.artist, UNKNOWN_ARTIST);
        assert_eq!(t.genre, "jazz");
        assert_eq!(t.duration_secs, 0.0);
        assert_eq!(t.media.as_ref().map(|m| m.path()), Some(song.as_path()));
    }
}
