//! Reads duration and artist tags with `lofty`.

use log::debug;
use lofty::prelude::*;

use super::model::Track;

/// Fill `duration_secs` (and the artist, when tagged) from the track's file.
///
/// Unreadable files keep their defaults: a duration of zero and whatever
/// artist the import derived.
pub fn load_metadata(track: &mut Track) {
    let Some(path) = track.media.as_ref().map(|m| m.path().to_path_buf()) else {
        return;
    };

    let tagged = match lofty::read_from_path(&path) {
        Ok(tagged) => tagged,
        Err(e) => {
            debug!("no metadata for {}: {e}", path.display());
            return;
        }
    };

    track.duration_secs = tagged.properties().duration().as_secs_f64();

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(artist) = tag.artist() {
            let artist = artist.trim();
            if !artist.is_empty() {
                track.artist = artist.to_string();
            }
        }
    }
}
