//! Playback: the `Playback` collaborator trait, its `rodio` implementation
//! and the `Player` that drives it from the playlist.

mod player;
mod sink;
mod types;

pub use player::*;
pub use sink::RodioPlayback;
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;
