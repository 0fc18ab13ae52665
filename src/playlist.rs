//! Playlist navigation: an ordered list of tracks with a current position,
//! shuffle and repeat modes, plus read-only search and genre projections.

mod state;
mod view;

pub use state::*;
pub use view::*;
