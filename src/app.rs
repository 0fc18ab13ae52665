//! Application module: the model the TUI renders and the runtime drives.
//!
//! `App` lives in `app::model` and holds the player, the storage handle and
//! the cursor, search and filter state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
