//! Configuration loader and schema types.
//!
//! This module exposes the settings for the player, the age calculator,
//! storage and logging, and helpers to load them from disk and environment.

mod load;
mod schema;

pub use schema::*;
