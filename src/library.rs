//! Track model and the file-import side of the library.
//!
//! `import` turns user-supplied paths into `Track` values: directories are
//! walked, non-audio files skipped and durations read from the file tags.

mod import;
mod metadata;
mod model;

pub use import::*;
pub use metadata::load_metadata;
pub use model::*;
