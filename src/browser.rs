//! File browser: the openable-audio-files pane.
//!
//! Scans a directory for files whose extension is in the configured audio
//! set. The filter is best-effort only; anything that slips through is
//! rejected later by the decoder.

mod model;
mod scan;

pub use model::FileEntry;
pub use scan::scan;
