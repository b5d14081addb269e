//! Recent-files ledger: the bounded, newest-first history of opened files.
//!
//! Entries are immutable once recorded; eviction hands the displaced entry
//! back to the caller so its audio resource can be revoked.

mod format;
mod model;

pub use format::{format_duration, format_size};
pub use model::*;
