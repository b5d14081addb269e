//! Application module: exposes the session model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the browsable file list,
//! the recent-files ledger, the resource table and the single in-flight
//! load slot.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
