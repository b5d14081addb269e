use std::path::PathBuf;

/// One openable file in the browser pane.
#[derive(Clone, Debug)]
pub struct FileEntry {
    pub path: PathBuf,
    /// File name verbatim, extension included. Becomes the ledger entry's
    /// display name when the file is opened.
    pub name: String,
    pub size_bytes: u64,
}
