use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/wavescope/config.toml` or
/// `~/.config/wavescope/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `WAVESCOPE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub deck: DeckSettings,
    pub ui: UiSettings,
    pub browser: BrowserSettings,
}

/// Options for the playback deck and its waveform lane.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeckSettings {
    /// Color of the not-yet-played part of the waveform lane. Accepts
    /// ratatui color names and `#RRGGBB`.
    pub wave_color: String,
    /// Color of the played part of the waveform lane.
    pub progress_color: String,
    /// Height of the waveform lane, in terminal rows.
    pub height: u16,
    /// Width of each waveform bar, in columns. Bars are separated by a
    /// one-column gap.
    pub bar_width: u16,
    /// When true the lane grows with the terminal; when false it stays at
    /// `height` rows.
    pub responsive: bool,
    /// Decode/playback engine.
    pub backend: DeckBackend,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            wave_color: "#1E90FF".to_string(),
            progress_color: "#4682B4".to_string(),
            height: 8,
            bar_width: 3,
            responsive: true,
            backend: DeckBackend::Rodio,
        }
    }
}

/// Selectable playback engines. `rodio` is the only one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeckBackend {
    Rodio,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top "wavescope" header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ drop the needle ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}
