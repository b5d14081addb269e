use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_wavescope_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("WAVESCOPE_CONFIG_PATH", "/tmp/wavescope-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/wavescope-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("wavescope")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("wavescope")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r##"
[deck]
wave_color = "cyan"
progress_color = "#AABBCC"
height = 5
bar_width = 1
responsive = false
backend = "rodio"

[ui]
header_text = "hello"

[browser]
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
"##,
    )
    .unwrap();

    let _g1 = EnvGuard::set("WAVESCOPE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("WAVESCOPE__DECK__HEIGHT");

    let s = Settings::load().unwrap();
    assert_eq!(s.deck.wave_color, "cyan");
    assert_eq!(s.deck.progress_color, "#AABBCC");
    assert_eq!(s.deck.height, 5);
    assert_eq!(s.deck.bar_width, 1);
    assert!(!s.deck.responsive);
    assert_eq!(s.deck.backend, DeckBackend::Rodio);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.browser.extensions, vec!["mp3".to_string()]);
    assert!(!s.browser.recursive);
    assert!(!s.browser.include_hidden);
    assert!(!s.browser.follow_links);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[deck]
height = 12
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("WAVESCOPE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("WAVESCOPE__DECK__HEIGHT", "4");

    let s = Settings::load().unwrap();
    assert_eq!(s.deck.height, 4);
}

#[test]
fn validate_rejects_zero_waveform_dimensions() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.deck.height = 0;
    assert!(s.validate().is_err());

    s.deck.height = 8;
    s.deck.bar_width = 0;
    assert!(s.validate().is_err());
}
