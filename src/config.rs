use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// Base path for folio's own files (log).
pub fn folio_home() -> PathBuf {
    dirs_base().join(".folio")
}

fn dirs_base() -> PathBuf {
    std::env::var("USERPROFILE")
        .or_else(|_| std::env::var("HOME"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Default book location, relative to the working directory.
pub const DEFAULT_SOURCE: &str = "chunks.json";

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".folio.toml";

/// How often the tick event fires (ms).
pub const TICK_RATE_MS: u64 = 250;

/// How often the UTC date is re-checked for rollover (s).
pub const DAY_CHECK_SECS: u64 = 60;

/// HTTP timeout for fetching the book (s).
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Footer title.
pub const DEFAULT_TITLE: &str = "Year of the Book";

// ---------------------------------------------------------------------------
// Reader config (.folio.toml)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ReaderConfig {
    pub source: Option<String>,
    pub fetch: Option<FetchConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Deserialize)]
pub struct FetchConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    pub tick_rate: Option<u64>,
    pub day_check_secs: Option<u64>,
    /// Draw the first letter of the page as a drop cap. Default: true.
    pub drop_cap: Option<bool>,
    pub title: Option<String>,
}

impl ReaderConfig {
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_SOURCE)
    }

    pub fn fetch_timeout(&self) -> Duration {
        let secs = self
            .fetch
            .as_ref()
            .and_then(|f| f.timeout_secs)
            .unwrap_or(FETCH_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn tick_rate(&self) -> Duration {
        let ms = self
            .display
            .as_ref()
            .and_then(|d| d.tick_rate)
            .unwrap_or(TICK_RATE_MS);
        Duration::from_millis(ms.max(1))
    }

    pub fn day_check_interval(&self) -> Duration {
        let secs = self
            .display
            .as_ref()
            .and_then(|d| d.day_check_secs)
            .unwrap_or(DAY_CHECK_SECS);
        Duration::from_secs(secs.max(1))
    }

    pub fn drop_cap(&self) -> bool {
        self.display
            .as_ref()
            .and_then(|d| d.drop_cap)
            .unwrap_or(true)
    }

    pub fn title(&self) -> &str {
        self.display
            .as_ref()
            .and_then(|d| d.title.as_deref())
            .unwrap_or(DEFAULT_TITLE)
    }
}

/// Load the reader config from `explicit`, or from `.folio.toml` in `cwd`.
/// Returns default config if the file doesn't exist or can't be parsed.
pub fn load_reader_config(explicit: Option<&Path>, cwd: &Path) -> ReaderConfig {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => cwd.join(CONFIG_FILE),
    };
    if !path.exists() {
        if explicit.is_some() {
            warn!(path = %path.display(), "config file not found, using defaults");
        }
        return ReaderConfig::default();
    }

    let content = std::fs::read_to_string(&path).unwrap_or_default();
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            ReaderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_reader_config(None, dir.path());
        assert_eq!(config.source(), DEFAULT_SOURCE);
        assert_eq!(config.tick_rate(), Duration::from_millis(TICK_RATE_MS));
        assert_eq!(config.day_check_interval(), Duration::from_secs(60));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert!(config.drop_cap());
        assert_eq!(config.title(), "Year of the Book");
    }

    #[test]
    fn reads_folio_toml_from_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
source = "https://example.org/moby.json"

[fetch]
timeout_secs = 5

[display]
tick_rate = 100
day_check_secs = 10
drop_cap = false
title = "Moby-Dick"
"#,
        )
        .unwrap();

        let config = load_reader_config(None, dir.path());
        assert_eq!(config.source(), "https://example.org/moby.json");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
        assert_eq!(config.day_check_interval(), Duration::from_secs(10));
        assert!(!config.drop_cap());
        assert_eq!(config.title(), "Moby-Dick");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[display]\ntitle = \"Walden\"\n").unwrap();

        let config = load_reader_config(Some(&path), dir.path());
        assert_eq!(config.title(), "Walden");
        assert_eq!(config.source(), DEFAULT_SOURCE);
        assert!(config.drop_cap());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "source = [unterminated").unwrap();

        let config = load_reader_config(None, dir.path());
        assert_eq!(config.source(), DEFAULT_SOURCE);
    }

    #[test]
    fn zero_intervals_are_raised_to_a_minimum() {
        let config: ReaderConfig =
            toml::from_str("[display]\ntick_rate = 0\nday_check_secs = 0\n").unwrap();
        assert_eq!(config.tick_rate(), Duration::from_millis(1));
        assert_eq!(config.day_check_interval(), Duration::from_secs(1));
    }
}
