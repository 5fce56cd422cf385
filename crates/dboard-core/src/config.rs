//! Configuration management for dboard.
//!
//! Loads configuration from ${DBOARD_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::context::SortKey;

pub mod paths {
    //! Path resolution for dboard configuration.
    //!
    //! DBOARD_HOME resolution order:
    //! 1. DBOARD_HOME environment variable (if set)
    //! 2. ~/.config/dboard (default)

    use std::path::PathBuf;

    /// Returns the dboard home directory.
    pub fn dboard_home() -> PathBuf {
        if let Ok(home) = std::env::var("DBOARD_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("dboard")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        dboard_home().join("config.toml")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scheme and host of the LMS serving the discussion endpoints.
    pub base_url: String,
    /// Course the board belongs to (e.g. `course-v1:edX+DemoX+2024`).
    pub course_id: String,
    /// Default thread ordering.
    pub sort_key: SortKey,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Default tracing filter when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            course_id: String::new(),
            sort_key: SortKey::default(),
            request_timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:18000";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_LOG_FILTER: &'static str = "warn";

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// `DBOARD_BASE_URL` wins over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("DBOARD_BASE_URL")
            && !base_url.trim().is_empty()
        {
            self.base_url = base_url;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "course_id = \"course-v1:edX+DemoX+2024\"\nsort_key = \"votes\"\n",
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.course_id, "course-v1:edX+DemoX+2024");
        assert_eq!(config.sort_key, SortKey::Votes);
        assert_eq!(config.base_url, Config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "sort_key = 5").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err}").contains("config.toml"));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
