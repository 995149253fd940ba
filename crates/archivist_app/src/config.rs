//! Application configuration, read from a RON file.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup against a local server.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use archivist_engine::ApiSettings;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub preferences_path: PathBuf,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            preferences_path: PathBuf::from("./archivist_prefs.ron"),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let defaults = ApiSettings::default();
        Self {
            base_url: defaults.base_url,
            api_token: defaults.api_token,
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
        }
    }
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogDestination {
    File,
    /// Interleaves with the rendered queue; mostly useful when debugging.
    Terminal,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogDestination,
    pub file: PathBuf,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::File,
            file: PathBuf::from("./archivist.log"),
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        self.level
            .parse()
            .with_context(|| format!("unknown log level {:?}", self.level))
    }
}

impl AppConfig {
    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = ron::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.log.level_filter()?;
        Ok(config)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.server.base_url.clone(),
            api_token: self.server.api_token.clone(),
            connect_timeout: Duration::from_secs(self.server.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.server.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_path_gives_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_settings().base_url, "http://localhost:8000");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("archivist.ron");
        fs::write(
            &path,
            r#"(
                server: (base_url: "https://tube.example", api_token: Some("abc")),
                log: (destination: Both),
            )"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.base_url, "https://tube.example");
        assert_eq!(config.server.api_token.as_deref(), Some("abc"));
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.log.destination, LogDestination::Both);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.preferences_path, PathBuf::from("./archivist_prefs.ron"));
    }

    #[test]
    fn bad_level_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("archivist.ron");
        fs::write(&path, r#"(log: (level: "loud"))"#).unwrap();

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/archivist.ron"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/archivist.ron"));
    }
}
