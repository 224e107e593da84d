use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use feed_core::{FeedOptions, DEFAULT_PAGE_SIZE};
use feed_engine::{FetchSettings, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILENAME: &str = "feedctl.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Settings for `feedctl`, read from a RON file. Every field is optional in
/// the file; command-line flags override what the file says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub page_size: u32,
    pub section: Option<String>,
    pub infinite_scroll: bool,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            section: None,
            infinite_scroll: false,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            log_file: None,
        }
    }
}

/// Where the loaded settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults(PathBuf),
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "Loaded config from {path:?}"),
            ConfigOrigin::Defaults(path) => write!(f, "No config at {path:?}; using defaults"),
        }
    }
}

impl FeedConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok((Self::default(), ConfigOrigin::Defaults(path.to_path_buf())));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok((config, ConfigOrigin::File(path.to_path_buf())))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn feed_options(&self) -> FeedOptions {
        FeedOptions {
            page_size: self.page_size,
            section: self.section.clone(),
            infinite_scroll: self.infinite_scroll,
        }
    }

    /// Upper bound on how long one request can keep the driver waiting.
    pub fn response_deadline(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs + self.request_timeout_secs + 1)
    }
}
