//! Application settings.
//!
//! Optional user defaults for scan parameters, read from a JSON file in the
//! XDG config directory (`~/.config/sps/settings.json` on Linux) or from an
//! explicit `--config` path. The file is only ever read.

use crate::config::scan_config::{
    Verbosity, DEFAULT_BATCH_SIZE, DEFAULT_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS,
};
use crate::error::{ConfigError, ConfigResult};
use crate::output::OutputFormat;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the settings file inside the config directory.
const SETTINGS_FILE: &str = "settings.json";

/// Default location of the settings file, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sps").map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

/// Defaults applied to any scan parameter the operator leaves unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Connection timeout in seconds.
    pub timeout_secs: f64,
    /// Number of ports probed concurrently.
    pub batch_size: usize,
    /// Pause between batches in seconds.
    pub interval_secs: f64,
    pub verbosity: Verbosity,
    pub output_format: OutputFormat,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            batch_size: DEFAULT_BATCH_SIZE,
            interval_secs: DEFAULT_INTERVAL_SECS,
            verbosity: Verbosity::Normal,
            output_format: OutputFormat::Plain,
        }
    }
}

impl AppSettings {
    /// Load settings from `path` if given, otherwise from the default
    /// location. A missing default file yields built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match default_settings_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        debug!(path = %path.display(), "loading settings");
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }
}
