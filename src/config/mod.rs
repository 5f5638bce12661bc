//! Configuration management for sps.
//!
//! [`ScanConfig`] is the validated input to a scan; [`AppSettings`] holds
//! optional user defaults read from disk.

mod scan_config;
mod settings;

pub use scan_config::{
    ScanConfig, ScanConfigBuilder, Verbosity, DEFAULT_BATCH_SIZE, DEFAULT_INTERVAL_SECS,
    DEFAULT_TIMEOUT_SECS,
};
pub use settings::{default_settings_path, AppSettings};
