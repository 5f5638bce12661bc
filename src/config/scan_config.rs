//! The immutable, validated description of one scan.
//!
//! Both the argument parser and the interactive prompts end in
//! [`ScanConfigBuilder::build`], so the scanner never sees which one was used.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{Port, PortRange};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default per-probe connection timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 0.1;
/// Default number of ports probed concurrently.
pub const DEFAULT_BATCH_SIZE: usize = 10;
/// Default pause between batches in seconds.
pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;

/// How much the front end prints while and after scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Only the final result.
    Quiet,
    /// Scan header, per-batch progress and the result.
    #[default]
    Normal,
    /// Everything in `Normal` plus a line per probe.
    Verbose,
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

/// Configuration for a single scan.
///
/// Fields are private; the only way to get one is through
/// [`ScanConfigBuilder`], which enforces every invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    host: String,
    ports: PortRange,
    timeout: Duration,
    batch_size: usize,
    interval: Duration,
    verbosity: Verbosity,
}

impl ScanConfig {
    /// Start building a configuration for `host` with default parameters.
    pub fn builder(host: impl Into<String>) -> ScanConfigBuilder {
        ScanConfigBuilder::new(host)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn ports(&self) -> PortRange {
        self.ports
    }

    pub fn start_port(&self) -> Port {
        self.ports.start()
    }

    pub fn end_port(&self) -> Port {
        self.ports.end()
    }

    /// Deadline for a single connection attempt.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Maximum number of probes in flight at once.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Pause between the end of one batch and the start of the next.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Number of batches the scan will run, `ceil(ports / batch_size)`.
    pub fn batch_count(&self) -> usize {
        self.ports.len().div_ceil(self.batch_size)
    }
}

/// Builder for [`ScanConfig`].
///
/// Setters take raw values as typed by the operator; nothing is checked until
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ScanConfigBuilder {
    host: String,
    start_port: u16,
    end_port: u16,
    timeout_secs: f64,
    batch_size: usize,
    interval_secs: f64,
    verbosity: Verbosity,
}

impl ScanConfigBuilder {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            start_port: Port::MIN,
            end_port: Port::MAX,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            batch_size: DEFAULT_BATCH_SIZE,
            interval_secs: DEFAULT_INTERVAL_SECS,
            verbosity: Verbosity::default(),
        }
    }

    pub fn with_start_port(mut self, port: u16) -> Self {
        self.start_port = port;
        self
    }

    pub fn with_end_port(mut self, port: u16) -> Self {
        self.end_port = port;
        self
    }

    /// Set the connection timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: f64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set the inter-batch interval in seconds.
    pub fn with_interval_secs(mut self, secs: f64) -> Self {
        self.interval_secs = secs;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Validate every field and produce the immutable configuration.
    pub fn build(self) -> ConfigResult<ScanConfig> {
        let host = self.host.trim().to_string();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        let start = Port::try_from(self.start_port)?;
        let end = Port::try_from(self.end_port)?;
        let ports = PortRange::new(start, end)?;

        let timeout = Duration::try_from_secs_f64(self.timeout_secs)
            .map_err(|_| ConfigError::InvalidTimeout(self.timeout_secs))?;

        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }

        let interval = Duration::try_from_secs_f64(self.interval_secs)
            .map_err(|_| ConfigError::InvalidInterval(self.interval_secs))?;

        Ok(ScanConfig {
            host,
            ports,
            timeout,
            batch_size: self.batch_size,
            interval,
            verbosity: self.verbosity,
        })
    }
}
