//! Error types for sps.
//!
//! Uses `thiserror` for ergonomic error definitions. Configuration and
//! resolution errors abort before any probe is sent; probe errors never leave
//! the scanner and end up as a closed port.

use crate::types::{AddressFamily, PortError};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Invalid scan parameters or an unreadable settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Port(#[from] PortError),

    #[error("host name or IP address must be provided")]
    EmptyHost,

    #[error("timeout must be a non-negative number of seconds, got {0}")]
    InvalidTimeout(f64),

    #[error("batch size must be a positive integer, got {0}")]
    InvalidBatchSize(usize),

    #[error("interval must be a non-negative number of seconds, got {0}")]
    InvalidInterval(f64),

    #[error("failed to read settings from {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),
}

/// The host could not be turned into an address this machine can connect to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("host name or IP address must be provided")]
    EmptyHost,

    #[error("failed to resolve host '{host}': {reason}")]
    LookupFailed { host: String, reason: String },

    #[error("no IP addresses found for host '{0}'")]
    NoAddresses(String),

    #[error("host '{host}' only resolves to {family} addresses, which this system cannot use")]
    UnsupportedFamily { host: String, family: AddressFamily },
}

/// Why a single connection attempt did not succeed.
///
/// Only used for diagnostics; the scanner reports all of these as closed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("connection refused")]
    Refused,

    #[error("connection timed out")]
    Timeout,

    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("connection failed: {0}")]
    Failed(String),
}

/// The collected results broke the one-outcome-per-port invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("expected {expected} port outcomes, collected {collected}")]
    CountMismatch { expected: usize, collected: usize },

    #[error("port {port} is out of order or duplicated in scan results")]
    OutOfOrder { port: u16 },

    #[error("scan results start at port {found}, expected {expected}")]
    WrongStart { expected: u16, found: u16 },
}

/// Top-level error type for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scan interrupted by user after {:.4}s", .0.as_secs_f64())]
    Interrupted(Duration),

    #[error("Interrupted by user")]
    Cancelled,
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Interrupted(_) | Self::Cancelled => 130,
            _ => 1,
        }
    }
}

impl From<PortError> for CliError {
    fn from(e: PortError) -> Self {
        Self::Config(ConfigError::Port(e))
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
