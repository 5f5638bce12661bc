//! # sps - Simple Port Scanner
//!
//! Finds open TCP ports on a single host by attempting full connections
//! within a timeout. Ports are probed in fixed-size batches: every port in a
//! batch is probed concurrently, batches run one after another, and an
//! optional pause separates them to keep the scan polite.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use sps::config::ScanConfig;
//! use sps::resolver::{AddressResolver, SystemResolver};
//! use sps::scanner::{run_scan, NoopObserver};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ScanConfig::builder("localhost")
//!         .with_start_port(20)
//!         .with_end_port(25)
//!         .with_batch_size(3)
//!         .build()?;
//!     let target = SystemResolver::new().resolve(config.host()).await?;
//!     let report = run_scan(&config, &target, Arc::new(NoopObserver)).await?;
//!
//!     for port in report.result.open_ports() {
//!         println!("{port} is open");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Port, port range and resolved target types
//! - [`config`] - Validated scan parameters and the settings file
//! - [`resolver`] - Host name to address resolution
//! - [`scanner`] - Connect probes, batch scheduling and result collection
//! - [`output`] - Plain, JSON and CSV reports plus console progress
//! - [`cli`] - Argument parsing and interactive mode
//! - [`error`] - Error types for each layer

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod resolver;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use config::{ScanConfig, Verbosity};
pub use error::{CliError, ConfigError, ResolveError, ScanError};
pub use scanner::{run_scan, PortOutcome, PortState, ScanReport, ScanResult};
pub use types::{Port, PortRange, ResolvedTarget};
