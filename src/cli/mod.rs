//! Command-line interface definitions for sps.
//!
//! Uses `clap` derive macros for declarative argument parsing. Running the
//! binary with no arguments at all switches to [`interactive`] mode instead.

pub mod interactive;
mod interrupt;
mod scan;

pub use scan::ScanCommand;

use crate::config::{AppSettings, ScanConfig, Verbosity};
use crate::error::ConfigResult;
use crate::output::OutputFormat;
use crate::types::Port;
use clap::Parser;
use std::path::PathBuf;

/// Scans HOST for open ports in range from START_PORT to END_PORT inclusive
/// using TCP connection initiation, waiting TIMEOUT seconds for each
/// connection to be established.
#[derive(Parser, Debug)]
#[command(name = "sps")]
#[command(version)]
#[command(about = "Simple port scanner using batched TCP connect probes")]
pub struct Cli {
    /// IP or host name to scan
    #[arg(value_name = "HOST")]
    pub host: String,

    /// First port in port range to scan
    #[arg(short = 's', long = "start_port", value_name = "PORT", default_value = "1")]
    pub start_port: Port,

    /// Last port in port range to scan
    #[arg(short = 'e', long = "end_port", value_name = "PORT", default_value = "65535")]
    pub end_port: Port,

    /// Seconds to wait for connection establishment [default: 0.1]
    #[arg(short = 't', long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub timeout: Option<f64>,

    /// Maximum size of a batch of concurrent port scans [default: 10]
    #[arg(short = 'b', long = "batch", value_name = "SIZE")]
    pub batch: Option<usize>,

    /// Seconds to wait between successive batches [default: 1.0]
    #[arg(short = 'i', long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub interval: Option<f64>,

    /// Display additional output during execution
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Display only the result
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format for results
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Path to a JSON settings file with default values
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Verbosity from the flags, falling back to the settings file.
    pub fn verbosity(&self, settings: &AppSettings) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            settings.verbosity
        }
    }

    pub fn output_format(&self, settings: &AppSettings) -> OutputFormat {
        self.output.unwrap_or(settings.output_format)
    }

    /// Build the scan configuration, taking unset values from `settings`.
    pub fn scan_config(&self, settings: &AppSettings) -> ConfigResult<ScanConfig> {
        ScanConfig::builder(&self.host)
            .with_start_port(self.start_port.as_u16())
            .with_end_port(self.end_port.as_u16())
            .with_timeout_secs(self.timeout.unwrap_or(settings.timeout_secs))
            .with_batch_size(self.batch.unwrap_or(settings.batch_size))
            .with_interval_secs(self.interval.unwrap_or(settings.interval_secs))
            .with_verbosity(self.verbosity(settings))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::types::PortError;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sps").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["127.0.0.1"]);
        let config = cli.scan_config(&AppSettings::default()).unwrap();

        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.start_port().as_u16(), 1);
        assert_eq!(config.end_port().as_u16(), 65535);
        assert_eq!(config.timeout(), Duration::from_millis(100));
        assert_eq!(config.batch_size(), 10);
        assert_eq!(config.interval(), Duration::from_secs(1));
        assert_eq!(config.verbosity(), Verbosity::Normal);
        assert_eq!(cli.output_format(&AppSettings::default()), OutputFormat::Plain);
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&[
            "example.com", "-s", "20", "-e", "25", "-t", "0.5", "-b", "3", "-i", "0", "-q",
        ]);
        let config = cli.scan_config(&AppSettings::default()).unwrap();

        assert_eq!(config.start_port().as_u16(), 20);
        assert_eq!(config.end_port().as_u16(), 25);
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert_eq!(config.batch_size(), 3);
        assert_eq!(config.interval(), Duration::ZERO);
        assert_eq!(config.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_long_flags() {
        let cli = parse(&[
            "::1",
            "--start_port",
            "8000",
            "--end_port",
            "8080",
            "--timeout",
            "1.5",
            "--batch",
            "100",
            "--interval",
            "0.25",
            "--verbose",
            "--output",
            "json",
        ]);
        let config = cli.scan_config(&AppSettings::default()).unwrap();

        assert_eq!(config.ports().len(), 81);
        assert_eq!(config.timeout(), Duration::from_millis(1500));
        assert_eq!(config.interval(), Duration::from_millis(250));
        assert_eq!(config.verbosity(), Verbosity::Verbose);
        assert_eq!(cli.output_format(&AppSettings::default()), OutputFormat::Json);
    }

    #[test]
    fn test_settings_fill_unset_values() {
        let settings = AppSettings {
            timeout_secs: 2.0,
            batch_size: 64,
            interval_secs: 0.0,
            verbosity: Verbosity::Quiet,
            output_format: OutputFormat::Csv,
        };
        let cli = parse(&["host", "-b", "8"]);
        let config = cli.scan_config(&settings).unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.batch_size(), 8);
        assert_eq!(config.interval(), Duration::ZERO);
        assert_eq!(config.verbosity(), Verbosity::Quiet);
        assert_eq!(cli.output_format(&settings), OutputFormat::Csv);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["sps", "host", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_rejected_by_parser() {
        assert!(Cli::try_parse_from(["sps", "host", "-s", "0"]).is_err());
        assert!(Cli::try_parse_from(["sps", "host", "-e", "65536"]).is_err());
        assert!(Cli::try_parse_from(["sps", "host", "-s", "http"]).is_err());
    }

    #[test]
    fn test_invalid_values_rejected_by_builder() {
        let settings = AppSettings::default();

        let cli = parse(&["host", "-s", "100", "-e", "10"]);
        assert!(matches!(
            cli.scan_config(&settings),
            Err(ConfigError::Port(PortError::InvalidRange(100, 10)))
        ));

        let cli = parse(&["host", "-t", "-1"]);
        assert!(matches!(
            cli.scan_config(&settings),
            Err(ConfigError::InvalidTimeout(_))
        ));

        let cli = parse(&["host", "-b", "0"]);
        assert!(matches!(
            cli.scan_config(&settings),
            Err(ConfigError::InvalidBatchSize(0))
        ));

        let cli = parse(&["host", "-i", "-0.5"]);
        assert!(matches!(
            cli.scan_config(&settings),
            Err(ConfigError::InvalidInterval(_))
        ));
    }

    #[test]
    fn test_host_is_required_when_arguments_given() {
        assert!(Cli::try_parse_from(["sps", "-v"]).is_err());
    }
}
