//! Scan command implementation.
//!
//! Resolves the host, runs the scan with console progress attached, and
//! prints the report. Shared by argument-driven and interactive mode.

use crate::cli::interrupt;
use crate::config::{ScanConfig, Verbosity};
use crate::error::{CliError, CliResult};
use crate::output::{self, ConsoleProgress, OutputFormat};
use crate::resolver::AddressResolver;
use crate::scanner::{run_scan, NoopObserver, ScanObserver, ScanReport};
use crate::types::ResolvedTarget;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// One fully configured scan, ready to execute.
#[derive(Debug, Clone)]
pub struct ScanCommand {
    pub config: ScanConfig,
    pub format: OutputFormat,
}

impl ScanCommand {
    pub fn new(config: ScanConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    /// Resolve, scan and print. Ctrl-C aborts the scan and discards anything
    /// collected so far.
    pub async fn execute(&self, resolver: &dyn AddressResolver) -> CliResult<ScanReport> {
        let target = resolver.resolve(self.config.host()).await?;
        self.execute_until(&target, interrupt::ctrl_c()).await
    }

    /// Scan an already resolved `target`, giving up as soon as `stop`
    /// completes.
    pub async fn execute_until<F>(&self, target: &ResolvedTarget, stop: F) -> CliResult<ScanReport>
    where
        F: Future<Output = ()>,
    {
        debug!(target = %target, family = %target.family, "target resolved");

        // Progress goes to stdout, so keep it out of machine-readable output.
        let show_progress =
            self.format == OutputFormat::Plain && self.config.verbosity() >= Verbosity::Normal;

        let observer: Arc<dyn ScanObserver> = if show_progress {
            output::print_scan_header(target, &self.config);
            Arc::new(ConsoleProgress::new(
                self.config.verbosity(),
                target,
                self.config.ports(),
            ))
        } else {
            Arc::new(NoopObserver)
        };

        let started = Instant::now();
        let report = tokio::select! {
            biased;
            () = stop => {
                return Err(CliError::Interrupted(started.elapsed()));
            }
            report = run_scan(&self.config, target, observer) => report?,
        };

        output::print_report(&report, self.format)?;
        Ok(report)
    }
}
