//! Live console progress for a running scan.

use crate::config::Verbosity;
use crate::scanner::{BatchInfo, PortOutcome, ScanObserver};
use crate::types::{PortRange, ResolvedTarget};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Prints per-batch (and, when verbose, per-probe) lines while keeping a
/// progress bar of probed ports at the bottom of the terminal.
///
/// The bar is drawn on stderr and hides itself when stderr is not a
/// terminal; the lines go to stdout either way.
pub struct ConsoleProgress {
    verbosity: Verbosity,
    target: String,
    ports: PortRange,
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub fn new(verbosity: Verbosity, target: &ResolvedTarget, ports: PortRange) -> Self {
        let bar = ProgressBar::new(ports.len() as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .map(|s| s.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);

        Self {
            verbosity,
            target: target.to_string(),
            ports,
            bar,
        }
    }

    fn line(&self, text: String) {
        self.bar.suspend(|| println!("{text}"));
    }
}

impl ScanObserver for ConsoleProgress {
    fn batch_started(&self, batch: &BatchInfo) {
        if self.verbosity >= Verbosity::Normal {
            self.line(batch_started_line(batch));
        }
    }

    fn probe_finished(&self, outcome: &PortOutcome, elapsed: Duration) {
        if self.verbosity >= Verbosity::Verbose {
            self.line(probe_finished_line(outcome, elapsed));
        }
        if outcome.is_open() {
            self.bar.set_message(format!("found open port {}", outcome.port));
        }
        self.bar.inc(1);
    }

    fn batch_finished(&self, batch: &BatchInfo, elapsed: Duration) {
        if self.verbosity >= Verbosity::Normal {
            self.line(batch_finished_line(batch, elapsed));
        }
    }

    fn scan_finished(&self, elapsed: Duration) {
        self.bar.finish_and_clear();
        if self.verbosity >= Verbosity::Normal {
            println!(
                "Scan of {} {} finished in {:.4}s",
                self.target,
                self.ports,
                elapsed.as_secs_f64()
            );
        }
    }
}

fn batch_started_line(batch: &BatchInfo) -> String {
    format!(
        "Scanning batch {}/{}, ports {}-{}...",
        batch.number(),
        batch.count,
        batch.ports.start(),
        batch.ports.end()
    )
}

fn batch_finished_line(batch: &BatchInfo, elapsed: Duration) -> String {
    format!(
        "Batch {}/{} scan finished in {:.4}s.",
        batch.number(),
        batch.count,
        elapsed.as_secs_f64()
    )
}

fn probe_finished_line(outcome: &PortOutcome, elapsed: Duration) -> String {
    format!(
        "Finished scanning port {} in {:.4}s - {}",
        outcome.port,
        elapsed.as_secs_f64(),
        outcome.state
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::port;

    fn batch(index: usize, count: usize, start: u16, end: u16) -> BatchInfo {
        BatchInfo {
            index,
            count,
            ports: PortRange::new(port(start), port(end)).unwrap(),
        }
    }

    #[test]
    fn test_batch_lines() {
        let b = batch(0, 2, 20, 22);
        assert_eq!(batch_started_line(&b), "Scanning batch 1/2, ports 20-22...");
        assert_eq!(
            batch_finished_line(&b, Duration::from_millis(105)),
            "Batch 1/2 scan finished in 0.1050s."
        );
    }

    #[test]
    fn test_probe_line() {
        let outcome = PortOutcome::open(port(22));
        assert_eq!(
            probe_finished_line(&outcome, Duration::from_millis(3)),
            "Finished scanning port 22 in 0.0030s - OPEN"
        );
    }

    #[test]
    fn test_observer_counts_probes() {
        let target = ResolvedTarget::new("localhost", "127.0.0.1".parse().unwrap());
        let ports = PortRange::new(port(20), port(22)).unwrap();
        let progress = ConsoleProgress::new(Verbosity::Quiet, &target, ports);

        progress.probe_finished(&PortOutcome::closed(port(20)), Duration::ZERO);
        progress.probe_finished(&PortOutcome::open(port(21)), Duration::ZERO);

        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.message(), "found open port 21");
    }
}
