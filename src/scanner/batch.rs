//! Batched, paced scan scheduling.
//!
//! The port range is cut into consecutive batches. All probes of a batch run
//! concurrently; the next batch starts only after every probe of the current
//! one has finished and the configured interval has passed. Batches follow
//! port order and outcomes are kept in launch order, so the collected result
//! is sorted without a final sort.

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::scanner::collector::{ResultCollector, ScanResult};
use crate::scanner::traits::{BatchInfo, NoopObserver, PortOutcome, Prober, ScanObserver};
use crate::types::{PortRange, ResolvedTarget};
use futures::stream::{self, StreamExt};
use std::net::IpAddr;
use std::sync::Arc;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// A contiguous run of ports probed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// Zero-based position in the scan.
    pub index: usize,
    /// Ports covered by this batch.
    pub ports: PortRange,
}

impl Batch {
    fn info(&self, count: usize) -> BatchInfo {
        BatchInfo {
            index: self.index,
            count,
            ports: self.ports,
        }
    }
}

/// Split `range` into consecutive batches of at most `batch_size` ports.
///
/// Yields `ceil(range.len() / batch_size)` batches; only the last one may be
/// short.
pub fn plan_batches(range: PortRange, batch_size: usize) -> Vec<Batch> {
    range
        .chunks(batch_size)
        .enumerate()
        .map(|(index, ports)| Batch { index, ports })
        .collect()
}

/// Drives a [`Prober`] over a port range, one batch at a time.
pub struct BatchScheduler<P> {
    prober: P,
    observer: Arc<dyn ScanObserver>,
}

impl<P: Prober> BatchScheduler<P> {
    pub fn new(prober: P) -> Self {
        Self {
            prober,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Attach an observer that is notified of scan progress.
    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Scan every port in `config` against `target`.
    ///
    /// Probe failures never surface here; the only error is a broken
    /// collection invariant.
    pub async fn run(
        &self,
        config: &ScanConfig,
        target: &ResolvedTarget,
    ) -> Result<ScanResult, ScanError> {
        let started = Instant::now();
        let batches = plan_batches(config.ports(), config.batch_size());
        let count = batches.len();

        debug!(
            target = %target,
            ports = %config.ports(),
            batches = count,
            batch_size = config.batch_size(),
            interval_ms = config.interval().as_millis() as u64,
            "starting scan"
        );
        self.observer.scan_started(config.ports(), count);

        let mut collector = ResultCollector::new(config.ports());
        for batch in &batches {
            let info = batch.info(count);
            let batch_started = Instant::now();

            self.observer.batch_started(&info);
            let outcomes = self.probe_batch(target.address, batch.ports).await;
            collector.extend(outcomes);

            let elapsed = batch_started.elapsed();
            debug!(
                batch = info.number(),
                of = count,
                ports = %info.ports,
                elapsed_ms = elapsed.as_millis() as u64,
                "batch finished"
            );
            self.observer.batch_finished(&info, elapsed);

            if !info.is_last() && !config.interval().is_zero() {
                sleep(config.interval()).await;
            }
        }

        let elapsed = started.elapsed();
        self.observer.scan_finished(elapsed);
        let result = collector.finish()?;
        debug!(
            open = result.open_count(),
            elapsed_ms = elapsed.as_millis() as u64,
            "scan finished"
        );
        Ok(result)
    }

    /// Probe all `ports` concurrently and return outcomes in `ports` order.
    async fn probe_batch(&self, address: IpAddr, ports: PortRange) -> Vec<PortOutcome> {
        stream::iter(ports.iter())
            .map(|port| async move {
                let started = Instant::now();
                let outcome = self.prober.probe(address, port).await;
                self.observer.probe_finished(&outcome, started.elapsed());
                outcome
            })
            .buffered(ports.len())
            .collect()
            .await
    }
}
