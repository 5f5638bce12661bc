//! Scanner module - batched TCP connect scanning.
//!
//! [`BatchScheduler`] walks the port range batch by batch, running each
//! batch's [`Prober`] calls concurrently on the tokio runtime and pausing
//! between batches. [`run_scan`] wires it to the real TCP prober and stamps
//! the result with timing information for reporting.

pub mod batch;
pub mod collector;
pub mod tcp;
pub mod traits;

pub use batch::{plan_batches, Batch, BatchScheduler};
pub use collector::{ResultCollector, ScanResult};
pub use tcp::TcpConnectProber;
pub use traits::{BatchInfo, NoopObserver, PortOutcome, PortState, Prober, ScanObserver};

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::types::ResolvedTarget;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A finished scan together with everything the reporter needs to describe
/// it.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub config: ScanConfig,
    pub target: ResolvedTarget,
    pub result: ScanResult,
    /// Wall-clock time the first batch was scheduled.
    pub started_at: DateTime<Utc>,
    /// Wall-clock time the last batch was collected.
    pub finished_at: DateTime<Utc>,
    /// Total scan duration, pacing included.
    pub duration: Duration,
}

/// Scan `target` over TCP as described by `config`.
pub async fn run_scan(
    config: &ScanConfig,
    target: &ResolvedTarget,
    observer: Arc<dyn ScanObserver>,
) -> Result<ScanReport, ScanError> {
    let started_at = Utc::now();
    let clock = Instant::now();

    let scheduler =
        BatchScheduler::new(TcpConnectProber::new(config.timeout())).with_observer(observer);
    let result = scheduler.run(config, target).await?;

    Ok(ScanReport {
        config: config.clone(),
        target: target.clone(),
        result,
        started_at,
        finished_at: Utc::now(),
        duration: clock.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_run_scan_finds_listener() {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let config = ScanConfig::builder("127.0.0.1")
            .with_start_port(port)
            .with_end_port(port)
            .with_timeout_secs(1.0)
            .with_interval_secs(0.0)
            .build()
            .unwrap();
        let target = ResolvedTarget::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST));

        let report = run_scan(&config, &target, Arc::new(NoopObserver)).await.unwrap();

        assert_eq!(report.result.open_ports(), vec![Port::new(port).unwrap()]);
        assert!(report.finished_at >= report.started_at);
        assert_eq!(report.target, target);
    }

    #[tokio::test]
    async fn test_run_scan_released_port_is_closed() {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ScanConfig::builder("127.0.0.1")
            .with_start_port(port)
            .with_end_port(port)
            .with_timeout_secs(0.2)
            .build()
            .unwrap();
        let target = ResolvedTarget::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST));

        let report = run_scan(&config, &target, Arc::new(NoopObserver)).await.unwrap();

        assert_eq!(report.result.len(), 1);
        assert_eq!(report.result.open_count(), 0);
    }

    #[tokio::test]
    async fn test_run_scan_only_listener_is_open_across_batches() {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let start = port.saturating_sub(2).max(Port::MIN);
        let end = port.saturating_add(2);

        let config = ScanConfig::builder("127.0.0.1")
            .with_start_port(start)
            .with_end_port(end)
            .with_timeout_secs(1.0)
            .with_batch_size(3)
            .with_interval_secs(0.0)
            .build()
            .unwrap();
        let target = ResolvedTarget::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST));

        let report = run_scan(&config, &target, Arc::new(NoopObserver)).await.unwrap();

        assert_eq!(report.result.len(), usize::from(end - start) + 1);
        for outcome in &report.result {
            let expected = if outcome.port.as_u16() == port {
                PortState::Open
            } else {
                PortState::Closed
            };
            assert_eq!(outcome.state, expected, "port {}", outcome.port);
        }
    }
}
