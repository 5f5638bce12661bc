//! Scanner trait abstractions.
//!
//! [`Prober`] is the seam between the batch scheduler and the network, so the
//! scheduler can be driven by a fake in tests. [`ScanObserver`] lets a front
//! end watch a scan without being able to influence it.

use crate::types::{Port, PortRange};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// State of a scanned port.
///
/// There is no `Filtered`: a connect probe cannot tell a dropped SYN from a
/// slow host, so anything short of a completed handshake is `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    /// A TCP connection completed within the timeout.
    Open,
    /// Refused, failed, unreachable, or timed out.
    Closed,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Outcome of probing a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortOutcome {
    pub port: Port,
    pub state: PortState,
}

impl PortOutcome {
    pub fn new(port: Port, state: PortState) -> Self {
        Self { port, state }
    }

    pub fn open(port: Port) -> Self {
        Self::new(port, PortState::Open)
    }

    pub fn closed(port: Port) -> Self {
        Self::new(port, PortState::Closed)
    }

    pub fn is_open(&self) -> bool {
        self.state == PortState::Open
    }
}

/// A single-attempt port probe.
///
/// Implementations must never fail: every error is folded into
/// [`PortState::Closed`].
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe `port` on `address` once and classify it.
    async fn probe(&self, address: IpAddr, port: Port) -> PortOutcome;

    /// Deadline applied to each probe.
    fn timeout(&self) -> Duration;
}

/// One batch as seen by an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchInfo {
    /// Zero-based position of this batch.
    pub index: usize,
    /// Total number of batches in the scan.
    pub count: usize,
    /// Ports covered by this batch.
    pub ports: PortRange,
}

impl BatchInfo {
    /// One-based batch number for display.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn is_last(&self) -> bool {
        self.number() == self.count
    }
}

/// Hooks called by the scheduler as a scan progresses.
///
/// All methods default to doing nothing. Observers are called from the
/// scheduling task and must return quickly.
pub trait ScanObserver: Send + Sync {
    /// Called once before the first batch starts.
    fn scan_started(&self, _ports: PortRange, _batch_count: usize) {}

    /// Called before the probes of a batch are launched.
    fn batch_started(&self, _batch: &BatchInfo) {}

    /// Called as each probe finishes, in completion order.
    fn probe_finished(&self, _outcome: &PortOutcome, _elapsed: Duration) {}

    /// Called after a batch's outcomes have been collected, before pacing.
    fn batch_finished(&self, _batch: &BatchInfo, _elapsed: Duration) {}

    /// Called once after the last batch is collected.
    fn scan_finished(&self, _elapsed: Duration) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}
