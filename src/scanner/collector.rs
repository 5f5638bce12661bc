//! Accumulation of per-port outcomes into a finished [`ScanResult`].

use crate::error::ScanError;
use crate::scanner::traits::{PortOutcome, PortState};
use crate::types::{Port, PortRange};
use serde::Serialize;

/// Append-only store of outcomes for one scan.
///
/// Outcomes must arrive in ascending port order; the scheduler guarantees
/// this by collecting batches in order. Nothing can be read back until
/// [`finish`](Self::finish) checks that every port was covered exactly once.
#[derive(Debug)]
pub struct ResultCollector {
    range: PortRange,
    outcomes: Vec<PortOutcome>,
}

impl ResultCollector {
    pub fn new(range: PortRange) -> Self {
        Self {
            range,
            outcomes: Vec::with_capacity(range.len()),
        }
    }

    pub fn push(&mut self, outcome: PortOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of outcomes collected so far.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Seal the collector, verifying one outcome per port in ascending order.
    pub fn finish(self) -> Result<ScanResult, ScanError> {
        let expected = self.range.len();
        if self.outcomes.len() != expected {
            return Err(ScanError::CountMismatch {
                expected,
                collected: self.outcomes.len(),
            });
        }

        let first = self.outcomes[0].port;
        if first != self.range.start() {
            return Err(ScanError::WrongStart {
                expected: self.range.start().as_u16(),
                found: first.as_u16(),
            });
        }

        // Strictly ascending + correct start + correct count means no gaps.
        if let Some(pair) = self.outcomes.windows(2).find(|w| w[0].port >= w[1].port) {
            return Err(ScanError::OutOfOrder {
                port: pair[1].port.as_u16(),
            });
        }

        Ok(ScanResult {
            range: self.range,
            outcomes: self.outcomes,
        })
    }
}

impl Extend<PortOutcome> for ResultCollector {
    fn extend<I: IntoIterator<Item = PortOutcome>>(&mut self, iter: I) {
        self.outcomes.extend(iter);
    }
}

/// Every port's outcome for a completed scan, in ascending port order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    range: PortRange,
    outcomes: Vec<PortOutcome>,
}

impl ScanResult {
    /// Range that was scanned.
    pub fn range(&self) -> PortRange {
        self.range
    }

    pub fn outcomes(&self) -> &[PortOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// A finished result always covers at least one port.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PortOutcome> {
        self.outcomes.iter()
    }

    /// Ports found open, ascending.
    pub fn open_ports(&self) -> Vec<Port> {
        self.outcomes
            .iter()
            .filter(|o| o.is_open())
            .map(|o| o.port)
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_open()).count()
    }

    pub fn closed_count(&self) -> usize {
        self.len() - self.open_count()
    }

    /// State recorded for `port`, or `None` if it was outside the range.
    pub fn state_of(&self, port: Port) -> Option<PortState> {
        if !self.range.contains(port) {
            return None;
        }
        let index = (port.as_u16() - self.range.start().as_u16()) as usize;
        self.outcomes.get(index).map(|o| o.state)
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a PortOutcome;
    type IntoIter = std::slice::Iter<'a, PortOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
