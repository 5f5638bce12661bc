//! JSON output formatting.

use crate::scanner::{PortOutcome, ScanReport};
use crate::types::{AddressFamily, Port};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};
use std::net::IpAddr;

#[derive(Serialize)]
struct JsonReport<'a> {
    host: &'a str,
    address: IpAddr,
    family: AddressFamily,
    start_port: Port,
    end_port: Port,
    timeout_secs: f64,
    batch_size: usize,
    interval_secs: f64,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    duration_secs: f64,
    open_ports: Vec<Port>,
    outcomes: &'a [PortOutcome],
}

impl<'a> From<&'a ScanReport> for JsonReport<'a> {
    fn from(report: &'a ScanReport) -> Self {
        Self {
            host: &report.target.host,
            address: report.target.address,
            family: report.target.family,
            start_port: report.config.start_port(),
            end_port: report.config.end_port(),
            timeout_secs: report.config.timeout().as_secs_f64(),
            batch_size: report.config.batch_size(),
            interval_secs: report.config.interval().as_secs_f64(),
            started_at: report.started_at,
            finished_at: report.finished_at,
            duration_secs: report.duration.as_secs_f64(),
            open_ports: report.result.open_ports(),
            outcomes: report.result.outcomes(),
        }
    }
}

/// Write results as a pretty-printed JSON document.
pub fn write_json<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &JsonReport::from(report))?;
    writeln!(out)
}
