//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::config::{ScanConfig, Verbosity};
use crate::scanner::ScanReport;
use crate::services::service_label;
use crate::types::ResolvedTarget;
use console::style;
use std::io::{self, Write};

/// Write the result of a scan in human-readable form.
///
/// Quiet verbosity prints only the open-port list (or the "none found"
/// line); normal and verbose add a summary of what was scanned.
pub fn write_plain<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    let target = &report.target;
    let ports = report.config.ports();
    let result = &report.result;

    if report.config.verbosity() >= Verbosity::Normal {
        writeln!(
            out,
            "{} {} ports scanned in {:.4}s: {} open, {} closed",
            style("Statistics:").bold(),
            result.len(),
            report.duration.as_secs_f64(),
            style(result.open_count()).green().bold(),
            style(result.closed_count()).red(),
        )?;
    }

    let open = result.open_ports();
    if open.is_empty() {
        writeln!(
            out,
            "No open ports found on {} ({}) in range {}.",
            target.host, target.address, ports
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "Open ports on {} ({}) in range {}:",
        style(&target.host).bold(),
        target.address,
        ports
    )?;
    for port in open {
        writeln!(
            out,
            "{} ({})",
            style(port).green().bold(),
            service_label(port.as_u16())
        )?;
    }

    Ok(())
}

/// The line announcing a scan before it starts.
pub fn scan_header(target: &ResolvedTarget, config: &ScanConfig) -> String {
    format!(
        "Starting scan of {} ({}) {}...",
        target.host,
        target.address,
        config.ports()
    )
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(target: &ResolvedTarget, config: &ScanConfig) {
    println!(
        "{} {}",
        style("•").dim(),
        style(scan_header(target, config)).cyan()
    );
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;

    fn render(report: &ScanReport) -> String {
        let mut out = Vec::new();
        write_plain(&mut out, report).unwrap();
        console::strip_ansi_codes(&String::from_utf8(out).unwrap()).into_owned()
    }

    #[test]
    fn test_open_ports_listed_with_services() {
        let text = render(&fixtures::report(&[22, 25], Verbosity::Quiet));
        assert_eq!(
            text,
            "Open ports on localhost (127.0.0.1) in range [20-25]:\n22 (ssh)\n25 (smtp)\n"
        );
    }

    #[test]
    fn test_no_open_ports() {
        let text = render(&fixtures::report(&[], Verbosity::Quiet));
        assert_eq!(
            text,
            "No open ports found on localhost (127.0.0.1) in range [20-25].\n"
        );
    }

    #[test]
    fn test_normal_verbosity_adds_statistics() {
        let text = render(&fixtures::report(&[22], Verbosity::Normal));
        let first = text.lines().next().unwrap();
        assert_eq!(
            first,
            "Statistics: 6 ports scanned in 0.2500s: 1 open, 5 closed"
        );
        assert!(text.contains("22 (ssh)"));
    }

    #[test]
    fn test_scan_header() {
        let report = fixtures::report(&[], Verbosity::Normal);
        assert_eq!(
            scan_header(&report.target, &report.config),
            "Starting scan of localhost (127.0.0.1) [20-25]..."
        );
    }
}
