//! CSV output formatting.

use crate::scanner::ScanReport;
use crate::services::service_label;
use std::io::{self, Write};

/// Write one CSV row per scanned port.
pub fn write_csv<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["port", "state", "service"])?;
    for outcome in &report.result {
        wtr.write_record([
            outcome.port.to_string().as_str(),
            if outcome.is_open() { "open" } else { "closed" },
            service_label(outcome.port.as_u16()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Verbosity;
    use crate::output::fixtures;

    #[test]
    fn test_csv_rows() {
        let report = fixtures::report(&[22], Verbosity::Normal);
        let mut out = Vec::new();
        write_csv(&mut out, &report).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "port,state,service");
        assert_eq!(lines[1], "20,closed,ftp-data");
        assert_eq!(lines[3], "22,open,ssh");
        assert_eq!(lines[6], "25,closed,smtp");
    }
}
