//! JSON formatter for scan results.
//!
//! Emits the same shape the HTTP service returns: an array of flagged units
//! for batches, a single unit object otherwise.

use super::ScanReport;

pub struct JsonFormatter;

pub fn to_json(report: &ScanReport) -> serde_json::Result<String> {
    match (report.single, report.units.first()) {
        (true, Some(unit)) => serde_json::to_string_pretty(unit),
        _ => serde_json::to_string_pretty(&report.units),
    }
}

pub fn print_json(report: &ScanReport) {
    match to_json(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results: {}", e),
    }
}
