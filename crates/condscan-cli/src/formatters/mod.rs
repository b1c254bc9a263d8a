//! Output formatters for scan results.

pub mod human;
pub mod json;

use crate::OutputFormat;
use condscan_core::Unit;
use condscan_rule_engine::ScanStats;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

/// Result of one `condscan scan` invocation
#[derive(Debug)]
pub struct ScanReport {
    /// Units to print. For batches only flagged units are kept.
    pub units: Vec<Unit>,
    pub stats: ScanStats,
    /// Input was a single unit object; output mirrors that shape
    pub single: bool,
}

impl ScanReport {
    pub fn single(unit: Unit) -> Self {
        let stats = ScanStats::from_units(1, std::slice::from_ref(&unit));
        Self {
            units: vec![unit],
            stats,
            single: true,
        }
    }

    pub fn batch(submitted: usize, flagged: Vec<Unit>) -> Self {
        let stats = ScanStats::from_units(submitted, &flagged);
        Self {
            units: flagged,
            stats,
            single: false,
        }
    }
}

/// Trait for formatting scan results
pub trait Formatter {
    /// Format and print the scan results
    fn format(&self, report: &ScanReport);
}

impl Formatter for HumanFormatter {
    fn format(&self, report: &ScanReport) {
        print!("{}", human::render(report));
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &ScanReport) {
        json::print_json(report);
    }
}

pub fn formatter_for(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
