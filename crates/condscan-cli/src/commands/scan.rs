use crate::formatters::{formatter_for, ScanReport};
use crate::OutputFormat;
use anyhow::{Context, Result};
use condscan_core::Unit;
use condscan_rule_engine::RuleEngine;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Scan units from `input` and print the report.
///
/// Returns `true` when at least one finding was reported.
pub fn run_scan(input: &Path, single: bool, format: OutputFormat) -> Result<bool> {
    let (json, source) = read_input(input)?;
    let report = scan_json(&json, &source, single)?;

    info!(
        units = report.stats.units_scanned,
        flagged = report.stats.units_flagged,
        findings = report.stats.total_findings(),
        "Scanned {}",
        source
    );

    formatter_for(format).format(&report);
    Ok(report.stats.total_findings() > 0)
}

fn scan_json(json: &str, source: &str, single: bool) -> Result<ScanReport> {
    let engine = RuleEngine::global();
    if single {
        let unit = Unit::parse_single(json, source)?;
        Ok(ScanReport::single(engine.scan_unit(&unit)))
    } else {
        let units = Unit::parse_batch(json, source)?;
        Ok(ScanReport::batch(units.len(), engine.scan_batch(&units)))
    }
}

fn read_input(input: &Path) -> Result<(String, String)> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read units from stdin")?;
        return Ok((buf, "<stdin>".to_string()));
    }

    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    Ok((json, input.display().to_string()))
}
