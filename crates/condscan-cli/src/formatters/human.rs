//! Human-readable formatter for scan results.

use super::ScanReport;
use colored::*;
use condscan_core::{Finding, Unit};
use condscan_rule_engine::{RULE_ID, RULE_TITLE};
use std::fmt::Write;

pub struct HumanFormatter;

pub fn render(report: &ScanReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", format!("Condscan Results (SAP Note {RULE_ID})").bold());
    let _ = writeln!(out, "{}\n", RULE_TITLE.dimmed());

    let flagged: Vec<&Unit> = report.units.iter().filter(|u| u.has_findings()).collect();
    if flagged.is_empty() {
        let _ = writeln!(out, "{} No obsolete condition tables found", "✓".green());
    }

    for unit in flagged {
        render_unit(&mut out, unit);
    }

    let stats = &report.stats;
    let _ = writeln!(out, "{}", "Summary:".bold());
    let _ = writeln!(out, "  Units scanned: {}", stats.units_scanned);
    let _ = writeln!(out, "  Units flagged: {}", stats.units_flagged);
    let _ = writeln!(out, "  Total findings: {}", stats.total_findings());
    for (issue_type, count) in &stats.findings_by_type {
        if *count > 0 {
            let _ = writeln!(out, "    {}: {}", issue_type, count);
        }
    }

    out
}

fn render_unit(out: &mut String, unit: &Unit) {
    let _ = writeln!(
        out,
        "{} {} {} (lines {}-{})",
        format!("{}/{}", unit.pgm_name, unit.inc_name).cyan(),
        unit.block_type,
        unit.name.bold(),
        unit.start_line,
        unit.end_line
    );

    for finding in unit.findings.iter().flatten() {
        render_finding(out, finding);
    }
    let _ = writeln!(out);
}

fn render_finding(out: &mut String, finding: &Finding) {
    let _ = writeln!(
        out,
        "  {} {}-{}: {}",
        format!("{}[{}]", finding.severity, finding.issues_type).red().bold(),
        finding.starting_line,
        finding.ending_line,
        finding.message
    );
    let _ = writeln!(out, "    {} {}", "suggestion:".yellow(), finding.suggestion);
    let _ = writeln!(out, "    {} {}", "snippet:".dimmed(), finding.snippet);
}

#[cfg(test)]
mod tests {
    use super::*;
    use condscan_rule_engine::RuleEngine;

    fn plain(report: &ScanReport) -> String {
        colored::control::set_override(false);
        render(report)
    }

    #[test]
    fn test_clean_report() {
        let output = plain(&ScanReport::batch(2, vec![]));
        assert!(output.contains("No obsolete condition tables found"));
        assert!(output.contains("Units scanned: 2"));
        assert!(output.contains("Total findings: 0"));
    }

    #[test]
    fn test_finding_lines() {
        let unit = Unit::new("ZSD", "ZSD_F01", "FORM", "READ")
            .with_lines(100, 104)
            .with_code("FORM read.\n  DATA lv TYPE i.\n  UPDATE konv SET a = b.\nENDFORM.");
        let scanned = RuleEngine::global().scan_batch(&[unit]);
        let output = plain(&ScanReport::batch(1, scanned));

        assert!(output.contains("ZSD/ZSD_F01 FORM READ (lines 100-104)"));
        assert!(output.contains("error[ObsoleteTableUsage] 103-104:"));
        assert!(output.contains("snippet:   UPDATE konv SET a = b."));
        assert!(output.contains("ObsoleteTableUsage: 1"));
    }

    #[test]
    fn test_single_clean_unit_is_not_listed() {
        let unit = Unit::new("Z", "Z", "FORM", "CLEAN").with_code("WRITE 1.");
        let output = plain(&ScanReport::single(unit));
        assert!(!output.contains("CLEAN"));
        assert!(output.contains("Units scanned: 1"));
    }
}
