//! Rule engine - applies compiled rules to source units
//!
//! This is the main execution engine. Scanning is a pure mapping from a unit
//! to a copy of that unit with findings attached, so batches can be split
//! across threads freely.

use crate::{CompiledMatcher, FindingBuilder, Result};
use condscan_core::{Finding, IssueType, Unit};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, trace};

static GLOBAL_ENGINE: OnceLock<RuleEngine> = OnceLock::new();

/// The rule engine executes compiled rules against units
#[derive(Debug, Clone)]
pub struct RuleEngine {
    pub(crate) rules: Vec<CompiledRule>,
}

/// A compiled rule ready for execution
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) name: &'static str,
    pub(crate) matcher: CompiledMatcher,
}

impl RuleEngine {
    /// Compile the built-in rules
    ///
    /// DML matches are reported before declaration matches.
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: vec![
                CompiledRule {
                    name: "obsolete-table-dml",
                    matcher: CompiledMatcher::dml()?,
                },
                CompiledRule {
                    name: "obsolete-type-declaration",
                    matcher: CompiledMatcher::declaration()?,
                },
            ],
        })
    }

    /// Process-wide engine, compiled on first use
    pub fn global() -> &'static RuleEngine {
        GLOBAL_ENGINE.get_or_init(|| {
            // Built-in patterns are constants covered by unit tests.
            Self::new().expect("built-in rule patterns must compile")
        })
    }

    /// Names of the compiled rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name).collect()
    }

    /// Collect findings for one unit's code
    pub fn findings_for(&self, unit: &Unit) -> Vec<Finding> {
        let builder = FindingBuilder::new(unit);
        let mut findings = Vec::new();

        for rule in &self.rules {
            let kind = rule.matcher.kind();
            for raw in rule.matcher.find_all(&unit.code) {
                trace!(
                    "Rule '{}' matched {} at bytes {}..{} in {}/{}",
                    rule.name,
                    raw.identifier,
                    raw.start,
                    raw.end,
                    unit.pgm_name,
                    unit.inc_name
                );
                findings.push(builder.build(&raw, kind));
            }
        }

        findings
    }

    /// Scan one unit and return a copy with findings attached
    ///
    /// The input is left untouched. `findings` is `None` when nothing
    /// matched, never an empty list.
    pub fn scan_unit(&self, unit: &Unit) -> Unit {
        let findings = self.findings_for(unit);
        debug!(
            "Scanned {}/{} {} {}: {} finding(s)",
            unit.pgm_name,
            unit.inc_name,
            unit.block_type,
            unit.name,
            findings.len()
        );

        let mut scanned = unit.clone();
        scanned.findings = if findings.is_empty() {
            None
        } else {
            Some(findings)
        };
        scanned
    }

    /// Scan a batch and keep only units with findings, in input order
    pub fn scan_batch(&self, units: &[Unit]) -> Vec<Unit> {
        units
            .iter()
            .map(|unit| self.scan_unit(unit))
            .filter(Unit::has_findings)
            .collect()
    }
}

/// Statistics from a scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub units_scanned: usize,
    pub units_flagged: usize,
    pub findings_by_type: BTreeMap<&'static str, usize>,
}

impl ScanStats {
    /// Summarize scanned units against the number submitted
    pub fn from_units(units_scanned: usize, scanned: &[Unit]) -> Self {
        let mut findings_by_type = BTreeMap::new();
        for issue_type in IssueType::all() {
            findings_by_type.insert(issue_type.as_str(), 0);
        }

        for finding in scanned.iter().filter_map(|u| u.findings.as_ref()).flatten() {
            *findings_by_type
                .entry(finding.issues_type.as_str())
                .or_default() += 1;
        }

        Self {
            units_scanned,
            units_flagged: scanned.iter().filter(|u| u.has_findings()).count(),
            findings_by_type,
        }
    }

    pub fn total_findings(&self) -> usize {
        self.findings_by_type.values().sum()
    }
}
