//! Core data types for Condscan.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Kind of obsolete usage a finding reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    /// A DML statement (SELECT/INSERT/UPDATE/DELETE) reads or writes the obsolete table
    ObsoleteTableUsage,
    /// A DATA/TYPES/FIELD-SYMBOLS/CONSTANTS declaration is typed with an obsolete table or type
    ObsoleteTypeDeclaration,
}

impl IssueType {
    /// Returns all issue types in reporting order
    pub fn all() -> &'static [IssueType] {
        &[IssueType::ObsoleteTableUsage, IssueType::ObsoleteTypeDeclaration]
    }

    /// Returns the wire name of this issue type
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::ObsoleteTableUsage => "ObsoleteTableUsage",
            IssueType::ObsoleteTypeDeclaration => "ObsoleteTypeDeclaration",
        }
    }

    /// Returns the display name for human output
    pub fn display_name(&self) -> &'static str {
        match self {
            IssueType::ObsoleteTableUsage => "Obsolete table usage",
            IssueType::ObsoleteTypeDeclaration => "Obsolete type declaration",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a finding.
///
/// Every obsolete usage is a hard violation, so there is no warning tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A contiguous block of source code submitted for scanning.
///
/// `start_line`/`end_line` locate the block inside its enclosing include and
/// serve as the base for absolute line numbers in findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Owning program name
    pub pgm_name: String,

    /// Owning include name
    pub inc_name: String,

    /// Block type (FORM, METHOD, FUNCTION, ...)
    #[serde(rename = "type")]
    pub block_type: String,

    /// Block name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// First line of the block within its include
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_line: i64,

    /// Last line of the block within its include
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_line: i64,

    /// Raw source text of the block
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,

    /// Findings attached by a scan; `None` means no issues
    #[serde(default)]
    pub findings: Option<Vec<Finding>>,
}

impl Unit {
    /// Create a unit with the four identity fields and empty code
    pub fn new(
        pgm_name: impl Into<String>,
        inc_name: impl Into<String>,
        block_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            pgm_name: pgm_name.into(),
            inc_name: inc_name.into(),
            block_type: block_type.into(),
            name: name.into(),
            start_line: 0,
            end_line: 0,
            code: String::new(),
            findings: None,
        }
    }

    /// Set the line range of the block
    pub fn with_lines(mut self, start_line: i64, end_line: i64) -> Self {
        self.start_line = start_line;
        self.end_line = end_line;
        self
    }

    /// Set the source text of the block
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// True when a scan attached at least one finding
    pub fn has_findings(&self) -> bool {
        self.findings.as_ref().is_some_and(|f| !f.is_empty())
    }

    /// Number of attached findings
    pub fn finding_count(&self) -> usize {
        self.findings.as_ref().map_or(0, Vec::len)
    }

    /// Decode a JSON array of units
    pub fn parse_batch(json: &str, context: &str) -> Result<Vec<Unit>> {
        serde_json::from_str(json).map_err(|e| Error::json(context, e))
    }

    /// Decode a single JSON unit
    pub fn parse_single(json: &str, context: &str) -> Result<Unit> {
        serde_json::from_str(json).map_err(|e| Error::json(context, e))
    }
}

/// One detected usage of an obsolete artifact.
///
/// Identity fields are copied from the owning unit so a finding can be
/// reported on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub prog_name: String,
    pub incl_name: String,
    pub types: String,
    pub blockname: String,

    /// Absolute line of the match within the include
    pub starting_line: i64,

    /// Absolute line after the last snippet line
    pub ending_line: i64,

    pub issues_type: IssueType,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,

    /// Full source line(s) around the match, newlines escaped as `\n`
    pub snippet: String,
}

impl Finding {
    /// Short location string for human output
    pub fn location(&self) -> String {
        format!(
            "{}/{}:{}-{}",
            self.prog_name, self.incl_name, self.starting_line, self.ending_line
        )
    }
}

/// Decode an optional field, treating an explicit `null` like a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
