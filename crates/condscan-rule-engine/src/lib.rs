//! Condscan Rule Engine - detection of obsolete pricing-condition artifacts
//!
//! This crate implements rule 2220005: the KONV condition table and the
//! DZAEHK/DZAEKO counter types were replaced by PRCD_ELEMENTS and the
//! VFPRC_* types. Source units are scanned with two independent patterns
//! and every match becomes a [`Finding`](condscan_core::Finding).
//!
//! # Architecture
//!
//! - **Built-in mappings**: obsolete identifier → replacement, read-only statics
//! - **Compiled Matching**: both regex patterns compiled once per engine
//! - **Finding Builder**: match offsets → absolute lines, snippet, message
//!
//! # Example
//!
//! ```
//! use condscan_core::{IssueType, Unit};
//! use condscan_rule_engine::RuleEngine;
//!
//! let unit = Unit::new("ZPRICING", "ZPRICING_F01", "FORM", "READ_CONDITIONS")
//!     .with_lines(100, 110)
//!     .with_code("SELECT * FROM konv INTO TABLE lt_konv WHERE knumv = lv_knumv.");
//!
//! let scanned = RuleEngine::global().scan_unit(&unit);
//! let findings = scanned.findings.expect("KONV usage is reported");
//! assert_eq!(findings[0].issues_type, IssueType::ObsoleteTableUsage);
//! assert_eq!(findings[0].starting_line, 101);
//! ```

pub mod built_in;
pub mod constants;
pub mod engine;
pub mod finding;
pub mod matcher;

// Re-export core types
pub use built_in::{table_replacement, type_replacement, ObsoleteKind};
pub use constants::*;
pub use engine::{RuleEngine, ScanStats};
pub use finding::FindingBuilder;
pub use matcher::{CompiledMatcher, RawMatch};

/// Result type for rule operations
pub type Result<T> = std::result::Result<T, RuleError>;

/// Error types for rule engine
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}
