//! Rule identity and pattern-matching limits
//!
//! The limits bound the cost of scanning arbitrary, possibly malformed
//! source text:
//! - Regex compilation size (ReDoS / memory exhaustion)
//! - Lookahead distance for multi-line DML statements

/// Deprecation advisory implemented by this rule set
pub const RULE_ID: &str = "2220005";

/// Version reported by the liveness probe
pub const RULE_VERSION: &str = "2.0";

/// Human-readable rule title
pub const RULE_TITLE: &str = "Rule 2220005 - Obsolete KONV/Condition Technique Scanner";

/// Maximum characters between a DML keyword sequence and the table name (1000 characters)
///
/// DML statements span many lines with column lists and joins, so the
/// table reference is searched across lines, but never further than this.
/// Measured in characters, not bytes.
pub const DML_LOOKAHEAD_LIMIT: usize = 1000;

/// Maximum regex pattern length (500 characters)
pub const MAX_REGEX_LENGTH: usize = 500;

/// Compiled regex size limit (10MB)
///
/// Applied during regex compilation via RegexBuilder.
pub const REGEX_SIZE_LIMIT: usize = 10_000_000; // 10MB

/// Regex DFA size limit (2MB)
///
/// Limits the lazy DFA cache used while matching.
pub const REGEX_DFA_SIZE_LIMIT: usize = 2_000_000; // 2MB
