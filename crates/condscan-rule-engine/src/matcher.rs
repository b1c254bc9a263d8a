//! Compiled pattern matchers for obsolete-artifact detection
//!
//! Each matcher locates every non-overlapping occurrence of its pattern in a
//! block of source text, in source order. Regex patterns are compiled once
//! per matcher and reused for every unit.

use crate::built_in::{
    ObsoleteKind, DECLARATION_PATTERN, DML_OPENER_PATTERN, DML_SELECT_FROM_PATTERN,
    DML_TABLE_PATTERN,
};
use crate::constants::{
    DML_LOOKAHEAD_LIMIT, MAX_REGEX_LENGTH, REGEX_DFA_SIZE_LIMIT, REGEX_SIZE_LIMIT,
};
use crate::{Result, RuleError};
use regex::{Regex, RegexBuilder};

/// Compile a built-in pattern under the crate's length and size limits
pub(crate) fn compile_regex_safe(pattern: &str) -> Result<Regex> {
    if pattern.len() > MAX_REGEX_LENGTH {
        return Err(RuleError::InvalidPattern(format!(
            "Pattern exceeds maximum length of {} characters",
            MAX_REGEX_LENGTH
        )));
    }

    let regex = RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .dfa_size_limit(REGEX_DFA_SIZE_LIMIT)
        .build()?;
    Ok(regex)
}

/// A located match: byte span in the scanned text plus the obsolete identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Byte offset where the match starts
    pub start: usize,
    /// Byte offset just past the match
    pub end: usize,
    /// Matched obsolete identifier, upper-cased
    pub identifier: String,
}

/// A compiled matcher ready for fast execution
#[derive(Debug, Clone)]
pub enum CompiledMatcher {
    /// DML statement (SELECT ... FROM, INSERT INTO, UPDATE, DELETE FROM)
    /// followed within the lookahead window by the obsolete table
    Dml {
        opener: Regex,
        select_from: Regex,
        table: Regex,
        lookahead: usize,
    },
    /// DATA/TYPES/FIELD-SYMBOLS/CONSTANTS declaration with a TYPE/LIKE clause
    /// naming an obsolete table or line type
    Declaration { declaration: Regex },
}

impl CompiledMatcher {
    /// Compile the DML matcher with the default lookahead window
    pub fn dml() -> Result<Self> {
        Self::dml_with_lookahead(DML_LOOKAHEAD_LIMIT)
    }

    /// Compile the DML matcher with a custom lookahead window (in characters)
    pub fn dml_with_lookahead(lookahead: usize) -> Result<Self> {
        Ok(CompiledMatcher::Dml {
            opener: compile_regex_safe(DML_OPENER_PATTERN)?,
            select_from: compile_regex_safe(DML_SELECT_FROM_PATTERN)?,
            table: compile_regex_safe(DML_TABLE_PATTERN)?,
            lookahead,
        })
    }

    /// Compile the declaration matcher
    pub fn declaration() -> Result<Self> {
        Ok(CompiledMatcher::Declaration {
            declaration: compile_regex_safe(DECLARATION_PATTERN)?,
        })
    }

    /// Mapping table used to resolve this matcher's identifiers
    pub fn kind(&self) -> ObsoleteKind {
        match self {
            CompiledMatcher::Dml { .. } => ObsoleteKind::Table,
            CompiledMatcher::Declaration { .. } => ObsoleteKind::Type,
        }
    }

    /// Find all non-overlapping matches in `text`, in source order
    pub fn find_all(&self, text: &str) -> Vec<RawMatch> {
        match self {
            CompiledMatcher::Dml {
                opener,
                select_from,
                table,
                lookahead,
            } => find_dml(opener, select_from, table, *lookahead, text),
            CompiledMatcher::Declaration { declaration } => declaration
                .captures_iter(text)
                .filter_map(|caps| {
                    let whole = caps.get(0)?;
                    let dtype = caps.name("dtype")?;
                    Some(RawMatch {
                        start: whole.start(),
                        end: whole.end(),
                        identifier: dtype.as_str().to_uppercase(),
                    })
                })
                .collect(),
        }
    }
}

/// Leftmost-first scan for DML statements touching the obsolete table.
///
/// Candidate openers are tried in source order. A `SELECT` opener extends
/// lazily to each following `FROM` in turn until one of them has the table
/// within the lookahead window. After a match the scan resumes at its end;
/// after a failed candidate it resumes one character later.
fn find_dml(
    opener: &Regex,
    select_from: &Regex,
    table: &Regex,
    lookahead: usize,
    text: &str,
) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(caps) = opener.captures_at(text, pos) else {
            break;
        };
        let Some(open) = caps.get(0) else {
            break;
        };

        let target = if caps.name("select").is_some() {
            select_target(select_from, table, lookahead, text, open.end())
        } else {
            window_target(table, lookahead, text, open.end())
        };

        match target {
            Some(target) => {
                matches.push(RawMatch {
                    start: open.start(),
                    end: target.end(),
                    identifier: target.as_str().to_uppercase(),
                });
                pos = target.end();
            }
            None => pos = open.start() + char_len_at(text, open.start()),
        }
    }

    matches
}

/// Try every `FROM` after a `SELECT` (at least one character later) in order.
fn select_target<'t>(
    select_from: &Regex,
    table: &Regex,
    lookahead: usize,
    text: &'t str,
    select_end: usize,
) -> Option<regex::Match<'t>> {
    if select_end >= text.len() {
        return None;
    }
    let mut at = select_end + char_len_at(text, select_end);

    while at <= text.len() {
        let from = select_from.find_at(text, at)?;
        if let Some(target) = window_target(table, lookahead, text, from.end()) {
            return Some(target);
        }
        at = from.start() + char_len_at(text, from.start());
    }

    None
}

/// First standalone table name starting at most `lookahead` characters after `after`.
fn window_target<'t>(
    table: &Regex,
    lookahead: usize,
    text: &'t str,
    after: usize,
) -> Option<regex::Match<'t>> {
    let limit = advance_chars(text, after, lookahead);
    // Keep enough text past the limit for the table name and its trailing boundary.
    let haystack = &text[..advance_chars(text, limit, 5)];

    table.find_at(haystack, after).filter(|m| m.start() <= limit)
}

/// Byte offset reached by moving `n` characters forward from `from`.
fn advance_chars(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| from + i)
}

fn char_len_at(text: &str, at: usize) -> usize {
    text[at..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dml(text: &str) -> Vec<RawMatch> {
        CompiledMatcher::dml().unwrap().find_all(text)
    }

    fn decl(text: &str) -> Vec<RawMatch> {
        CompiledMatcher::declaration().unwrap().find_all(text)
    }

    #[test]
    fn test_patterns_compile() {
        assert!(CompiledMatcher::dml().is_ok());
        assert!(CompiledMatcher::declaration().is_ok());
    }

    #[test]
    fn test_rejects_malformed_pattern() {
        assert!(matches!(
            compile_regex_safe("(KONV"),
            Err(RuleError::RegexError(_))
        ));
    }

    #[test]
    fn test_rejects_overlong_pattern() {
        let pattern = "a".repeat(MAX_REGEX_LENGTH + 1);
        assert!(matches!(
            compile_regex_safe(&pattern),
            Err(RuleError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_select_from_konv() {
        let text = "SELECT * FROM konv INTO TABLE lt_konv.";
        let matches = dml(text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start, 0);
        assert_eq!(&text[matches[0].start..matches[0].end], "SELECT * FROM konv");
        assert_eq!(matches[0].identifier, "KONV");
    }

    #[test]
    fn test_insert_update_delete() {
        let text = "INSERT INTO konv VALUES ls_konv.\nUPDATE konv SET kbetr = 0.\nDELETE FROM KONV WHERE knumv = 1.";
        let matches = dml(text);
        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|m| m.identifier == "KONV"));
        assert_eq!(&text[matches[1].start..matches[1].end], "UPDATE konv");
    }

    #[test]
    fn test_multiline_select() {
        let text = "SELECT knumv\n       kposn\n       kschl\n  FROM\n  konv\n  INTO TABLE lt_cond.";
        let matches = dml(text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start, 0);
        assert!(text[..matches[0].end].ends_with("konv"));
    }

    #[test]
    fn test_word_boundary() {
        assert!(dml("SELECT * FROM konvx INTO TABLE lt.").is_empty());
        assert!(dml("SELECT * FROM zkonv INTO TABLE lt.").is_empty());
        assert!(dml("UPDATE konv_new SET a = b.").is_empty());
    }

    #[test]
    fn test_lookahead_limit() {
        let within = format!("UPDATE{}konv SET a = b.", " ".repeat(10));
        assert_eq!(dml(&within).len(), 1);

        let exact = format!("UPDATE{}konv SET a = b.", " ".repeat(DML_LOOKAHEAD_LIMIT));
        assert_eq!(dml(&exact).len(), 1);

        let beyond = format!("UPDATE{}konv SET a = b.", " ".repeat(DML_LOOKAHEAD_LIMIT + 1));
        assert!(dml(&beyond).is_empty());
    }

    #[test]
    fn test_lookahead_counts_characters() {
        // Multi-byte characters count once each toward the window.
        let text = format!("UPDATE{}konv.", "ä".repeat(DML_LOOKAHEAD_LIMIT - 1) + " ");
        assert_eq!(dml(&text).len(), 1);
    }

    #[test]
    fn test_select_tries_later_from() {
        // First FROM is far from KONV, a later FROM is close to it.
        let filler = "x".repeat(DML_LOOKAHEAD_LIMIT + 10);
        let text = format!("SELECT a FROM mara {filler} FROM konv.");
        let matches = dml(&text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start, 0);
        assert_eq!(matches[0].end, text.len() - 1);
    }

    #[test]
    fn test_select_needs_char_before_from() {
        assert!(dml("SELECTFROM konv").is_empty());
        assert_eq!(dml("SELECT FROM konv").len(), 1);
    }

    #[test]
    fn test_non_overlapping_matches() {
        let text = "SELECT * FROM konv. SELECT * FROM konv.";
        let matches = dml(text);
        assert_eq!(matches.len(), 2);
        assert!(matches[0].end <= matches[1].start);
    }

    #[test]
    fn test_no_dml_keyword() {
        assert!(dml("WRITE konv.").is_empty());
        assert!(dml("").is_empty());
    }

    #[test]
    fn test_declaration_kinds() {
        let text = "DATA lt_konv TYPE TABLE OF konv.\nTYPES ty_cnt TYPE dzaehk.\nFIELD-SYMBOLS <ls> LIKE dzaeko.\nCONSTANTS lc_x TYPE konv VALUE space.";
        let matches = decl(text);
        let ids: Vec<&str> = matches.iter().map(|m| m.identifier.as_str()).collect();
        assert_eq!(ids, vec!["KONV", "DZAEHK", "DZAEKO", "KONV"]);
    }

    #[test]
    fn test_declaration_span_covers_statement_start() {
        let text = "  DATA: ls_konv TYPE konv.";
        let matches = decl(text);
        assert_eq!(matches.len(), 1);
        assert_eq!(&text[matches[0].start..matches[0].end], "DATA: ls_konv TYPE konv");
    }

    #[test]
    fn test_declaration_stops_at_terminator() {
        assert!(decl("DATA lv_a TYPE i. lv_b = konv.").is_empty());
        assert!(decl("DATA lv_a TYPE i\n  TYPE konv").is_empty());
    }

    #[test]
    fn test_declaration_word_boundary() {
        assert!(decl("DATA ls TYPE konvx.").is_empty());
        assert!(decl("DATA ls TYPE dzaehk_ext.").is_empty());
    }

    #[test]
    fn test_declaration_case_insensitive() {
        let matches = decl("data ls_cond like Konv.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].identifier, "KONV");
    }

    #[test]
    fn test_advance_chars() {
        assert_eq!(advance_chars("abc", 0, 2), 2);
        assert_eq!(advance_chars("abc", 1, 5), 3);
        assert_eq!(advance_chars("äb", 0, 1), 2);
    }
}
