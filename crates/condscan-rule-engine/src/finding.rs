//! Finding construction from raw match spans
//!
//! Converts a byte span inside a unit's code into a [`Finding`] with
//! absolute line numbers, a one-line snippet and the rule's message.

use crate::built_in::ObsoleteKind;
use crate::matcher::RawMatch;
use condscan_core::{Finding, Severity, Unit};

/// Builds findings for one unit
///
/// Line numbers are absolute: the unit's `start_line` plus the 1-based line
/// of the match inside the unit's code.
#[derive(Debug, Clone, Copy)]
pub struct FindingBuilder<'a> {
    unit: &'a Unit,
}

impl<'a> FindingBuilder<'a> {
    pub fn new(unit: &'a Unit) -> Self {
        Self { unit }
    }

    /// Build the finding for one match of the given kind
    ///
    /// An identifier missing from the mapping table yields an empty
    /// replacement name instead of an error.
    pub fn build(&self, raw: &RawMatch, kind: ObsoleteKind) -> Finding {
        let text = self.unit.code.as_str();

        let line_in_block = line_in_block(text, raw.start);
        let snippet = line_snippet(text, raw.start, raw.end);
        let snippet_line_count = count_newlines(snippet).saturating_add(1);

        let starting_line = self.unit.start_line.saturating_add(line_in_block);
        // One past the snippet's last line.
        let ending_line = starting_line.saturating_add(snippet_line_count);

        let replacement = kind.replacement(&raw.identifier).unwrap_or_default();

        Finding {
            prog_name: self.unit.pgm_name.clone(),
            incl_name: self.unit.inc_name.clone(),
            types: self.unit.block_type.clone(),
            blockname: self.unit.name.clone(),
            starting_line,
            ending_line,
            issues_type: kind.issue_type(),
            severity: Severity::Error,
            message: kind.message(&raw.identifier, replacement),
            suggestion: kind.suggestion(replacement),
            snippet: escape_newlines(snippet),
        }
    }
}

/// 1-based line of `offset` within `text`
pub fn line_in_block(text: &str, offset: usize) -> i64 {
    count_newlines(&text[..offset]).saturating_add(1)
}

/// The full line(s) containing the span `start..end`
///
/// Bounded by the newline before `start` (or the text start) and the newline
/// at or after `end` (or the text end). A span crossing lines keeps its
/// inner newlines.
pub fn line_snippet(text: &str, start: usize, end: usize) -> &str {
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);
    &text[line_start..line_end]
}

/// Replace newlines with a literal `\n` so the snippet prints on one line
pub fn escape_newlines(snippet: &str) -> String {
    snippet.replace('\n', "\\n")
}

fn count_newlines(text: &str) -> i64 {
    i64::try_from(text.bytes().filter(|&b| b == b'\n').count()).unwrap_or(i64::MAX)
}
