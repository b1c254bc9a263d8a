//! Built-in obsolete-artifact rules embedded in the binary
//!
//! SAP Note 2220005 replaced the KONV condition table and the DZAEHK/DZAEKO
//! counter types. The mapping tables and the pattern sources for both
//! matchers live here; they are read-only for the life of the process.

use condscan_core::IssueType;

/// Obsolete tables reachable through DML, with their replacements
pub static OBSOLETE_TABLES: &[(&str, &str)] = &[("KONV", "PRCD_ELEMENTS")];

/// Obsolete tables and line types usable in declarations, with their replacements
pub static OBSOLETE_TYPES: &[(&str, &str)] = &[
    ("KONV", "PRCD_ELEMENTS"),
    ("DZAEHK", "VFPRC_COND_COUNT"),
    ("DZAEKO", "VFPRC_COND_COUNT_HEAD"),
];

/// Statement openers that start a DML body
///
/// `SELECT` is only the start of its opener: the opener extends to the
/// first following `FROM` (see [`DML_SELECT_FROM_PATTERN`]).
pub const DML_OPENER_PATTERN: &str = r"(?i)(?P<select>SELECT)|INSERT\s+INTO|UPDATE|DELETE\s+FROM";

/// `FROM` keyword closing a `SELECT` opener
pub const DML_SELECT_FROM_PATTERN: &str = r"(?i)FROM";

/// Obsolete table name as a standalone word
pub const DML_TABLE_PATTERN: &str = r"(?i)\b(?P<table>KONV)\b";

/// Declaration typed with an obsolete table or line type, within one statement
pub const DECLARATION_PATTERN: &str = r"(?i)\b(?P<full>(?:DATA|TYPES|FIELD-SYMBOLS|CONSTANTS)[^.\n]*?\b(?:TYPE|LIKE)\b\s*(?:TABLE\s+OF\s+|\s+)?(?P<dtype>KONV|DZAEHK|DZAEKO)\b)";

/// Which mapping table a matched identifier is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObsoleteKind {
    /// Table referenced by a DML statement
    Table,
    /// Table or line type referenced by a declaration
    Type,
}

impl ObsoleteKind {
    /// Issue type reported for matches of this kind
    pub fn issue_type(&self) -> IssueType {
        match self {
            ObsoleteKind::Table => IssueType::ObsoleteTableUsage,
            ObsoleteKind::Type => IssueType::ObsoleteTypeDeclaration,
        }
    }

    /// Replacement for an obsolete identifier, `None` if it is not mapped
    pub fn replacement(&self, identifier: &str) -> Option<&'static str> {
        match self {
            ObsoleteKind::Table => table_replacement(identifier),
            ObsoleteKind::Type => type_replacement(identifier),
        }
    }

    pub fn message(&self, identifier: &str, replacement: &str) -> String {
        match self {
            ObsoleteKind::Table => format!(
                "{identifier} table is obsolete in S/4HANA (SAP Note 2220005), replaced by {replacement}."
            ),
            ObsoleteKind::Type => format!(
                "{identifier} type is obsolete (SAP Note 2220005), use {replacement} instead."
            ),
        }
    }

    pub fn suggestion(&self, replacement: &str) -> String {
        match self {
            ObsoleteKind::Table => {
                format!("Rewrite the statement using {replacement} and adjust related logic.")
            }
            ObsoleteKind::Type => format!(
                "Change the declaration using {replacement} and adapt the logic accordingly."
            ),
        }
    }
}

/// Look up the replacement for an obsolete table used in DML
pub fn table_replacement(name: &str) -> Option<&'static str> {
    lookup(OBSOLETE_TABLES, name)
}

/// Look up the replacement for an obsolete table or type used in a declaration
pub fn type_replacement(name: &str) -> Option<&'static str> {
    lookup(OBSOLETE_TYPES, name)
}

fn lookup(table: &'static [(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(obsolete, _)| *obsolete == name)
        .map(|(_, replacement)| *replacement)
}
