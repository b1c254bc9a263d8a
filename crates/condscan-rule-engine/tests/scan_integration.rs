//! End-to-end scanner behavior over realistic ABAP units
//!
//! These tests cover:
//! - DML and declaration detection with mapped replacements
//! - Word-boundary handling for identifiers that only start with KONV
//! - Absolute line numbers and snippet extraction
//! - Batch filtering and idempotence

use condscan_core::{IssueType, Severity, Unit};
use condscan_rule_engine::RuleEngine;
use proptest::prelude::*;

fn unit(name: &str, start_line: i64, code: &str) -> Unit {
    Unit::new("ZSD_PRICING", "ZSD_PRICING_F01", "FORM", name)
        .with_lines(start_line, start_line + code.lines().count() as i64)
        .with_code(code)
}

fn scan(code: &str) -> Vec<condscan_core::Finding> {
    RuleEngine::global()
        .scan_unit(&unit("TEST", 0, code))
        .findings
        .unwrap_or_default()
}

// ============================================================================
// DML detection
// ============================================================================

#[test]
fn test_each_dml_statement_reports_once() {
    let code = r#"FORM read_conditions.
  SELECT * FROM konv INTO TABLE lt_konv WHERE knumv = lv_knumv.
  INSERT INTO konv VALUES ls_konv.
  UPDATE konv SET kbetr = lv_kbetr WHERE knumv = lv_knumv.
  DELETE FROM konv WHERE knumv = lv_knumv.
ENDFORM."#;
    let findings = scan(code);

    assert_eq!(findings.len(), 4);
    for finding in &findings {
        assert_eq!(finding.issues_type, IssueType::ObsoleteTableUsage);
        assert_eq!(finding.severity, Severity::Error);
        assert!(finding.message.contains("PRCD_ELEMENTS"));
        assert!(finding.suggestion.contains("PRCD_ELEMENTS"));
    }
    let lines: Vec<i64> = findings.iter().map(|f| f.starting_line).collect();
    assert_eq!(lines, vec![2, 3, 4, 5]);
}

#[test]
fn test_select_with_join_across_lines() {
    let code = r#"  SELECT v~vbeln, k~kschl, k~kbetr
    FROM vbak AS v
    INNER JOIN konv AS k ON k~knumv = v~knumv
    INTO TABLE @DATA(lt_prices)
    WHERE v~vbeln IN @s_vbeln."#;
    let findings = scan(code);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].starting_line, 1);
    assert_eq!(
        findings[0].snippet,
        "  SELECT v~vbeln, k~kschl, k~kbetr\\n    FROM vbak AS v\\n    INNER JOIN konv AS k ON k~knumv = v~knumv"
    );
    assert_eq!(findings[0].ending_line, 4);
}

#[test]
fn test_identifiers_starting_with_konv_do_not_match() {
    let code = r#"SELECT * FROM konvx INTO TABLE lt_x.
UPDATE konvh SET a = b.
DATA ls_x TYPE konvx.
TYPES ty_x TYPE TABLE OF konv_ext."#;
    assert!(scan(code).is_empty());
}

#[test]
fn test_replacement_table_is_clean() {
    let code = r#"DATA lt_prcd TYPE TABLE OF prcd_elements.
SELECT * FROM prcd_elements INTO TABLE lt_prcd."#;
    assert!(scan(code).is_empty());
}

// ============================================================================
// Declaration detection
// ============================================================================

#[test]
fn test_declarations_map_to_replacements() {
    let cases = [
        ("DATA ls_cond TYPE konv.", "KONV", "PRCD_ELEMENTS"),
        ("TYPES ty_cnt TYPE dzaehk.", "DZAEHK", "VFPRC_COND_COUNT"),
        ("FIELD-SYMBOLS <ls_head> LIKE dzaeko.", "DZAEKO", "VFPRC_COND_COUNT_HEAD"),
        ("CONSTANTS lc_init TYPE dzaehk VALUE '01'.", "DZAEHK", "VFPRC_COND_COUNT"),
        ("DATA lt_cond TYPE TABLE OF konv.", "KONV", "PRCD_ELEMENTS"),
    ];

    for (code, obsolete, replacement) in cases {
        let findings = scan(code);
        assert_eq!(findings.len(), 1, "expected one finding for {code}");
        assert_eq!(findings[0].issues_type, IssueType::ObsoleteTypeDeclaration);
        assert_eq!(
            findings[0].message,
            format!("{obsolete} type is obsolete (SAP Note 2220005), use {replacement} instead.")
        );
        assert_eq!(findings[0].snippet, code);
    }
}

#[test]
fn test_overlapping_matchers_both_report() {
    // A declaration line that also looks like a DML target is reported by both rules.
    let code = "UPDATE lv_x. DATA ls TYPE konv.";
    let findings = scan(code);

    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].issues_type, IssueType::ObsoleteTableUsage);
    assert_eq!(findings[1].issues_type, IssueType::ObsoleteTypeDeclaration);
    assert_eq!(findings[0].snippet, findings[1].snippet);
}

// ============================================================================
// Line numbers and snippets
// ============================================================================

#[test]
fn test_third_line_of_unit_at_line_100() {
    let code = "FORM x.\n  DATA lv TYPE i.\n  SELECT SINGLE * FROM konv INTO ls_konv.\nENDFORM.";
    let scanned = RuleEngine::global().scan_unit(&unit("X", 100, code));
    let findings = scanned.findings.unwrap();

    assert_eq!(findings[0].starting_line, 103);
    assert_eq!(findings[0].snippet, "  SELECT SINGLE * FROM konv INTO ls_konv.");
    assert_eq!(findings[0].blockname, "X");
}

// ============================================================================
// Batch behavior
// ============================================================================

#[test]
fn test_batch_keeps_only_flagged_units() {
    let units = vec![
        unit("CLEAN_1", 1, "WRITE 'a'."),
        unit("DIRTY", 10, "DELETE FROM konv WHERE knumv = lv."),
        unit("CLEAN_2", 20, "WRITE 'b'."),
    ];
    let scanned = RuleEngine::global().scan_batch(&units);

    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].name, "DIRTY");
    assert_eq!(scanned[0].finding_count(), 1);
}

#[test]
fn test_batch_preserves_input_order() {
    let units = vec![
        unit("B", 0, "DATA ls TYPE dzaeko."),
        unit("A", 0, "UPDATE konv."),
    ];
    let names: Vec<String> = RuleEngine::global()
        .scan_batch(&units)
        .into_iter()
        .map(|u| u.name)
        .collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn test_empty_batch() {
    assert!(RuleEngine::global().scan_batch(&[]).is_empty());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn scanning_is_idempotent(code in "[A-Za-z .\n*]{0,200}") {
        let input = unit("P", 7, &code);
        let first = RuleEngine::global().scan_unit(&input);
        let second = RuleEngine::global().scan_unit(&input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn select_line_number_follows_preceding_newlines(
        preceding in 0usize..40,
        start_line in 0i64..10_000,
    ) {
        let code = format!("{}SELECT * FROM konv INTO TABLE lt.", "WRITE 'x'.\n".repeat(preceding));
        let scanned = RuleEngine::global().scan_unit(&unit("P", start_line, &code));
        let findings = scanned.findings.unwrap_or_default();

        prop_assert_eq!(findings.len(), 1);
        prop_assert_eq!(findings[0].starting_line, start_line + preceding as i64 + 1);
        prop_assert_eq!(findings[0].ending_line, start_line + preceding as i64 + 2);
    }

    #[test]
    fn snippets_never_contain_raw_newlines(code in "(DATA ls TYPE konv\\.|UPDATE\n konv\\.|[a-z \n]{0,20})*") {
        let scanned = RuleEngine::global().scan_unit(&unit("P", 0, &code));
        for finding in scanned.findings.unwrap_or_default() {
            prop_assert!(!finding.snippet.contains('\n'));
        }
    }
}
