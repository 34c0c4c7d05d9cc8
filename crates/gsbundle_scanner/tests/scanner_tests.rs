//! Declaration scanner integration tests.
//!
//! Verifies duplicate detection across ordered unit sets.

use gsbundle_core::SourceUnit;
use gsbundle_scanner::{BindingKind, DeclarationScanner};
use pretty_assertions::assert_eq;

fn units(sources: &[(&str, &str)]) -> Vec<SourceUnit> {
    sources
        .iter()
        .enumerate()
        .map(|(i, (name, text))| SourceUnit::new(*name, i, *text))
        .collect()
}

fn dashboard_scanner() -> DeclarationScanner {
    DeclarationScanner::new(["SHEETS", "COLORS", "MEMBER_COLS", "FEATURE_FLAGS"])
}

/// Collect (file, line, kind) triples for a symbol's locations.
fn locations_of(result: &gsbundle_scanner::ScanResult, symbol: &str) -> Vec<(String, u32, BindingKind)> {
    result
        .duplicates
        .iter()
        .find(|d| d.symbol == symbol)
        .map(|d| {
            d.locations
                .iter()
                .map(|l| (l.file.clone(), l.line, l.kind))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_no_duplicates() {
    let result = dashboard_scanner().scan(&units(&[
        ("Constants.gs", "const SHEETS = {};\nconst COLORS = {};\n"),
        ("Code.gs", "function onOpen() {\n  var SHEETS = 1;\n}\n"),
    ]));
    assert!(!result.has_duplicates());
    assert_eq!(result.table.len(), 2);
}

#[test]
fn test_duplicate_across_units_reports_every_location() {
    let a = "// Constants\n\nconst SHEETS = {\n  MEMBERS: 'Members'\n};\n";
    let b = "\n\n\n\n\n\n\n\n\nconst SHEETS = [\n];\n";
    let result = dashboard_scanner().scan(&units(&[("A", a), ("B", b)]));

    assert!(result.has_duplicates());
    assert_eq!(result.duplicates.len(), 1);
    assert_eq!(
        locations_of(&result, "SHEETS"),
        vec![
            ("A".to_string(), 3, BindingKind::Const),
            ("B".to_string(), 10, BindingKind::Const),
        ]
    );
}

#[test]
fn test_duplicate_within_one_unit() {
    let result = dashboard_scanner().scan(&units(&[(
        "Constants.gs",
        "var COLORS = {};\nCOLORS = { primary: '#000' };\n",
    )]));
    assert_eq!(
        locations_of(&result, "COLORS"),
        vec![
            ("Constants.gs".to_string(), 1, BindingKind::Var),
            ("Constants.gs".to_string(), 2, BindingKind::Global),
        ]
    );
}

#[test]
fn test_duplicates_follow_first_seen_order() {
    let result = dashboard_scanner().scan(&units(&[
        ("A.gs", "const MEMBER_COLS = {};\nconst SHEETS = {};\n"),
        ("B.gs", "const SHEETS = {};\nconst MEMBER_COLS = {};\n"),
        ("C.gs", "let MEMBER_COLS = {};\n"),
    ]));
    let symbols: Vec<_> = result.duplicates.iter().map(|d| d.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["MEMBER_COLS", "SHEETS"]);

    let files: Vec<_> = locations_of(&result, "MEMBER_COLS")
        .into_iter()
        .map(|(f, _, _)| f)
        .collect();
    assert_eq!(files, vec!["A.gs", "B.gs", "C.gs"]);
}

#[test]
fn test_single_source_of_truth_summary() {
    let result = dashboard_scanner().scan(&units(&[
        ("Constants.gs", "const SHEETS = {};\nconst FEATURE_FLAGS = {};\n"),
        ("Other.gs", "const COLORS = {};\nconst COLORS = {};\n"),
    ]));
    let singles: Vec<_> = result
        .table
        .single_declarations()
        .map(|d| d.to_string())
        .collect();
    assert_eq!(singles, vec!["Constants.gs:1 (const)", "Constants.gs:2 (const)"]);
}

#[test]
fn test_scan_is_deterministic() {
    let set = units(&[
        ("A.gs", "const SHEETS = {};\n"),
        ("B.gs", "SHEETS = [];\nconst COLORS = {};\n"),
    ]);
    let scanner = dashboard_scanner();
    let first = scanner.scan(&set);
    let second = scanner.scan(&set);
    assert_eq!(first.duplicates, second.duplicates);
}

#[test]
fn test_empty_unit_set() {
    let result = dashboard_scanner().scan(&[]);
    assert!(!result.has_duplicates());
    assert!(result.table.is_empty());
}
