//! The line-based declaration scanner.

use crate::symbol_table::{BindingKind, Declaration, Duplicate, SymbolTable};
use gsbundle_core::{numbered_lines, SourceUnit};
use gsbundle_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashSet;

lazy_static! {
    /// `const|let|var NAME =` at the start of a line.
    static ref DECLARATION: Regex =
        Regex::new(r"^(?:const|let|var)\s+([A-Z][A-Z0-9_]*)\s*=").unwrap();
    /// `NAME = {`, `NAME = [`, `NAME = '` or `NAME = "` at the start of a line.
    static ref BARE_ASSIGNMENT: Regex =
        Regex::new(r#"^([A-Z][A-Z0-9_]*)\s*=\s*[{\['"]"#).unwrap();
}

/// Scans units for top-level bindings of tracked symbols.
#[derive(Debug, Clone)]
pub struct DeclarationScanner {
    tracked: FxHashSet<String>,
}

/// The outcome of scanning a unit set.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub table: SymbolTable,
    pub duplicates: Vec<Duplicate>,
}

impl ScanResult {
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    /// One error per duplicated symbol, each location attached as related info.
    pub fn to_diagnostics(&self) -> DiagnosticCollection {
        let mut diagnostics = DiagnosticCollection::new();
        for dup in &self.duplicates {
            let mut diag = Diagnostic::new(&messages::_0_IS_DECLARED_IN_MULTIPLE_PLACES, &[&dup.symbol]);
            for loc in &dup.locations {
                diag = diag.with_related(Diagnostic::with_location(
                    loc.file.clone(),
                    loc.line,
                    &messages::_0_DECLARED_HERE_AS_1,
                    &[&loc.symbol, loc.kind.keyword()],
                ));
            }
            diagnostics.add(diag);
        }
        diagnostics
    }
}

impl DeclarationScanner {
    pub fn new<I, S>(tracked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tracked: tracked.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_tracked(&self, symbol: &str) -> bool {
        self.tracked.contains(symbol)
    }

    /// Scan units in order and collect duplicates.
    pub fn scan(&self, units: &[SourceUnit]) -> ScanResult {
        let mut table = SymbolTable::new();
        for unit in units {
            self.scan_unit(unit, &mut table);
        }
        let duplicates = table.duplicates();
        tracing::debug!(
            units = units.len(),
            symbols = table.len(),
            duplicates = duplicates.len(),
            "declaration scan finished"
        );
        ScanResult { table, duplicates }
    }

    /// Record every tracked declaration in `unit` into `table`.
    pub fn scan_unit(&self, unit: &SourceUnit, table: &mut SymbolTable) {
        for (line_number, line) in numbered_lines(&unit.text) {
            for symbol in self.tracked_bindings(line) {
                table.record(Declaration {
                    symbol: symbol.to_string(),
                    file: unit.name.clone(),
                    line: line_number,
                    kind: BindingKind::from_line(line),
                });
            }
        }
    }

    /// Tracked names bound on one line. Both patterns are tried independently.
    pub fn tracked_bindings<'l>(&self, line: &'l str) -> Vec<&'l str> {
        if is_comment_line(line) {
            return Vec::new();
        }

        [&*DECLARATION, &*BARE_ASSIGNMENT]
            .into_iter()
            .filter_map(|pattern| pattern.captures(line))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|name| self.is_tracked(name))
            .collect()
    }
}

fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("//") || trimmed.starts_with('*')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> DeclarationScanner {
        DeclarationScanner::new(["SHEETS", "COLORS", "ROLES"])
    }

    #[test]
    fn test_declaration_keywords() {
        let s = scanner();
        assert_eq!(s.tracked_bindings("const SHEETS = {"), vec!["SHEETS"]);
        assert_eq!(s.tracked_bindings("let COLORS=1;"), vec!["COLORS"]);
        assert_eq!(s.tracked_bindings("var ROLES = getRoles();"), vec!["ROLES"]);
    }

    #[test]
    fn test_bare_assignment_requires_literal_opener() {
        let s = scanner();
        assert_eq!(s.tracked_bindings("SHEETS = {"), vec!["SHEETS"]);
        assert_eq!(s.tracked_bindings("SHEETS = ["), vec!["SHEETS"]);
        assert_eq!(s.tracked_bindings("SHEETS = \"x\""), vec!["SHEETS"]);
        assert_eq!(s.tracked_bindings("SHEETS = 'x'"), vec!["SHEETS"]);
        assert!(s.tracked_bindings("SHEETS = buildSheets();").is_empty());
    }

    #[test]
    fn test_untracked_and_indented_are_ignored() {
        let s = scanner();
        assert!(s.tracked_bindings("const OTHER = {").is_empty());
        assert!(s.tracked_bindings("  const SHEETS = {").is_empty());
        assert!(s.tracked_bindings("const sheets = {").is_empty());
        assert!(s.tracked_bindings("if (SHEETS == x) {").is_empty());
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let s = scanner();
        assert!(s.tracked_bindings("// const SHEETS = {").is_empty());
        assert!(s.tracked_bindings("   * SHEETS = {").is_empty());
    }

    #[test]
    fn test_block_comment_body_without_star_is_still_matched() {
        // Known false positive of the lexical scan.
        let unit = SourceUnit::new("A.gs", 0, "/*\nSHEETS = { old: true }\n*/");
        let mut table = SymbolTable::new();
        scanner().scan_unit(&unit, &mut table);
        assert_eq!(table.get("SHEETS").map(|d| d[0].line), Some(2));
    }

    #[test]
    fn test_scan_unit_records_line_and_kind() {
        let unit = SourceUnit::new("A.gs", 0, "// header\n\nvar SHEETS = {};\nCOLORS = [1];\n");
        let mut table = SymbolTable::new();
        scanner().scan_unit(&unit, &mut table);

        let sheets = table.get("SHEETS").unwrap();
        assert_eq!(sheets[0].line, 3);
        assert_eq!(sheets[0].kind, BindingKind::Var);

        let colors = table.get("COLORS").unwrap();
        assert_eq!(colors[0].line, 4);
        assert_eq!(colors[0].kind, BindingKind::Global);
    }

    #[test]
    fn test_scan_result_diagnostics() {
        let units = vec![
            SourceUnit::new("A.gs", 0, "const SHEETS = {};"),
            SourceUnit::new("B.gs", 1, "const SHEETS = [];"),
        ];
        let result = scanner().scan(&units);
        let diags = result.to_diagnostics();
        assert_eq!(diags.error_count(), 1);
        let related = &diags.diagnostics()[0].related_information;
        assert_eq!(related.len(), 2);
        assert_eq!(related[1].file.as_deref(), Some("B.gs"));
    }
}
