//! Declaration records and the symbol table they are collected into.

use gsbundle_core::LineNumber;
use indexmap::IndexMap;
use std::fmt;

/// The syntactic form that introduced a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `const NAME = ...`
    Const,
    /// `let NAME = ...`
    Let,
    /// `var NAME = ...`
    Var,
    /// `NAME = {...}` with no keyword (implicit global).
    Global,
}

impl BindingKind {
    /// Infer the kind from the keywords present anywhere on the line.
    pub fn from_line(line: &str) -> Self {
        if line.contains("const ") {
            BindingKind::Const
        } else if line.contains("let ") {
            BindingKind::Let
        } else if line.contains("var ") {
            BindingKind::Var
        } else {
            BindingKind::Global
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            BindingKind::Const => "const",
            BindingKind::Let => "let",
            BindingKind::Var => "var",
            BindingKind::Global => "global",
        }
    }

    /// Long-form name of the binding kind.
    pub fn description(&self) -> &'static str {
        match self {
            BindingKind::Const => "immutable binding",
            BindingKind::Let => "block-scoped binding",
            BindingKind::Var => "mutable binding",
            BindingKind::Global => "bare assignment",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One top-level binding of a tracked symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub symbol: String,
    pub file: String,
    pub line: LineNumber,
    pub kind: BindingKind,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.file, self.line, self.kind)
    }
}

/// A tracked symbol bound more than once, with every location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub symbol: String,
    pub locations: Vec<Declaration>,
}

/// Symbol name -> declarations, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: IndexMap<String, Vec<Declaration>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration to its symbol's sequence.
    pub fn record(&mut self, declaration: Declaration) {
        self.entries
            .entry(declaration.symbol.clone())
            .or_default()
            .push(declaration);
    }

    pub fn get(&self, symbol: &str) -> Option<&[Declaration]> {
        self.entries.get(symbol).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Declaration])> {
        self.entries
            .iter()
            .map(|(symbol, decls)| (symbol.as_str(), decls.as_slice()))
    }

    /// Number of distinct symbols seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols declared more than once, in first-seen order.
    pub fn duplicates(&self) -> Vec<Duplicate> {
        self.entries
            .iter()
            .filter(|(_, decls)| decls.len() > 1)
            .map(|(symbol, decls)| Duplicate {
                symbol: symbol.clone(),
                locations: decls.clone(),
            })
            .collect()
    }

    /// Symbols with exactly one declaration: the single source of truth.
    pub fn single_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.entries
            .values()
            .filter(|decls| decls.len() == 1)
            .map(|decls| &decls[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(symbol: &str, file: &str, line: LineNumber) -> Declaration {
        Declaration {
            symbol: symbol.to_string(),
            file: file.to_string(),
            line,
            kind: BindingKind::Const,
        }
    }

    #[test]
    fn test_binding_kind_from_line() {
        assert_eq!(BindingKind::from_line("const SHEETS = {"), BindingKind::Const);
        assert_eq!(BindingKind::from_line("let SHEETS = {"), BindingKind::Let);
        assert_eq!(BindingKind::from_line("var SHEETS = {"), BindingKind::Var);
        assert_eq!(BindingKind::from_line("SHEETS = {"), BindingKind::Global);
    }

    #[test]
    fn test_binding_kind_checks_const_first() {
        // Keyword presence anywhere on the line decides, const before let.
        assert_eq!(
            BindingKind::from_line("var ROLES = ['let ', 'const ']"),
            BindingKind::Const
        );
    }

    #[test]
    fn test_declaration_display() {
        assert_eq!(decl("SHEETS", "A.gs", 3).to_string(), "A.gs:3 (const)");
    }

    #[test]
    fn test_table_keeps_first_seen_order() {
        let mut table = SymbolTable::new();
        table.record(decl("COLORS", "A.gs", 1));
        table.record(decl("SHEETS", "A.gs", 2));
        table.record(decl("COLORS", "B.gs", 7));

        let symbols: Vec<_> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec!["COLORS", "SHEETS"]);
        assert_eq!(table.get("COLORS").map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_duplicates_and_singles() {
        let mut table = SymbolTable::new();
        table.record(decl("COLORS", "A.gs", 1));
        table.record(decl("SHEETS", "A.gs", 2));
        table.record(decl("COLORS", "B.gs", 7));

        let dups = table.duplicates();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].symbol, "COLORS");
        assert_eq!(dups[0].locations[1].file, "B.gs");

        let singles: Vec<_> = table.single_declarations().map(|d| d.symbol.as_str()).collect();
        assert_eq!(singles, vec!["SHEETS"]);
    }
}
