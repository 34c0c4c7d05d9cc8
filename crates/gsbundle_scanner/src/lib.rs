//! gsbundle_scanner: Duplicate top-level declaration detection.
//!
//! Scans unit text line by line for top-level bindings of tracked constants
//! (`const SHEETS = ...`, `SHEETS = {...}`) and records every occurrence in
//! an insertion-ordered symbol table. A tracked symbol with more than one
//! record fails the build.
//!
//! This is a lexical scan, not a parse: lines starting with `//` or `*` are
//! skipped, but a match inside a string or a `/* */` body that does not start
//! its line with `*` is still reported.

mod scanner;
mod symbol_table;

pub use scanner::{DeclarationScanner, ScanResult};
pub use symbol_table::{BindingKind, Declaration, Duplicate, SymbolTable};
