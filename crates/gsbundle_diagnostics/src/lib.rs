//! gsbundle_diagnostics: Diagnostic messages and build reporting.
//!
//! Non-fatal findings (missing units, misordered dependencies) and the
//! duplicate-declaration violations are all carried as [`Diagnostic`]s so the
//! CLI can summarize them at the end of each phase.

use gsbundle_core::LineNumber;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001, 2001).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The unit where this diagnostic occurred, if any.
    pub file: Option<String>,
    /// The 1-based line where this diagnostic occurred, if any.
    pub line: Option<LineNumber>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
    /// Related diagnostics.
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            line: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Create a new diagnostic attached to a unit but no particular line.
    pub fn with_file(file: String, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: Some(file),
            ..Self::new(message, args)
        }
    }

    /// Create a new diagnostic with unit and line info.
    pub fn with_location(
        file: String,
        line: LineNumber,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file),
            line: Some(line),
            ..Self::new(message, args)
        }
    }

    /// Add related diagnostic information.
    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Whether this is a warning diagnostic.
    pub fn is_warning(&self) -> bool {
        self.category == DiagnosticCategory::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
            write!(f, ": ")?;
        }
        write!(
            f,
            "{} GS{}: {}",
            self.category, self.code, self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
///
/// Placeholders are substituted in one pass over the template, so argument
/// text is never expanded again. Braces that do not name an argument are kept.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after.find('}').and_then(|close| {
            let arg = after[..close].parse::<usize>().ok().and_then(|i| args.get(i))?;
            Some((close, *arg))
        });
        match placeholder {
            Some((close, arg)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// A collection of diagnostics accumulated during a build phase.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    /// Diagnostics with the given code, in insertion order.
    pub fn with_code(&self, code: u32) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
        ($code:expr, Message, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Message, message: $msg }
        };
    }

    // ========================================================================
    // Module list (1000-1099)
    // ========================================================================
    pub const MODULE_0_NOT_FOUND: DiagnosticMessage = diag!(1001, Warning, "Module '{0}' was not found and will be skipped.");
    pub const _0_DEPENDS_ON_1_WHICH_IS_NOT_IN_BUILD_LIST: DiagnosticMessage = diag!(1002, Warning, "{0} depends on {1}, but {1} is not in build list");
    pub const _0_INDEX_1_DEPENDS_ON_2_INDEX_3_WHICH_IS_LOADED_LATER: DiagnosticMessage = diag!(1003, Warning, "{0} (index {1}) depends on {2} (index {3}), but {2} is loaded later");
    pub const FAILED_TO_READ_MODULE_0_COLON_1: DiagnosticMessage = diag!(1004, Warning, "Failed to read module '{0}': {1}");
    pub const FILE_0_IS_NOT_IN_MODULE_LIST: DiagnosticMessage = diag!(1005, Warning, "File '{0}' is not in the module list and is not excluded.");

    // ========================================================================
    // Declarations (2000-2099)
    // ========================================================================
    pub const _0_IS_DECLARED_IN_MULTIPLE_PLACES: DiagnosticMessage = diag!(2001, Error, "'{0}' is declared in multiple places.");
    pub const _0_DECLARED_HERE_AS_1: DiagnosticMessage = diag!(2002, Message, "'{0}' declared here ({1}).");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message("{0} depends on {1}, but {1} is not in build list", &["A.gs", "B.gs"]),
            "A.gs depends on B.gs, but B.gs is not in build list"
        );
    }

    #[test]
    fn test_format_message_does_not_expand_arguments() {
        assert_eq!(
            format_message("{0} depends on {1}, but {1} is not in build list", &["{1}.gs", "B.gs"]),
            "{1}.gs depends on B.gs, but B.gs is not in build list"
        );
    }

    #[test]
    fn test_format_message_keeps_unmatched_braces() {
        assert_eq!(format_message("{x} {2} {0", &["a"]), "{x} {2} {0");
    }

    #[test]
    fn test_diagnostic_display_with_location() {
        let diag = Diagnostic::with_location(
            "Constants.gs".to_string(),
            3,
            &messages::_0_IS_DECLARED_IN_MULTIPLE_PLACES,
            &["SHEETS"],
        );
        assert_eq!(
            diag.to_string(),
            "Constants.gs:3: error GS2001: 'SHEETS' is declared in multiple places."
        );
    }

    #[test]
    fn test_diagnostic_display_with_file_only() {
        let diag = Diagnostic::with_file("Code.gs".to_string(), &messages::MODULE_0_NOT_FOUND, &["Code.gs"]);
        assert_eq!(
            diag.to_string(),
            "Code.gs: warning GS1001: Module 'Code.gs' was not found and will be skipped."
        );
    }

    #[test]
    fn test_diagnostic_without_location() {
        let diag = Diagnostic::new(&messages::MODULE_0_NOT_FOUND, &["X.gs"]);
        assert!(diag.file.is_none());
        assert!(diag.line.is_none());
        assert_eq!(diag.code, 1001);
        assert!(diag.is_warning());
        assert!(!diag.is_error());
    }

    #[test]
    fn test_diagnostic_collection() {
        let mut collection = DiagnosticCollection::new();
        assert!(collection.is_empty());

        collection.add(Diagnostic::new(&messages::MODULE_0_NOT_FOUND, &["A.gs"]));
        assert!(!collection.has_errors());
        assert_eq!(collection.warning_count(), 1);

        collection.add(Diagnostic::new(&messages::_0_IS_DECLARED_IN_MULTIPLE_PLACES, &["SHEETS"]));
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 1);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.with_code(1001).count(), 1);
    }

    #[test]
    fn test_diagnostic_with_related() {
        let primary = Diagnostic::new(&messages::_0_IS_DECLARED_IN_MULTIPLE_PLACES, &["SHEETS"]);
        let related = Diagnostic::with_location(
            "A.gs".to_string(),
            3,
            &messages::_0_DECLARED_HERE_AS_1,
            &["SHEETS", "const"],
        );
        let combined = primary.with_related(related);
        assert_eq!(combined.related_information.len(), 1);
        assert_eq!(combined.related_information[0].line, Some(3));
    }
}
