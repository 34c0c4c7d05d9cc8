//! gsbundle_module: Module list resolution and dependency-order checks.
//!
//! Turns the manifest's module names into loaded [`SourceUnit`]s, reports
//! which listed modules are missing, lists root files that nobody listed,
//! and checks the declared dependency table against the load order.

mod order;

pub use order::{validate_dependency_order, DependencyWarning};

use gsbundle_core::{SourceHost, SourceUnit};
use gsbundle_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use gsbundle_options::Manifest;
use std::fmt;

/// Extension of the script files that make up a project.
pub const SCRIPT_EXTENSION: &str = ".gs";

/// The modules of a build, loaded from a host.
#[derive(Debug, Clone, Default)]
pub struct UnitResolution {
    /// Units that were read, in list order.
    pub units: Vec<SourceUnit>,
    /// Listed modules that do not exist on the host.
    pub missing: Vec<String>,
    /// Listed modules that exist but could not be read.
    pub unreadable: Vec<UnreadableUnit>,
    /// One warning per missing or unreadable module.
    pub diagnostics: DiagnosticCollection,
}

/// A listed module that exists on the host but failed to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableUnit {
    pub name: String,
    pub error: String,
}

impl fmt::Display for UnreadableUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.error)
    }
}

/// Read every listed module, in order. Absent modules are recorded, not fatal.
pub fn resolve_units(host: &dyn SourceHost, modules: &[&str]) -> UnitResolution {
    let mut resolution = UnitResolution::default();

    for (ordinal, name) in modules.iter().enumerate() {
        match host.read_file(name) {
            Ok(Some(text)) => {
                resolution.units.push(SourceUnit::new(*name, ordinal, text));
            }
            Ok(None) => {
                tracing::debug!(module = %name, "module not found");
                resolution.missing.push(name.to_string());
                resolution.diagnostics.add(Diagnostic::with_file(
                    name.to_string(),
                    &messages::MODULE_0_NOT_FOUND,
                    &[*name],
                ));
            }
            Err(e) => {
                let error = e.to_string();
                tracing::warn!(module = %name, %error, "module could not be read");
                resolution.diagnostics.add(Diagnostic::with_file(
                    name.to_string(),
                    &messages::FAILED_TO_READ_MODULE_0_COLON_1,
                    &[*name, error.as_str()],
                ));
                resolution.unreadable.push(UnreadableUnit {
                    name: name.to_string(),
                    error,
                });
            }
        }
    }

    resolution
}

/// Which listed modules exist on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub total: usize,
    pub found: usize,
    pub missing: Vec<String>,
}

impl VerifyReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check existence of every listed module without reading it.
pub fn verify_modules(host: &dyn SourceHost, modules: &[&str]) -> VerifyReport {
    let missing: Vec<String> = modules
        .iter()
        .filter(|name| !host.file_exists(name))
        .map(|name| name.to_string())
        .collect();

    VerifyReport {
        total: modules.len(),
        found: modules.len() - missing.len(),
        missing,
    }
}

/// Script files on the host that are neither listed nor excluded.
pub fn find_unlisted_files(host: &dyn SourceHost, manifest: &Manifest) -> DiagnosticCollection {
    let mut diagnostics = DiagnosticCollection::new();

    let files = match host.list_files() {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(error = %e, "could not list project files");
            return diagnostics;
        }
    };

    for file in files {
        if file.ends_with(SCRIPT_EXTENSION) && !manifest.is_listed(&file) && !manifest.is_excluded(&file) {
            diagnostics.add(Diagnostic::with_file(
                file.clone(),
                &messages::FILE_0_IS_NOT_IN_MODULE_LIST,
                &[file.as_str()],
            ));
        }
    }

    diagnostics
}
