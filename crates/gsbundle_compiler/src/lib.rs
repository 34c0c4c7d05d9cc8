//! gsbundle_compiler: Build orchestration.
//!
//! Creates the program for a project root and runs the phases in order:
//! resolve units -> declaration gate -> concatenate -> write.

use chrono::{SecondsFormat, Utc};
use gsbundle_core::{FsHost, HostError, SourceHost};
use gsbundle_diagnostics::DiagnosticCollection;
use gsbundle_emitter::{BuildInfo, Concatenator, EmitError, OutputFile};
use gsbundle_module::{
    find_unlisted_files, resolve_units, validate_dependency_order, verify_modules,
    DependencyWarning, UnitResolution, UnreadableUnit, VerifyReport,
};
use gsbundle_options::{BuildOptions, BuildType, Manifest, ManifestError};
use gsbundle_scanner::{DeclarationScanner, ScanResult};
use std::path::Path;

/// Fatal build failures.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error("{} symbol(s) declared in multiple places", .0.duplicates.len())]
    Duplicates(ScanResult),
    #[error("could not read {}", list_unreadable(.0))]
    Unreadable(Vec<UnreadableUnit>),
    #[error("failed to remove previous output: {0}")]
    Clean(#[source] HostError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

fn list_unreadable(units: &[UnreadableUnit]) -> String {
    units
        .iter()
        .map(UnreadableUnit::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// What happened to one listed module during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOutcome {
    Included { name: String, bytes: usize },
    /// Not found on the host.
    Skipped { name: String },
}

impl ModuleOutcome {
    pub fn name(&self) -> &str {
        match self {
            ModuleOutcome::Included { name, .. } | ModuleOutcome::Skipped { name } => name,
        }
    }
}

/// Everything a successful build produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output: OutputFile,
    /// Where the artifact was written, for display.
    pub output_path: String,
    /// One entry per module in the build set, in list order.
    pub modules: Vec<ModuleOutcome>,
    /// Missing-unit warnings.
    pub diagnostics: DiagnosticCollection,
    pub scan: ScanResult,
    pub build_date: String,
    pub build_type: BuildType,
    /// Whether a previous artifact was removed first.
    pub cleaned: bool,
}

impl BuildReport {
    pub fn included_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|m| matches!(m, ModuleOutcome::Included { .. }))
            .count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().filter_map(|m| match m {
            ModuleOutcome::Skipped { name } => Some(name.as_str()),
            ModuleOutcome::Included { .. } => None,
        })
    }
}

/// The result of verify mode.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    pub report: VerifyReport,
    /// Script files in the root that nobody listed.
    pub unlisted: DiagnosticCollection,
}

/// A project: its manifest and the host its files live on.
pub struct Program {
    pub manifest: Manifest,
    host: Box<dyn SourceHost>,
    /// Fixed build timestamp; the current time is used when unset.
    build_date: Option<String>,
}

impl Program {
    pub fn new(manifest: Manifest, host: impl SourceHost + 'static) -> Self {
        Self {
            manifest,
            host: Box::new(host),
            build_date: None,
        }
    }

    /// Open the project at `root`, resolving its manifest.
    pub fn open(root: &Path, manifest_path: Option<&Path>) -> Result<Self, BuildError> {
        let manifest = Manifest::resolve(root, manifest_path)?;
        Ok(Self::new(manifest, FsHost::new(root)))
    }

    /// Stamp every artifact with this date instead of the current time.
    pub fn with_build_date(mut self, date: impl Into<String>) -> Self {
        self.build_date = Some(date.into());
        self
    }

    pub fn host(&self) -> &dyn SourceHost {
        self.host.as_ref()
    }

    /// Display path of the artifact.
    pub fn output_path(&self) -> String {
        self.host.display_path(&self.manifest.output)
    }

    fn scanner(&self) -> DeclarationScanner {
        DeclarationScanner::new(self.manifest.tracked_symbols.iter().cloned())
    }

    fn timestamp(&self) -> String {
        self.build_date
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Read the modules of a build set. A module that exists but cannot be
    /// read would slip past the declaration gate, so it fails the run.
    fn load(&self, modules: &[&str]) -> Result<UnitResolution, BuildError> {
        let resolution = resolve_units(self.host(), modules);
        if !resolution.unreadable.is_empty() {
            return Err(BuildError::Unreadable(resolution.unreadable));
        }
        Ok(resolution)
    }

    /// Scan every listed module, tests included. Missing modules are skipped.
    pub fn check_duplicates(&self) -> Result<ScanResult, BuildError> {
        let modules = self.manifest.all_modules();
        let resolution = self.load(&modules)?;
        Ok(self.scanner().scan(&resolution.units))
    }

    /// Declared dependencies that the full module order does not satisfy.
    pub fn dependency_warnings(&self) -> Vec<DependencyWarning> {
        validate_dependency_order(&self.manifest.all_modules(), &self.manifest.dependencies)
    }

    /// Report which modules of the build set exist, and which script files are unlisted.
    pub fn verify(&self, include_tests: bool) -> VerifyOutcome {
        let modules = self.manifest.modules_for(include_tests);
        VerifyOutcome {
            report: verify_modules(self.host(), &modules),
            unlisted: find_unlisted_files(self.host(), &self.manifest),
        }
    }

    /// Remove the artifact. Returns `false` if there was none.
    pub fn clean(&self) -> Result<bool, BuildError> {
        let removed = self
            .host
            .remove_file(&self.manifest.output)
            .map_err(BuildError::Clean)?;
        if removed {
            tracing::debug!(output = %self.manifest.output, "removed previous output");
        }
        Ok(removed)
    }

    /// Run a full build and write the artifact.
    ///
    /// Fails without writing anything if a module of the build set exists but
    /// cannot be read, or if a tracked symbol is declared more than once.
    pub fn build(&self, options: &BuildOptions) -> Result<BuildReport, BuildError> {
        let cleaned = if options.clean { self.clean()? } else { false };

        let modules = self.manifest.modules_for(options.include_tests);
        let resolution = self.load(&modules)?;

        let scan = self.scanner().scan(&resolution.units);
        if scan.has_duplicates() {
            tracing::debug!(duplicates = scan.duplicates.len(), "declaration gate failed");
            return Err(BuildError::Duplicates(scan));
        }

        let build_date = self.timestamp();
        let build_type = options.build_type();
        let info = BuildInfo {
            title: self.manifest.title.clone(),
            version: self.manifest.version.clone(),
            build_date: build_date.clone(),
            build_type,
            module_count: modules.len(),
            include_tests: options.include_tests,
        };

        let concatenator = Concatenator::new(self.manifest.output.clone()).with_downlevel(options.downlevel);
        let output = concatenator.concatenate(&info, &resolution.units);
        concatenator.write(self.host(), &output)?;

        let mut units = resolution.units.iter().peekable();
        let outcomes = modules
            .iter()
            .enumerate()
            .map(|(ordinal, name)| match units.next_if(|u| u.ordinal == ordinal) {
                Some(unit) => ModuleOutcome::Included {
                    name: unit.name.clone(),
                    bytes: unit.len(),
                },
                None => ModuleOutcome::Skipped { name: name.to_string() },
            })
            .collect();

        tracing::debug!(
            output = %self.manifest.output,
            bytes = output.len(),
            build_type = %build_type,
            "build complete"
        );

        Ok(BuildReport {
            output,
            output_path: self.output_path(),
            modules: outcomes,
            diagnostics: resolution.diagnostics,
            scan,
            build_date,
            build_type,
            cleaned,
        })
    }
}
