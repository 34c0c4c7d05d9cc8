//! gsbundle_options: Build manifest and build options.
//!
//! The manifest is the hand-maintained configuration of a bundle: which
//! modules exist, in what order they load, what each one depends on, and
//! which top-level constants must be declared exactly once. It can be read
//! from a `gsbundle.json` file; anything the file leaves out falls back to
//! the built-in manifest.

mod defaults;
mod mode;

pub use mode::{BuildMode, BuildOptions, BuildType};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project root when no manifest is given.
pub const MANIFEST_FILE_NAME: &str = "gsbundle.json";

/// Errors raised while loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("module '{0}' is listed more than once")]
    DuplicateModule(String),
    #[error("manifest output file name is empty")]
    EmptyOutput,
}

/// The bundle manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manifest {
    /// Project title shown in the artifact banner.
    pub title: String,
    /// Semantic version stamped into the artifact banner.
    pub version: String,
    /// Artifact file name, relative to the project root.
    pub output: String,
    /// Production modules, in load order (dependencies first).
    pub core_modules: Vec<String>,
    /// Test modules, loaded after every core module. Excluded in production builds.
    pub test_modules: Vec<String>,
    /// Declared dependencies: unit -> units it requires.
    pub dependencies: IndexMap<String, Vec<String>>,
    /// Constants that must have a single top-level declaration.
    pub tracked_symbols: Vec<String>,
    /// Files in the project root that are never part of the build.
    pub excluded_files: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        defaults::dashboard_manifest()
    }
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = serde_json::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded manifest");
        Self::from_json(&content)
    }

    /// Resolve the manifest for a project root.
    ///
    /// An explicit path wins. Otherwise `gsbundle.json` in `root` is used if
    /// present, and the built-in manifest if not.
    pub fn resolve(root: &Path, explicit: Option<&Path>) -> Result<Self, ManifestError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = root.join(MANIFEST_FILE_NAME);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        tracing::debug!("no manifest file found, using built-in manifest");
        Ok(Self::default())
    }

    /// Check that no module is listed twice and the output name is set.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.output.trim().is_empty() {
            return Err(ManifestError::EmptyOutput);
        }
        let mut seen = FxHashSet::default();
        for name in self.all_modules() {
            if !seen.insert(name) {
                return Err(ManifestError::DuplicateModule(name.to_string()));
            }
        }
        Ok(())
    }

    /// Every module in load order: core modules, then test modules.
    pub fn all_modules(&self) -> Vec<&str> {
        self.core_modules
            .iter()
            .chain(self.test_modules.iter())
            .map(String::as_str)
            .collect()
    }

    /// The modules taking part in a build, with or without test modules.
    pub fn modules_for(&self, include_tests: bool) -> Vec<&str> {
        if include_tests {
            self.all_modules()
        } else {
            self.core_modules.iter().map(String::as_str).collect()
        }
    }

    pub fn is_test_module(&self, name: &str) -> bool {
        self.test_modules.iter().any(|m| m == name)
    }

    pub fn is_listed(&self, name: &str) -> bool {
        self.core_modules.iter().chain(self.test_modules.iter()).any(|m| m == name)
    }

    /// Whether a root file is deliberately kept out of the build.
    /// The output artifact always counts as excluded.
    pub fn is_excluded(&self, name: &str) -> bool {
        name == self.output || self.excluded_files.iter().any(|f| f == name)
    }
}
