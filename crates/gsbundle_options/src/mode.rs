//! Build mode and option resolution.

use std::fmt;

/// The terminal action of one invocation.
///
/// Exactly one mode runs per invocation. When several are requested the
/// first in precedence order wins: help, check-duplicates, verify, build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Help,
    CheckDuplicates,
    Verify,
    Build,
}

impl BuildMode {
    pub fn resolve(help: bool, check_duplicates: bool, verify: bool) -> Self {
        if help {
            BuildMode::Help
        } else if check_duplicates {
            BuildMode::CheckDuplicates
        } else if verify {
            BuildMode::Verify
        } else {
            BuildMode::Build
        }
    }
}

/// Options that combine with any mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Include test modules (false in production builds).
    pub include_tests: bool,
    /// Suppress progress output.
    pub quiet: bool,
    /// Remove the previous artifact before building.
    pub clean: bool,
    /// Rewrite destructured callback parameters for the legacy runtime.
    pub downlevel: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            include_tests: true,
            quiet: false,
            clean: false,
            downlevel: false,
        }
    }
}

impl BuildOptions {
    /// The build type label used in banners and reports.
    pub fn build_type(&self) -> BuildType {
        if self.include_tests {
            BuildType::Development
        } else {
            BuildType::Production
        }
    }
}

/// Whether an artifact carries test modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    Development,
    Production,
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Development => write!(f, "DEVELOPMENT"),
            BuildType::Production => write!(f, "PRODUCTION"),
        }
    }
}
