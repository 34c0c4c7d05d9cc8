//! gsbundle_emitter: Artifact output.
//!
//! Coordinates artifact generation:
//! 1. Render the build banner
//! 2. Append each unit wrapped in a boundary banner, in list order
//! 3. Run text transforms (downleveling) if requested
//! 4. Write the artifact through the source host

mod banner;

pub use banner::{render_header, render_unit, BuildInfo, RULE_WIDTH};

use gsbundle_core::{HostError, SourceHost, SourceUnit};
use gsbundle_transformers::{apply_all, DestructuringDownlevel, Transformer};

/// Errors raised while writing the artifact.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("error writing output file: {0}")]
    Write(#[from] HostError),
}

/// A unit that made it into the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedUnit {
    pub name: String,
    /// Position in the module list.
    pub ordinal: usize,
    /// Size of the unit text in bytes.
    pub bytes: usize,
}

/// The file produced by the emitter.
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// Artifact name relative to the host root.
    pub name: String,
    /// The content of the file.
    pub text: String,
    /// Units included, in order.
    pub units: Vec<EmittedUnit>,
    /// Rewrites made by text transforms.
    pub rewrites: usize,
}

impl OutputFile {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Builds the artifact text from loaded units.
pub struct Concatenator {
    /// Artifact name relative to the host root.
    pub output: String,
    /// Whether to downlevel destructured callback parameters.
    pub downlevel: bool,
}

impl Concatenator {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            downlevel: false,
        }
    }

    pub fn with_downlevel(mut self, downlevel: bool) -> Self {
        self.downlevel = downlevel;
        self
    }

    /// Concatenate `units` in the given order under the build banner.
    pub fn concatenate(&self, info: &BuildInfo, units: &[SourceUnit]) -> OutputFile {
        let capacity = units.iter().map(SourceUnit::len).sum::<usize>() + 512 * (units.len() + 1);
        let mut text = String::with_capacity(capacity);
        text.push_str(&render_header(info));

        let mut emitted = Vec::with_capacity(units.len());
        for unit in units {
            text.push_str(&render_unit(&unit.name, &unit.text));
            emitted.push(EmittedUnit {
                name: unit.name.clone(),
                ordinal: unit.ordinal,
                bytes: unit.len(),
            });
        }

        let mut rewrites = 0;
        if self.downlevel {
            let transformers: [&dyn Transformer; 1] = [&DestructuringDownlevel];
            let transformed = apply_all(&transformers, &text);
            text = transformed.text;
            rewrites = transformed.rewrites;
        }

        tracing::debug!(units = emitted.len(), bytes = text.len(), rewrites, "concatenated artifact");

        OutputFile {
            name: self.output.clone(),
            text,
            units: emitted,
            rewrites,
        }
    }

    /// Write the artifact, overwriting any previous one.
    pub fn write(&self, host: &dyn SourceHost, output: &OutputFile) -> Result<(), EmitError> {
        host.write_file(&output.name, &output.text)?;
        Ok(())
    }
}
