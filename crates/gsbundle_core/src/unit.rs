//! Source units: one module file taking part in a build.

/// A module read from the source host.
///
/// Units are read once per build and never modified afterwards. The ordinal
/// is the unit's index in the manifest's module list, not its index among
/// the units that were actually found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// The unit identifier, e.g. `Constants.gs`.
    pub name: String,
    /// Position of the unit in the ordered module list.
    pub ordinal: usize,
    /// Raw file contents.
    pub text: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, ordinal: usize, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordinal,
            text: text.into(),
        }
    }

    /// Size of the unit text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
