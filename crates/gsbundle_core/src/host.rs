//! Source hosts: where unit text comes from and where artifacts go.
//!
//! Every phase reads through a [`SourceHost`] so the build can run against
//! the real project directory ([`FsHost`]) or a synthetic unit set held in
//! memory ([`MemoryHost`]).

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while reading or writing through a host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to remove '{path}': {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to list '{path}': {source}")]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Access to unit files and the output artifact.
pub trait SourceHost {
    /// Read a file by name. Returns `Ok(None)` if the file does not exist.
    fn read_file(&self, name: &str) -> Result<Option<String>, HostError>;

    /// Whether a file with this name exists.
    fn file_exists(&self, name: &str) -> bool;

    /// Write (or overwrite) a file.
    fn write_file(&self, name: &str, contents: &str) -> Result<(), HostError>;

    /// Remove a file. Returns `Ok(false)` if there was nothing to remove.
    fn remove_file(&self, name: &str) -> Result<bool, HostError>;

    /// Names of all regular files directly in the host root, sorted.
    fn list_files(&self) -> Result<Vec<String>, HostError>;

    /// A displayable location for a file name.
    fn display_path(&self, name: &str) -> String {
        name.to_string()
    }
}

/// A host backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsHost {
    root: PathBuf,
}

impl FsHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl SourceHost for FsHost {
    fn read_file(&self, name: &str) -> Result<Option<String>, HostError> {
        let path = self.path_of(name);
        match std::fs::read(&path) {
            // Invalid UTF-8 sequences become U+FFFD so every present unit can be scanned.
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(HostError::Read { path, source }),
        }
    }

    fn file_exists(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }

    fn write_file(&self, name: &str, contents: &str) -> Result<(), HostError> {
        let path = self.path_of(name);
        tracing::debug!(path = %path.display(), bytes = contents.len(), "writing file");
        std::fs::write(&path, contents).map_err(|source| HostError::Write { path, source })
    }

    fn remove_file(&self, name: &str) -> Result<bool, HostError> {
        let path = self.path_of(name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(HostError::Remove { path, source }),
        }
    }

    fn list_files(&self) -> Result<Vec<String>, HostError> {
        let entries = std::fs::read_dir(&self.root).map_err(|source| HostError::List {
            path: self.root.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn display_path(&self, name: &str) -> String {
        self.path_of(name).to_string_lossy().to_string()
    }
}

/// An in-memory host for synthetic unit sets.
#[derive(Debug, Default)]
pub struct MemoryHost {
    files: RefCell<FxHashMap<String, String>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn add_file(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.files.get_mut().insert(name.into(), text.into());
    }

    /// Builder form of [`MemoryHost::add_file`].
    pub fn with_file(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.add_file(name, text);
        self
    }

    /// Current contents of a file, if present.
    pub fn contents(&self, name: &str) -> Option<String> {
        self.files.borrow().get(name).cloned()
    }
}

impl SourceHost for MemoryHost {
    fn read_file(&self, name: &str) -> Result<Option<String>, HostError> {
        Ok(self.contents(name))
    }

    fn file_exists(&self, name: &str) -> bool {
        self.files.borrow().contains_key(name)
    }

    fn write_file(&self, name: &str, contents: &str) -> Result<(), HostError> {
        self.files
            .borrow_mut()
            .insert(name.to_string(), contents.to_string());
        Ok(())
    }

    fn remove_file(&self, name: &str) -> Result<bool, HostError> {
        Ok(self.files.borrow_mut().remove(name).is_some())
    }

    fn list_files(&self) -> Result<Vec<String>, HostError> {
        let mut names: Vec<String> = self.files.borrow().keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
