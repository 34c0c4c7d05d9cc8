//! gsbundle_core: Core types for the gsbundle Apps Script bundler.
//!
//! Provides source units, line iteration helpers, and the source host
//! abstraction used by every build phase to read module files.

pub mod host;
pub mod text;
pub mod unit;

// Re-export commonly used types
pub use host::{FsHost, HostError, MemoryHost, SourceHost};
pub use text::{format_kb, numbered_lines, LineNumber};
pub use unit::SourceUnit;
