//! Archive configuration for jar-archiver.
//!
//! This module defines the configuration model read from the `archive:`
//! section of a build descriptor. It supports forward-compatible YAML parsing
//! (unknown fields are ignored), sensible defaults for optional fields, and
//! validation of the classpath layout selection.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{ArchiveConfiguration, BuildDescriptor, ManifestConfiguration, ManifestSection};
pub use types::ClasspathLayout;
