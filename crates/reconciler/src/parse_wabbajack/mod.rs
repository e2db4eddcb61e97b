//! Wabbajack modlist parsing
//!
//! This module opens `.wabbajack` files, parses the embedded modlist JSON and
//! reduces it to the archive names a downloads folder is expected to hold.

pub mod archive;
pub mod manifest;
pub mod parser;

// Re-export main types
pub use archive::WabbajackFile;
pub use manifest::{ArchiveManifest, ManifestMetadata, ManifestStats};
pub use parser::{parse_modlist, ModlistParser, ParseError};
