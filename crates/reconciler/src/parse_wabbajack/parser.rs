//! Wabbajack modlist JSON parser
//!
//! This module handles parsing the Wabbajack modlist JSON format and converting
//! it into an ArchiveManifest of expected archive names.

use crate::parse_wabbajack::manifest::{ArchiveManifest, ManifestMetadata};
use serde::Deserialize;

/// Raw modlist JSON structure as it appears in the file
#[derive(Debug, Deserialize)]
pub struct WabbaModlist {
    #[serde(rename = "Archives")]
    pub archives: Vec<Archive>,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Version", default)]
    pub version: String,
    #[serde(rename = "Author", default)]
    pub author: String,
    #[serde(rename = "GameName", default)]
    pub game: String,
}

/// Raw archive entry from the JSON
///
/// Only the name takes part in reconciliation; the size feeds the
/// download total shown to the user.
#[derive(Debug, Deserialize, Clone)]
pub struct Archive {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Size", default)]
    pub size: u64,
}

/// Parser for Wabbajack modlists
#[derive(Debug, Default)]
pub struct ModlistParser;

impl ModlistParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a modlist JSON byte slice into an ArchiveManifest
    pub fn parse_slice(&self, json: &[u8]) -> Result<ArchiveManifest, ParseError> {
        let raw_modlist: WabbaModlist = serde_json::from_slice(json)?;
        Ok(self.build_manifest(raw_modlist))
    }

    /// Parse a modlist JSON string into an ArchiveManifest
    pub fn parse(&self, json: &str) -> Result<ArchiveManifest, ParseError> {
        self.parse_slice(json.as_bytes())
    }

    fn build_manifest(&self, raw_modlist: WabbaModlist) -> ArchiveManifest {
        let metadata = ManifestMetadata {
            name: raw_modlist.name,
            version: raw_modlist.version,
            author: raw_modlist.author,
            game: raw_modlist.game,
        };

        let mut manifest = ArchiveManifest::new();
        manifest.metadata = metadata;
        manifest.add_archives(raw_modlist.archives);
        manifest
    }
}

/// Errors that can occur during parsing
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parsing error: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

/// Convenience function to parse a modlist JSON string
pub fn parse_modlist(json: &str) -> Result<ArchiveManifest, ParseError> {
    ModlistParser::new().parse(json)
}
