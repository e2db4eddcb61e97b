//! Reading the modlist manifest out of a `.wabbajack` file
//!
//! A `.wabbajack` file is a zip container; the manifest is the JSON entry
//! named `modlist` at its root.

use crate::core::{ArchiveProblem, ReconcileError, Result};
use crate::parse_wabbajack::manifest::ArchiveManifest;
use crate::parse_wabbajack::parser::ModlistParser;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A modlist archive path that passed the extension check
#[derive(Debug, Clone, PartialEq)]
pub struct WabbajackFile {
    path: PathBuf,
}

impl WabbajackFile {
    /// Accept `path` if its file name ends with `.<extension>`
    ///
    /// The check is a plain case-sensitive suffix test on the file name.
    pub fn new<P: Into<PathBuf>>(path: P, extension: &str) -> Result<Self> {
        let path = path.into();
        let suffix = format!(".{}", extension);
        let accepted = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&suffix));

        if !accepted {
            return Err(ReconcileError::NotAWabbajackFile {
                path,
                extension: extension.to_string(),
            });
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw bytes of the manifest entry
    pub fn read_manifest_bytes(&self, entry_name: &str) -> Result<Vec<u8>> {
        let file = File::open(&self.path).map_err(|e| {
            ReconcileError::archive_format(&self.path, ArchiveProblem::Unreadable(e))
        })?;
        let reader = BufReader::new(file);

        let mut archive = zip::ZipArchive::new(reader)
            .map_err(|e| ReconcileError::archive_format(&self.path, ArchiveProblem::NotAZip(e)))?;
        debug!("Opened {} ({} entries)", self.path.display(), archive.len());

        let mut entry = match archive.by_name(entry_name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(ReconcileError::archive_format(
                    &self.path,
                    ArchiveProblem::MissingManifest(entry_name.to_string()),
                ));
            }
            Err(e) => {
                return Err(ReconcileError::archive_format(&self.path, ArchiveProblem::NotAZip(e)));
            }
        };

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| {
                ReconcileError::archive_format(&self.path, ArchiveProblem::ManifestUnreadable(e))
            })?;
        debug!("Read {} bytes of '{}'", bytes.len(), entry_name);

        Ok(bytes)
    }

    /// Extract and parse the manifest entry
    pub fn read_manifest(&self, entry_name: &str) -> Result<ArchiveManifest> {
        let bytes = self.read_manifest_bytes(entry_name)?;
        ModlistParser::new()
            .parse_slice(&bytes)
            .map_err(|e| {
                ReconcileError::archive_format(&self.path, ArchiveProblem::InvalidManifest(e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn create_test_archive(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);

        for (entry_name, content) in entries {
            writer.start_file(entry_name.to_string(), options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_extension_check() {
        assert!(WabbajackFile::new("lists/Baseline.wabbajack", "wabbajack").is_ok());
        assert!(WabbajackFile::new("Baseline.zip", "wabbajack").is_err());
        assert!(WabbajackFile::new("Baseline.WABBAJACK", "wabbajack").is_err());

        let err = WabbajackFile::new("Baseline.wabbajack.bak", "wabbajack").unwrap_err();
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_read_manifest() {
        let dir = tempdir().unwrap();
        let json =
            br#"{ "Name": "Tiny", "Archives": [ { "Name": "b.zip" }, { "Name": "a.zip" } ] }"#;
        let path = create_test_archive(
            dir.path(),
            "tiny.wabbajack",
            &[("modlist", json), ("banner.png", b"\x89PNG")],
        );

        let manifest = WabbajackFile::new(&path, "wabbajack")
            .unwrap()
            .read_manifest("modlist")
            .unwrap();

        assert_eq!(manifest.names, vec!["b.zip", "a.zip"]);
        assert_eq!(manifest.metadata.name, "Tiny");
    }

    #[test]
    fn test_missing_manifest_entry() {
        let dir = tempdir().unwrap();
        let path = create_test_archive(dir.path(), "empty.wabbajack", &[("readme.txt", b"hi")]);

        let err = WabbajackFile::new(&path, "wabbajack")
            .unwrap()
            .read_manifest("modlist")
            .unwrap_err();

        assert!(matches!(
            err,
            ReconcileError::ArchiveFormat { problem: ArchiveProblem::MissingManifest(_), .. }
        ));
    }

    #[test]
    fn test_invalid_manifest_json() {
        let dir = tempdir().unwrap();
        let path = create_test_archive(
            dir.path(),
            "bad.wabbajack",
            &[("modlist", b"{ \"Archives\": 5 }")],
        );

        let err = WabbajackFile::new(&path, "wabbajack")
            .unwrap()
            .read_manifest("modlist")
            .unwrap_err();

        assert!(matches!(
            err,
            ReconcileError::ArchiveFormat { problem: ArchiveProblem::InvalidManifest(_), .. }
        ));
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.wabbajack");
        std::fs::write(&path, b"definitely not a zip").unwrap();

        let err = WabbajackFile::new(&path, "wabbajack")
            .unwrap()
            .read_manifest("modlist")
            .unwrap_err();

        assert!(matches!(
            err,
            ReconcileError::ArchiveFormat { problem: ArchiveProblem::NotAZip(_), .. }
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = WabbajackFile::new(dir.path().join("gone.wabbajack"), "wabbajack")
            .unwrap()
            .read_manifest("modlist")
            .unwrap_err();

        assert!(matches!(
            err,
            ReconcileError::ArchiveFormat { problem: ArchiveProblem::Unreadable(_), .. }
        ));
    }
}
