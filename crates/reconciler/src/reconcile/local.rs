//! Expected and local name sets

use crate::core::{FileOperation, ReconcileError, Result};
use crate::parse_wabbajack::ArchiveManifest;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Sorted, deduplicated archive names the modlist expects, with a hash index
#[derive(Debug, Clone, Default)]
pub struct ExpectedSet {
    names: Vec<String>,
    index: HashSet<String>,
}

impl ExpectedSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index: HashSet<String> = names.into_iter().map(Into::into).collect();
        let mut names: Vec<String> = index.iter().cloned().collect();
        names.sort();
        Self { names, index }
    }

    /// Exact, case-sensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<&ArchiveManifest> for ExpectedSet {
    fn from(manifest: &ArchiveManifest) -> Self {
        ExpectedSet::new(manifest.names.iter().cloned())
    }
}

/// Sorted names present in a downloads directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalFileSet {
    names: Vec<String>,
}

impl LocalFileSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        Self { names }
    }

    /// List every entry name in `dir`
    ///
    /// Subdirectories are listed as well. Names that are not valid UTF-8 can
    /// never match a manifest entry and are skipped.
    pub fn scan(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ReconcileError::DirectoryNotFound { path: dir.to_path_buf() });
        }

        let entries = fs::read_dir(dir)
            .map_err(|e| ReconcileError::file_system(dir, FileOperation::ListDir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| ReconcileError::file_system(dir, FileOperation::ListDir, e))?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!("Skipping non UTF-8 file name in {}: {:?}", dir.display(), raw),
            }
        }

        debug!("Scanned {}: {} entries", dir.display(), names.len());
        Ok(Self::new(names))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
