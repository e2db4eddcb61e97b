//! Archive manifest types
//!
//! The manifest is the parsed modlist reduced to what reconciliation needs:
//! the archive names the modlist expects to find in the downloads folder.

use crate::parse_wabbajack::parser::Archive;
use std::collections::HashSet;

/// Archive names declared by one or more modlists
#[derive(Debug, Clone, Default)]
pub struct ArchiveManifest {
    /// Archive names in declaration order, duplicates included
    pub names: Vec<String>,
    /// Declared size of each entry in `names`
    pub sizes: Vec<u64>,
    /// Manifest metadata
    pub metadata: ManifestMetadata,
    /// Archive statistics
    pub stats: ManifestStats,
}

/// Metadata about the entire manifest
#[derive(Debug, Clone, Default)]
pub struct ManifestMetadata {
    /// Modlist name
    pub name: String,
    /// Modlist version
    pub version: String,
    /// Modlist author
    pub author: String,
    /// Game the modlist is for
    pub game: String,
}

/// Statistics about the manifest archives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestStats {
    /// Number of archive entries, duplicates included
    pub total_archives: usize,
    /// Number of distinct archive names
    pub distinct_names: usize,
    /// Sum of declared archive sizes in bytes
    pub total_download_size: u64,
}

impl ArchiveManifest {
    /// Create a new empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manifest from bare archive names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut manifest = Self::new();
        manifest.names = names.into_iter().map(Into::into).collect();
        manifest.sizes = vec![0; manifest.names.len()];
        manifest.update_stats();
        manifest
    }

    /// Add parsed archive entries to the manifest
    pub fn add_archives(&mut self, archives: Vec<Archive>) {
        for archive in archives {
            self.names.push(archive.name);
            self.sizes.push(archive.size);
        }
        self.update_stats();
    }

    /// Recount statistics from the entries
    pub fn update_stats(&mut self) {
        self.stats.total_archives = self.names.len();
        self.stats.distinct_names = self.names.iter().collect::<HashSet<_>>().len();
        self.stats.total_download_size = self.sizes.iter().sum();
    }

    /// Merge another manifest into this one
    ///
    /// Names of `self` are kept as they are. Names of `other` are appended in
    /// their order unless already present, so the first occurrence wins.
    /// Metadata of `self` is kept.
    pub fn union(mut self, other: &ArchiveManifest) -> ArchiveManifest {
        let mut seen: HashSet<String> = self.names.iter().cloned().collect();

        for (name, size) in other.names.iter().zip(&other.sizes) {
            if seen.insert(name.clone()) {
                self.names.push(name.clone());
                self.sizes.push(*size);
            }
        }

        self.update_stats();
        self
    }

    /// Archive names sorted, duplicates kept
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names = self.names.clone();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ManifestStats {
    /// Get total download size in human readable format
    pub fn total_download_size_human(&self) -> String {
        let size = self.total_download_size as f64;
        if size < 1024.0 {
            format!("{} B", size)
        } else if size < 1024.0 * 1024.0 {
            format!("{:.1} KB", size / 1024.0)
        } else if size < 1024.0 * 1024.0 * 1024.0 {
            format!("{:.1} MB", size / (1024.0 * 1024.0))
        } else {
            format!("{:.1} GB", size / (1024.0 * 1024.0 * 1024.0))
        }
    }
}
