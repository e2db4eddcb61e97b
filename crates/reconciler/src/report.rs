//! Human-readable report files
//!
//! Every list a run computes is written out as newline-delimited text so it
//! can be audited before or after anything is deleted. The expected and local
//! lists are appended to; the keep and delete lists are rewritten each run.

use crate::config::ReportFiles;
use crate::core::{FileOperation, ReconcileError, Result};
use crate::reconcile::Reconciliation;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Writes and reads back the report files of one run
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
    files: ReportFiles,
}

impl ReportWriter {
    pub fn new<P: Into<PathBuf>>(dir: P, files: ReportFiles) -> Self {
        Self { dir: dir.into(), files }
    }

    pub fn expected_path(&self) -> PathBuf {
        self.dir.join(&self.files.expected)
    }

    pub fn local_path(&self) -> PathBuf {
        self.dir.join(&self.files.local)
    }

    pub fn delete_path(&self) -> PathBuf {
        self.dir.join(&self.files.delete)
    }

    pub fn keep_path(&self) -> PathBuf {
        self.dir.join(&self.files.keep)
    }

    /// Append the expected names
    pub fn write_expected<S: AsRef<str>>(&self, names: &[S]) -> Result<PathBuf> {
        let path = self.expected_path();
        write_lines(&path, names, true)?;
        Ok(path)
    }

    /// Append the local names
    pub fn write_local<S: AsRef<str>>(&self, names: &[S]) -> Result<PathBuf> {
        let path = self.local_path();
        write_lines(&path, names, true)?;
        Ok(path)
    }

    /// Rewrite the delete and keep lists from a partition
    pub fn write_partition(&self, result: &Reconciliation) -> Result<Vec<PathBuf>> {
        let delete = self.delete_path();
        let keep = self.keep_path();
        write_lines(&delete, &result.delete, false)?;
        write_lines(&keep, &result.keep, false)?;
        Ok(vec![delete, keep])
    }

    /// Read the recorded keep list back from disk
    pub fn read_keep(&self) -> Result<Vec<String>> {
        let path = self.keep_path();
        let file = File::open(&path)
            .map_err(|e| ReconcileError::file_system(&path, FileOperation::Read, e))?;

        BufReader::new(file)
            .lines()
            .map(|line| {
                line.map_err(|e| ReconcileError::file_system(&path, FileOperation::Read, e))
            })
            .collect()
    }

    /// Remove the expected and local lists
    ///
    /// The keep and delete lists stay behind for manual inspection. Files that
    /// are already gone are skipped. Returns the files actually removed.
    pub fn remove_support_files(&self) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();

        for path in [self.local_path(), self.expected_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!("Removed support file {}", path.display());
                    removed.push(path);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!("Support file {} was already gone", path.display());
                }
                Err(e) => return Err(ReconcileError::file_system(&path, FileOperation::Delete, e)),
            }
        }

        Ok(removed)
    }

    /// Report files left in place after support-file cleanup
    pub fn kept_reports(&self) -> Vec<PathBuf> {
        [self.delete_path(), self.keep_path()]
            .into_iter()
            .filter(|path| path.exists())
            .collect()
    }
}

fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S], append: bool) -> Result<()> {
    let file = if append {
        OpenOptions::new().create(true).append(true).open(path)
    } else {
        File::create(path)
    }
    .map_err(|e| ReconcileError::file_system(path, FileOperation::Create, e))?;

    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref())
            .map_err(|e| ReconcileError::file_system(path, FileOperation::Write, e))?;
    }
    writer
        .flush()
        .map_err(|e| ReconcileError::file_system(path, FileOperation::Write, e))?;

    debug!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn partition_of(keep: &[&str], delete: &[&str]) -> Reconciliation {
        Reconciliation {
            keep: keep.iter().map(|s| s.to_string()).collect(),
            delete: delete.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_expected_and_local_lists_append() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path(), ReportFiles::single());

        writer.write_expected(&["a.zip", "b.zip"]).unwrap();
        writer.write_expected(&["c.zip"]).unwrap();
        writer.write_local(&["x.zip"]).unwrap();

        let expected = fs::read_to_string(dir.path().join("sorted_wabbajack_mods.txt")).unwrap();
        assert_eq!(expected, "a.zip\nb.zip\nc.zip\n");
        let local = fs::read_to_string(dir.path().join("sorted_local_mods.txt")).unwrap();
        assert_eq!(local, "x.zip\n");
    }

    #[test]
    fn test_partition_lists_are_rewritten() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path(), ReportFiles::merged());

        writer.write_partition(&partition_of(&["a.zip", "b.zip"], &["old.zip"])).unwrap();
        let paths = writer.write_partition(&partition_of(&["a.zip"], &[])).unwrap();

        assert_eq!(paths[0], dir.path().join("merged_to_be_deleted.txt"));
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "");
        assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "a.zip\n");
        assert_eq!(writer.read_keep().unwrap(), vec!["a.zip"]);
    }

    #[test]
    fn test_remove_support_files_keeps_partition_lists() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path(), ReportFiles::single());

        writer.write_local(&["a.zip"]).unwrap();
        writer.write_partition(&partition_of(&["a.zip"], &[])).unwrap();

        let removed = writer.remove_support_files().unwrap();
        assert_eq!(removed, vec![writer.local_path()]);
        assert!(!writer.local_path().exists());
        assert_eq!(writer.kept_reports(), vec![writer.delete_path(), writer.keep_path()]);
    }

    #[test]
    fn test_read_keep_without_file() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("missing"), ReportFiles::single());
        assert!(matches!(
            writer.read_keep(),
            Err(ReconcileError::FileSystem { operation: FileOperation::Read, .. })
        ));
    }
}
