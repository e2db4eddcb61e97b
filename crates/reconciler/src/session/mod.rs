//! One reconciliation run from modlist archive(s) to optional deletion
//!
//! The run is strictly linear: load manifest(s), merge, list the downloads
//! directory, partition, verify, then ask before deleting anything. All
//! questions go through a [`Prompter`] so the run can be driven without a
//! console.

use crate::cleanup;
use crate::config::ReconcileConfig;
use crate::core::{EventCallback, ReconcileError, ReconcileEvent, Result};
use crate::parse_wabbajack::{ArchiveManifest, WabbajackFile};
use crate::reconcile::{self, ExpectedSet, LocalFileSet, Reconciliation};
use crate::report::ReportWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The modlist archive(s) a run reconciles against
#[derive(Debug, Clone, PartialEq)]
pub enum ModlistSources {
    Single(WabbajackFile),
    Merge(WabbajackFile, WabbajackFile),
}

impl ModlistSources {
    /// Validate one modlist archive path
    pub fn single<P: Into<PathBuf>>(path: P, config: &ReconcileConfig) -> Result<Self> {
        Ok(ModlistSources::Single(WabbajackFile::new(path, &config.archive_extension)?))
    }

    /// Validate two modlist archive paths
    pub fn merge<P, Q>(first: P, second: Q, config: &ReconcileConfig) -> Result<Self>
    where
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        Ok(ModlistSources::Merge(
            WabbajackFile::new(first, &config.archive_extension)?,
            WabbajackFile::new(second, &config.archive_extension)?,
        ))
    }

    pub fn files(&self) -> Vec<&WabbajackFile> {
        match self {
            ModlistSources::Single(file) => vec![file],
            ModlistSources::Merge(first, second) => vec![first, second],
        }
    }
}

/// A yes/no question asked during a run
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    /// Delete local files the modlist does not reference
    DeleteOutOfSync { count: usize },
    /// Delete the expected and local list files
    DeleteSupportFiles,
}

impl Confirmation {
    pub fn question(&self) -> String {
        match self {
            Confirmation::DeleteOutOfSync { count } => format!(
                "Do you want to delete the {} mods that are not in sync \
                 with the wabbajack modlist?",
                count
            ),
            Confirmation::DeleteSupportFiles => {
                "Do you want to delete the support files?".to_string()
            }
        }
    }
}

/// Source of the answers a run needs from its user
pub trait Prompter {
    /// Path of the local downloads directory
    fn local_mods_dir(&mut self) -> Result<PathBuf>;

    /// Answer a yes/no question; the safe answer is `false`
    fn confirm(&mut self, confirmation: &Confirmation) -> Result<bool>;
}

/// What a run found and did
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Archive entries in the (merged) manifest
    pub manifest_archives: usize,
    /// Distinct expected names
    pub expected: usize,
    pub directory: PathBuf,
    pub directory_missing: bool,
    pub reconciliation: Option<Reconciliation>,
    /// Result of the keep-list cross-check, if reconciliation ran
    pub verified: Option<bool>,
    pub removed: Vec<PathBuf>,
    pub support_files_removed: Vec<PathBuf>,
}

/// A configured reconciliation run
pub struct Session {
    config: ReconcileConfig,
    sources: ModlistSources,
    events: Option<EventCallback>,
}

impl Session {
    pub fn new(config: ReconcileConfig, sources: ModlistSources) -> Self {
        Self {
            config,
            sources,
            events: None,
        }
    }

    /// Set the event callback and return self for chaining
    pub fn with_events(mut self, events: EventCallback) -> Self {
        self.events = Some(events);
        self
    }

    fn emit(&self, event: ReconcileEvent) {
        if let Some(callback) = &self.events {
            callback(event);
        }
    }

    fn reports(&self) -> Option<ReportWriter> {
        self.config
            .write_reports
            .then(|| ReportWriter::new(&self.config.report_dir, self.config.reports.clone()))
    }

    /// Read every source manifest and merge them in order
    pub fn load_manifest(&self) -> Result<ArchiveManifest> {
        let mut merged: Option<ArchiveManifest> = None;

        for file in self.sources.files() {
            let manifest = file.read_manifest(&self.config.manifest_entry)?;
            info!("Loaded {} archives from {}", manifest.len(), file.path().display());
            self.emit(ReconcileEvent::ManifestLoaded {
                path: file.path().to_path_buf(),
                metadata: manifest.metadata.clone(),
                stats: manifest.stats.clone(),
            });

            merged = Some(match merged {
                None => manifest,
                Some(first) => {
                    let first_len = first.len();
                    let union = first.union(&manifest);
                    self.emit(ReconcileEvent::ManifestsMerged {
                        first: first_len,
                        second: manifest.len(),
                        merged: union.stats.clone(),
                    });
                    union
                }
            });
        }

        Ok(merged.unwrap_or_default())
    }

    /// Execute the whole run
    pub fn run(&self, prompter: &mut dyn Prompter) -> Result<RunSummary> {
        let manifest = self.load_manifest()?;
        let expected = ExpectedSet::from(&manifest);
        let reports = self.reports();

        let mut summary = RunSummary {
            manifest_archives: manifest.len(),
            expected: expected.len(),
            ..RunSummary::default()
        };

        if let Some(writer) = &reports {
            let path = writer.write_expected(&manifest.sorted_names())?;
            self.emit(ReconcileEvent::ReportWritten { path });
        }

        let dir = prompter.local_mods_dir()?;
        summary.directory = dir.clone();

        match LocalFileSet::scan(&dir) {
            Ok(local) => self.reconcile_directory(
                &dir,
                &expected,
                &local,
                reports.as_ref(),
                prompter,
                &mut summary,
            )?,
            Err(ReconcileError::DirectoryNotFound { path }) => {
                info!("Downloads directory {} not found, skipping reconciliation", path.display());
                summary.directory_missing = true;
                self.emit(ReconcileEvent::DirectoryMissing { path });
            }
            Err(e) => return Err(e),
        }

        if let Some(writer) = &reports {
            if prompter.confirm(&Confirmation::DeleteSupportFiles)? {
                summary.support_files_removed = writer.remove_support_files()?;
                self.emit(ReconcileEvent::SupportFilesRemoved {
                    files: summary.support_files_removed.len(),
                });
            }
        }

        self.emit(ReconcileEvent::Finished {
            reports_kept: reports.map(|writer| writer.kept_reports()).unwrap_or_default(),
        });

        Ok(summary)
    }

    fn reconcile_directory(
        &self,
        dir: &Path,
        expected: &ExpectedSet,
        local: &LocalFileSet,
        reports: Option<&ReportWriter>,
        prompter: &mut dyn Prompter,
        summary: &mut RunSummary,
    ) -> Result<()> {
        self.emit(ReconcileEvent::LocalScanComplete {
            path: dir.to_path_buf(),
            files: local.len(),
        });

        let result = reconcile::reconcile(expected, local);
        self.emit(ReconcileEvent::Partitioned {
            keep: result.keep.len(),
            delete: result.delete.len(),
        });

        let verified = match reports {
            Some(writer) => {
                let path = writer.write_local(local.names())?;
                self.emit(ReconcileEvent::ReportWritten { path });
                for path in writer.write_partition(&result)? {
                    self.emit(ReconcileEvent::ReportWritten { path });
                }
                let recorded = writer.read_keep()?;
                reconcile::verify(expected, &recorded, result.keep.len())
            }
            None => result.verify(expected),
        };
        debug!("Verification result: {}", verified);
        self.emit(ReconcileEvent::VerificationComplete { passed: verified });
        summary.verified = Some(verified);

        if verified && !result.delete.is_empty() {
            let confirmation = Confirmation::DeleteOutOfSync { count: result.delete.len() };
            if prompter.confirm(&confirmation)? {
                summary.removed = cleanup::remove_files(dir, &result.delete, self.events.as_ref())?;
                self.emit(ReconcileEvent::RemovalComplete {
                    removed: summary.removed.len(),
                });
            } else {
                self.emit(ReconcileEvent::RemovalDeclined);
            }
        }

        summary.reconciliation = Some(result);
        Ok(())
    }
}
