//! Event reporting for reconciliation runs

use crate::parse_wabbajack::{ManifestMetadata, ManifestStats};
use std::path::PathBuf;
use std::sync::Arc;

/// Event callback for reconciliation runs
pub type EventCallback = Arc<dyn Fn(ReconcileEvent) + Send + Sync>;

/// Events emitted while a run moves through its steps
#[derive(Debug, Clone)]
pub enum ReconcileEvent {
    ManifestLoaded {
        path: PathBuf,
        metadata: ManifestMetadata,
        stats: ManifestStats,
    },
    ManifestsMerged {
        first: usize,
        second: usize,
        merged: ManifestStats,
    },
    DirectoryMissing {
        path: PathBuf,
    },
    LocalScanComplete {
        path: PathBuf,
        files: usize,
    },
    Partitioned {
        keep: usize,
        delete: usize,
    },
    ReportWritten {
        path: PathBuf,
    },
    VerificationComplete {
        passed: bool,
    },
    FileRemoved {
        path: PathBuf,
    },
    RemovalComplete {
        removed: usize,
    },
    RemovalDeclined,
    SupportFilesRemoved {
        files: usize,
    },
    Finished {
        reports_kept: Vec<PathBuf>,
    },
}

/// Trait for event reporting with more granular control
pub trait EventReporter: Send + Sync {
    fn on_manifest_loaded(
        &self,
        _path: &PathBuf,
        _metadata: &ManifestMetadata,
        _stats: &ManifestStats,
    ) {
    }
    fn on_manifests_merged(&self, _first: usize, _second: usize, _merged: &ManifestStats) {}
    fn on_directory_missing(&self, _path: &PathBuf) {}
    fn on_local_scan_complete(&self, _path: &PathBuf, _files: usize) {}
    fn on_partitioned(&self, _keep: usize, _delete: usize) {}
    fn on_report_written(&self, _path: &PathBuf) {}
    fn on_verification_complete(&self, _passed: bool) {}
    fn on_file_removed(&self, _path: &PathBuf) {}
    fn on_removal_complete(&self, _removed: usize) {}
    fn on_removal_declined(&self) {}
    fn on_support_files_removed(&self, _files: usize) {}
    fn on_finished(&self, _reports_kept: &[PathBuf]) {}
}

/// Extension trait to convert EventReporter to EventCallback
pub trait IntoEventCallback {
    fn into_callback(self) -> EventCallback;
}

impl<T: EventReporter + 'static> IntoEventCallback for T {
    fn into_callback(self) -> EventCallback {
        Arc::new(move |event| match event {
            ReconcileEvent::ManifestLoaded { path, metadata, stats } => {
                self.on_manifest_loaded(&path, &metadata, &stats);
            }
            ReconcileEvent::ManifestsMerged { first, second, merged } => {
                self.on_manifests_merged(first, second, &merged);
            }
            ReconcileEvent::DirectoryMissing { path } => {
                self.on_directory_missing(&path);
            }
            ReconcileEvent::LocalScanComplete { path, files } => {
                self.on_local_scan_complete(&path, files);
            }
            ReconcileEvent::Partitioned { keep, delete } => {
                self.on_partitioned(keep, delete);
            }
            ReconcileEvent::ReportWritten { path } => {
                self.on_report_written(&path);
            }
            ReconcileEvent::VerificationComplete { passed } => {
                self.on_verification_complete(passed);
            }
            ReconcileEvent::FileRemoved { path } => {
                self.on_file_removed(&path);
            }
            ReconcileEvent::RemovalComplete { removed } => {
                self.on_removal_complete(removed);
            }
            ReconcileEvent::RemovalDeclined => {
                self.on_removal_declined();
            }
            ReconcileEvent::SupportFilesRemoved { files } => {
                self.on_support_files_removed(files);
            }
            ReconcileEvent::Finished { reports_kept } => {
                self.on_finished(&reports_kept);
            }
        })
    }
}

/// Console reporter that prints the run's findings for a human
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

/// One-line summary of a loaded modlist
pub fn describe_manifest(
    path: &PathBuf,
    metadata: &ManifestMetadata,
    stats: &ManifestStats,
) -> String {
    let mut title = if metadata.name.is_empty() {
        path.display().to_string()
    } else {
        format!("'{}' from {}", metadata.name, path.display())
    };
    if !metadata.version.is_empty() {
        title.push_str(&format!(" v{}", metadata.version));
    }
    if !metadata.game.is_empty() {
        title.push_str(&format!(" for {}", metadata.game));
    }
    if !metadata.author.is_empty() {
        title.push_str(&format!(" by {}", metadata.author));
    }

    format!("{} ({})", title, describe_stats(stats))
}

/// Archive counts and declared download size
pub fn describe_stats(stats: &ManifestStats) -> String {
    format!(
        "{} archives, {} distinct, {}",
        stats.total_archives,
        stats.distinct_names,
        stats.total_download_size_human()
    )
}

impl EventReporter for ConsoleReporter {
    fn on_manifest_loaded(
        &self,
        path: &PathBuf,
        metadata: &ManifestMetadata,
        stats: &ManifestStats,
    ) {
        println!("📋 Loaded {}", describe_manifest(path, metadata, stats));
    }

    fn on_manifests_merged(&self, first: usize, second: usize, merged: &ManifestStats) {
        println!("🔗 Merged modlists: {} + {} -> {}", first, second, describe_stats(merged));
    }

    fn on_directory_missing(&self, path: &PathBuf) {
        println!("❌ Directory not found: {}", path.display());
    }

    fn on_local_scan_complete(&self, path: &PathBuf, files: usize) {
        println!("📂 Found {} files in {}", files, path.display());
    }

    fn on_partitioned(&self, keep: usize, delete: usize) {
        println!("📊 {} to keep, {} not referenced by the modlist", keep, delete);
    }

    fn on_report_written(&self, path: &PathBuf) {
        if self.verbose {
            println!("📝 Wrote {}", path.display());
        }
    }

    fn on_verification_complete(&self, passed: bool) {
        if passed {
            println!("Your local mods are in sync with the wabbajack modlist.");
        } else {
            println!("Your local mods are not in sync with the wabbajack modlist.");
        }
    }

    fn on_file_removed(&self, path: &PathBuf) {
        if self.verbose {
            println!("🗑  Removed {}", path.display());
        }
    }

    fn on_removal_complete(&self, removed: usize) {
        println!("Mods were deleted ({} files).", removed);
    }

    fn on_removal_declined(&self) {
        println!("No mods were deleted.");
    }

    fn on_support_files_removed(&self, files: usize) {
        if self.verbose {
            println!("🧹 Removed {} support files", files);
        }
    }

    fn on_finished(&self, reports_kept: &[PathBuf]) {
        println!("Done.");
        if !reports_kept.is_empty() {
            println!("Sanity check files still exist. If you want to delete them, do it manually:");
            for path in reports_kept {
                println!("  - {}", path.display());
            }
        }
    }
}

/// Reporter that swallows every event
#[derive(Debug, Default)]
pub struct NullReporter;

impl EventReporter for NullReporter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingReporter {
        removed: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl EventReporter for CountingReporter {
        fn on_file_removed(&self, path: &PathBuf) {
            self.removed.lock().unwrap().push(path.clone());
        }
    }

    #[test]
    fn test_reporter_dispatch() {
        let removed = Arc::new(Mutex::new(Vec::new()));
        let callback = CountingReporter { removed: removed.clone() }.into_callback();

        callback(ReconcileEvent::FileRemoved { path: PathBuf::from("a.zip") });
        callback(ReconcileEvent::RemovalDeclined);
        callback(ReconcileEvent::FileRemoved { path: PathBuf::from("b.zip") });

        assert_eq!(
            *removed.lock().unwrap(),
            vec![PathBuf::from("a.zip"), PathBuf::from("b.zip")]
        );
    }

    #[test]
    fn test_describe_manifest() {
        let metadata = ManifestMetadata {
            name: "Baseline".to_string(),
            version: "1.2".to_string(),
            author: "Someone".to_string(),
            game: "SkyrimSpecialEdition".to_string(),
        };
        let stats = ManifestStats {
            total_archives: 3,
            distinct_names: 2,
            total_download_size: 2048,
        };

        assert_eq!(
            describe_manifest(&PathBuf::from("Baseline.wabbajack"), &metadata, &stats),
            "'Baseline' from Baseline.wabbajack v1.2 for SkyrimSpecialEdition by Someone \
             (3 archives, 2 distinct, 2.0 KB)"
        );
    }

    #[test]
    fn test_describe_manifest_without_metadata() {
        let stats = ManifestStats {
            total_archives: 1,
            distinct_names: 1,
            total_download_size: 10,
        };

        assert_eq!(
            describe_manifest(
                &PathBuf::from("list.wabbajack"),
                &ManifestMetadata::default(),
                &stats
            ),
            "list.wabbajack (1 archives, 1 distinct, 10 B)"
        );
    }

    #[test]
    fn test_null_reporter_accepts_everything() {
        let callback = NullReporter.into_callback();
        callback(ReconcileEvent::VerificationComplete { passed: true });
        callback(ReconcileEvent::Finished { reports_kept: vec![] });
    }
}
