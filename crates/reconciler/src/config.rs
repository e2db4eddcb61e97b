//! Configuration types for reconciliation runs

use std::path::PathBuf;

/// Environment variable overriding the directory report files are written to
pub const REPORT_DIR_ENV: &str = "WJ_REPORT_DIR";
/// Environment variable disabling report files when set to `1` or `true`
pub const NO_REPORTS_ENV: &str = "WJ_NO_REPORTS";

/// Names of the human-readable report files a run leaves behind
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFiles {
    /// Sorted archive names declared by the modlist(s)
    pub expected: String,
    /// Sorted names found in the downloads directory
    pub local: String,
    /// Local names not referenced by the modlist
    pub delete: String,
    /// Local names referenced by the modlist
    pub keep: String,
}

impl ReportFiles {
    /// File names used when checking against a single modlist
    pub fn single() -> Self {
        Self {
            expected: "sorted_wabbajack_mods.txt".to_string(),
            local: "sorted_local_mods.txt".to_string(),
            delete: "to_be_deleted.txt".to_string(),
            keep: "to_be_kept.txt".to_string(),
        }
    }

    /// File names used when checking against two merged modlists
    pub fn merged() -> Self {
        Self {
            delete: "merged_to_be_deleted.txt".to_string(),
            keep: "merged_to_be_kept.txt".to_string(),
            ..Self::single()
        }
    }
}

impl Default for ReportFiles {
    fn default() -> Self {
        Self::single()
    }
}

/// Configuration for a reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Name of the manifest entry inside the modlist archive
    pub manifest_entry: String,
    /// Required extension of modlist archives, without the dot
    pub archive_extension: String,
    /// Directory the report files are written to
    pub report_dir: PathBuf,
    pub reports: ReportFiles,
    /// When false no report files are written and verification runs in memory
    pub write_reports: bool,
}

impl ReconcileConfig {
    /// Configuration for the single modlist tool
    pub fn single() -> Self {
        Self::default()
    }

    /// Configuration for the merged modlist tool
    pub fn merged() -> Self {
        Self {
            reports: ReportFiles::merged(),
            ..Self::default()
        }
    }

    /// Set the report directory and return self for chaining
    pub fn with_report_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.report_dir = dir.into();
        self
    }

    /// Enable or disable report files and return self for chaining
    pub fn with_reports(mut self, enabled: bool) -> Self {
        self.write_reports = enabled;
        self
    }

    /// Apply overrides from the process environment
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(REPORT_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            self.report_dir = PathBuf::from(dir.trim());
        }
        if let Some(flag) = lookup(NO_REPORTS_ENV) {
            let flag = flag.trim().to_ascii_lowercase();
            if flag == "1" || flag == "true" {
                self.write_reports = false;
            }
        }
        self
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            manifest_entry: "modlist".to_string(),
            archive_extension: "wabbajack".to_string(),
            report_dir: PathBuf::from("."),
            reports: ReportFiles::single(),
            write_reports: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_merged_report_names() {
        let config = ReconcileConfig::merged();
        assert_eq!(config.reports.delete, "merged_to_be_deleted.txt");
        assert_eq!(config.reports.keep, "merged_to_be_kept.txt");
        assert_eq!(config.reports.local, "sorted_local_mods.txt");
        assert_eq!(config.manifest_entry, "modlist");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (REPORT_DIR_ENV, " /tmp/reports "),
            (NO_REPORTS_ENV, "TRUE"),
        ]
        .into_iter()
        .collect();
        let config = ReconcileConfig::single()
            .apply_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.report_dir, PathBuf::from("/tmp/reports"));
        assert!(!config.write_reports);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = ReconcileConfig::single().apply_overrides(|key| match key {
            REPORT_DIR_ENV => Some("   ".to_string()),
            NO_REPORTS_ENV => Some("0".to_string()),
            _ => None,
        });

        assert_eq!(config.report_dir, PathBuf::from("."));
        assert!(config.write_reports);
    }
}
