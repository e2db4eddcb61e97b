//! Error types for the reconciler with context and user-facing suggestions

use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reconciling a downloads directory against a modlist
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The command line named something that is not a modlist archive
    #[error("'{path}' is not a Wabbajack mod archive (expected a '.{extension}' file)")]
    NotAWabbajackFile {
        path: PathBuf,
        extension: String,
    },

    /// The archive could not be opened or its embedded manifest is unusable
    #[error("Failed to read modlist from '{path}'")]
    ArchiveFormat {
        path: PathBuf,
        #[source]
        problem: ArchiveProblem,
    },

    /// The local downloads directory is missing or not a directory
    #[error("Downloads directory '{path}' does not exist")]
    DirectoryNotFound {
        path: PathBuf,
    },

    /// A file flagged for deletion could not be removed
    #[error("Failed to remove '{path}'")]
    FileRemoval {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File system I/O errors with file context
    #[error("File operation failed on '{path}' while {operation}")]
    FileSystem {
        path: PathBuf,
        operation: FileOperation,
        #[source]
        source: std::io::Error,
    },

    /// The confirmation provider could not produce an answer
    #[error("Prompt failed: {reason}")]
    Prompt {
        reason: String,
    },
}

/// What exactly went wrong inside a modlist archive
#[derive(Error, Debug)]
pub enum ArchiveProblem {
    #[error("cannot open file: {0}")]
    Unreadable(#[source] std::io::Error),

    #[error("not a zip container: {0}")]
    NotAZip(#[source] zip::result::ZipError),

    #[error("archive has no '{0}' entry")]
    MissingManifest(String),

    #[error("manifest entry could not be read: {0}")]
    ManifestUnreadable(#[source] std::io::Error),

    #[error("manifest is not a valid modlist: {0}")]
    InvalidManifest(#[source] crate::parse_wabbajack::ParseError),
}

/// Types of file operations for error context
#[derive(Debug, Clone, PartialEq)]
pub enum FileOperation {
    Read,
    Write,
    Create,
    Delete,
    ListDir,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Read => write!(f, "reading"),
            FileOperation::Write => write!(f, "writing"),
            FileOperation::Create => write!(f, "creating"),
            FileOperation::Delete => write!(f, "deleting"),
            FileOperation::ListDir => write!(f, "listing directory"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconcileError>;

impl ReconcileError {
    /// Build a file system error for the given path and operation
    pub fn file_system<P: Into<PathBuf>>(
        path: P,
        operation: FileOperation,
        source: std::io::Error,
    ) -> Self {
        ReconcileError::FileSystem {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Build an archive format error for the given path
    pub fn archive_format<P: Into<PathBuf>>(path: P, problem: ArchiveProblem) -> Self {
        ReconcileError::ArchiveFormat {
            path: path.into(),
            problem,
        }
    }

    /// Whether the error stems from bad command line input
    pub fn is_usage_error(&self) -> bool {
        matches!(self, ReconcileError::NotAWabbajackFile { .. })
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ReconcileError::NotAWabbajackFile { .. } => "usage",
            ReconcileError::ArchiveFormat { .. } => "archive_format",
            ReconcileError::DirectoryNotFound { .. } => "directory_not_found",
            ReconcileError::FileRemoval { .. } => "file_removal",
            ReconcileError::FileSystem { .. } => "file_system",
            ReconcileError::Prompt { .. } => "prompt",
        }
    }

    /// Get user-friendly suggestion for resolving the error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ReconcileError::NotAWabbajackFile { .. } => {
                Some("Pass the .wabbajack file the modlist was installed from")
            }
            ReconcileError::ArchiveFormat {
                problem: ArchiveProblem::MissingManifest(_),
                ..
            } => Some(
                "The file may be truncated or from an unsupported Wabbajack version; \
                 download it again",
            ),
            ReconcileError::DirectoryNotFound { .. } => {
                Some("Check the path to the downloads folder configured in Wabbajack")
            }
            ReconcileError::FileRemoval { .. } => Some(
                "The file may have been moved or is locked by another program; \
                 remaining files were not touched",
            ),
            _ => None,
        }
    }

    /// Create a detailed error report for debugging
    pub fn detailed_report(&self) -> String {
        let mut report = format!("Error: {}\n", self);
        report.push_str(&format!("Category: {}\n", self.category()));

        if let Some(suggestion) = self.suggestion() {
            report.push_str(&format!("Suggestion: {}\n", suggestion));
        }

        if let Some(source) = self.source() {
            report.push_str(&format!("Root cause: {}\n", source));
        }

        report
    }
}
