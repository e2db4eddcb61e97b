//! Removal of files flagged for deletion

use crate::core::{EventCallback, ReconcileError, ReconcileEvent, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Remove every named file from `dir`, in list order
///
/// Stops at the first file that is missing or cannot be removed. Files
/// removed before that point stay removed.
pub fn remove_files<S: AsRef<str>>(
    dir: &Path,
    names: &[S],
    events: Option<&EventCallback>,
) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::with_capacity(names.len());

    for name in names {
        let path = dir.join(name.as_ref());
        fs::remove_file(&path).map_err(|source| ReconcileError::FileRemoval {
            path: path.clone(),
            source,
        })?;
        debug!("Removed {}", path.display());

        if let Some(callback) = events {
            callback(ReconcileEvent::FileRemoved { path: path.clone() });
        }
        removed.push(path);
    }

    info!("Removed {} files from {}", removed.len(), dir.display());
    Ok(removed)
}
