//! Reconciler Library
//!
//! This library compares a Wabbajack downloads folder against the archives
//! declared by one or two `.wabbajack` modlists, reports what is no longer
//! referenced and, when asked, deletes it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use reconciler::{
//!     Confirmation, ConsoleReporter, IntoEventCallback, ModlistSources, Prompter,
//!     ReconcileConfig, Session,
//! };
//! use std::path::PathBuf;
//!
//! struct DryRun;
//!
//! impl Prompter for DryRun {
//!     fn local_mods_dir(&mut self) -> reconciler::Result<PathBuf> {
//!         Ok(PathBuf::from("/games/wabbajack/downloads"))
//!     }
//!
//!     fn confirm(&mut self, _confirmation: &Confirmation) -> reconciler::Result<bool> {
//!         Ok(false)
//!     }
//! }
//!
//! # fn example() -> reconciler::Result<()> {
//! let config = ReconcileConfig::single();
//! let sources = ModlistSources::single("Baseline.wabbajack", &config)?;
//!
//! let summary = Session::new(config, sources)
//!     .with_events(ConsoleReporter::new(false).into_callback())
//!     .run(&mut DryRun)?;
//!
//! if let Some(result) = summary.reconciliation {
//!     println!("{} files are not part of the modlist", result.delete.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Manifest extraction**: reads the `modlist` entry straight out of the zip container
//! - **Merging**: order-preserving union of two modlists' archive names
//! - **Reconciliation**: hash-indexed keep/delete partition of the downloads folder
//! - **Verification**: cross-checks the recorded keep list before offering deletion
//! - **Reports**: plain text lists of everything found, for auditing

pub mod cleanup;
pub mod config;
pub mod core;
pub mod parse_wabbajack;
pub mod reconcile;
pub mod report;
pub mod session;

// Re-export commonly used types for convenience
pub use config::{ReconcileConfig, ReportFiles};
pub use crate::core::{
    ArchiveProblem, ConsoleReporter, EventCallback, EventReporter, FileOperation, IntoEventCallback,
    NullReporter, ReconcileError, ReconcileEvent, Result,
};
pub use parse_wabbajack::{parse_modlist, ArchiveManifest, ModlistParser, WabbajackFile};
pub use reconcile::{partition, reconcile, verify, ExpectedSet, LocalFileSet, Reconciliation};
pub use report::ReportWriter;
pub use session::{Confirmation, ModlistSources, Prompter, RunSummary, Session};
