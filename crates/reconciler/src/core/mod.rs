//! Core types used throughout the reconciler
//!
//! Errors and event reporting live here so every other module can depend on
//! them without depending on each other.

pub mod error;
pub mod progress;

// Re-export main types for convenience
pub use error::{ArchiveProblem, FileOperation, ReconcileError, Result};
pub use progress::{
    ConsoleReporter, EventCallback, EventReporter, IntoEventCallback, NullReporter, ReconcileEvent,
};
