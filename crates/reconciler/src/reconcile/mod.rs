//! Reconciliation of a downloads directory against expected archive names
//!
//! This module contains the name sets, the keep/delete partition and the
//! keep-list cross-check.

pub mod local;
pub mod partition;
pub mod verify;

// Re-export main types for convenience
pub use local::{ExpectedSet, LocalFileSet};
pub use partition::{partition, reconcile, Reconciliation};
pub use verify::verify;

#[cfg(test)]
mod tests;
