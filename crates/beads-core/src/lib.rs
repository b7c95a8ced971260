//! Core types for the beads wave scheduler.
//!
//! Beads, typed dependencies, the `bd` CLI record shapes, and the ingestion
//! and diagnostics layers that normalise raw input before scheduling.

pub mod bead;
pub mod dependency;
pub mod diagnostics;
pub mod enums;
pub mod graph;
pub mod ingest;
pub mod issue;

pub use bead::Bead;
pub use dependency::Dependency;
pub use enums::{DependencyType, WORKFLOW_DEP_TYPES, is_workflow_dep};
