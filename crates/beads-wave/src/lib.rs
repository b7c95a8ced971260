//! Dependency-wave scheduler for the beads system.
//!
//! Partitions a set of beads into ordered *waves* (groups that can run in
//! parallel once every earlier wave has finished) and reports the beads that
//! can never be scheduled because they sit in, or behind, a dependency cycle.
//!
//! ```
//! use beads_core::Bead;
//! use beads_wave::compute_waves;
//!
//! let beads = vec![
//!     Bead::new("A"),
//!     Bead::new("B").blocked_by("A"),
//!     Bead::new("C").blocked_by("A"),
//! ];
//! let result = compute_waves(&beads);
//! assert_eq!(result.waves[1].bead_ids, vec!["B", "C"]);
//! assert!(!result.has_cycles);
//! ```
//!
//! The scheduler is a pure function: no I/O, no shared state, and the output
//! depends only on identifier values, never on input order.

mod cycles;
mod graph;
pub mod result;
mod schedule;

pub use result::{Wave, WaveResult};
pub use schedule::compute_waves;
