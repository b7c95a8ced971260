//! Output types of the wave scheduler.

use serde::{Deserialize, Serialize};

/// A wave of beads that can execute in parallel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wave {
    /// Zero-indexed wave level.
    pub level: usize,

    /// Bead ids in this wave, ascending.
    #[serde(rename = "beadIds")]
    pub bead_ids: Vec<String>,
}

impl Wave {
    pub fn len(&self) -> usize {
        self.bead_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bead_ids.is_empty()
    }
}

/// Result of wave computation.
///
/// Every input bead id appears exactly once: either in one wave or in one
/// cycle group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveResult {
    /// Waves in execution order (wave 0 first).
    pub waves: Vec<Wave>,

    /// Groups of bead ids that cannot be ordered, each ascending.
    pub cycles: Vec<Vec<String>>,

    /// Whether any cycles were detected.
    #[serde(rename = "hasCycles")]
    pub has_cycles: bool,
}

impl WaveResult {
    /// Builds a result, deriving `has_cycles` from `cycles`.
    pub fn new(waves: Vec<Wave>, cycles: Vec<Vec<String>>) -> Self {
        let has_cycles = !cycles.is_empty();
        Self {
            waves,
            cycles,
            has_cycles,
        }
    }

    /// `true` when the input had no beads.
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty() && self.cycles.is_empty()
    }

    /// Level of the wave containing `id`, if it was scheduled.
    pub fn level_of(&self, id: &str) -> Option<usize> {
        self.waves
            .iter()
            .find(|w| w.bead_ids.binary_search_by(|b| b.as_str().cmp(id)).is_ok())
            .map(|w| w.level)
    }

    /// The cycle group containing `id`, if any.
    pub fn cycle_of(&self, id: &str) -> Option<&[String]> {
        self.cycles
            .iter()
            .find(|c| c.binary_search_by(|b| b.as_str().cmp(id)).is_ok())
            .map(Vec::as_slice)
    }

    /// The first wave of maximal width.
    pub fn widest_wave(&self) -> Option<&Wave> {
        self.waves
            .iter()
            .reduce(|best, w| if w.len() > best.len() { w } else { best })
    }

    /// Size of the widest wave, 0 when nothing was scheduled.
    pub fn max_parallelism(&self) -> usize {
        self.widest_wave().map_or(0, Wave::len)
    }

    /// Number of beads placed in some wave.
    pub fn scheduled_count(&self) -> usize {
        self.waves.iter().map(Wave::len).sum()
    }

    /// Number of beads affected by cycles.
    pub fn cyclic_count(&self) -> usize {
        self.cycles.iter().map(Vec::len).sum()
    }

    /// Total beads across waves and cycle groups.
    pub fn total_count(&self) -> usize {
        self.scheduled_count() + self.cyclic_count()
    }
}
