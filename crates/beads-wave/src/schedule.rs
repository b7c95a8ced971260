//! Wave computation: a level-by-level variant of Kahn's algorithm.

use beads_core::Bead;
use tracing::debug;

use crate::cycles::group_stuck;
use crate::graph::DepGraph;
use crate::result::{Wave, WaveResult};

/// Computes dependency waves for `beads`.
///
/// 1. Keep only workflow-typed edges between known beads, one per ordered pair.
/// 2. Start with every bead that has no in-edges as wave 0.
/// 3. Resolve a wave, decrement the in-degree of the beads it blocks, and
///    collect those that reach zero as the next wave.
/// 4. Beads never reached are stuck; they are grouped into cycle groups by
///    undirected connectivity over stuck-to-stuck edges.
///
/// Never fails. Dangling references, duplicate edges and non-workflow types
/// are ignored; a self-loop leaves its bead in a one-element cycle group.
/// Duplicate ids resolve to the last occurrence.
pub fn compute_waves(beads: &[Bead]) -> WaveResult {
    if beads.is_empty() {
        return WaveResult::default();
    }

    let graph = DepGraph::build(beads);
    let n = graph.len();

    let mut remaining = graph.in_degrees().to_vec();
    let mut resolved = vec![false; n];
    let mut frontier: Vec<usize> = (0..n).filter(|&node| remaining[node] == 0).collect();
    let mut waves: Vec<Wave> = Vec::new();

    while !frontier.is_empty() {
        // Index order is id order.
        frontier.sort_unstable();

        for &node in &frontier {
            resolved[node] = true;
        }

        let mut next = Vec::new();
        for &node in &frontier {
            for &dependent in graph.dependents(node) {
                if resolved[dependent] {
                    continue;
                }
                remaining[dependent] -= 1;
                // Each distinct edge is walked once, so zero is hit at most once.
                if remaining[dependent] == 0 {
                    next.push(dependent);
                }
            }
        }

        waves.push(Wave {
            level: waves.len(),
            bead_ids: graph.ids_of(&frontier),
        });
        frontier = next;
    }

    let cycles = group_stuck(&graph, &resolved);

    debug!(
        beads = n,
        edges = graph.edge_count(),
        waves = waves.len(),
        stuck = resolved.iter().filter(|r| !**r).count(),
        cycle_groups = cycles.len(),
        "computed dependency waves"
    );

    WaveResult::new(waves, cycles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input() {
        let result = compute_waves(&[]);
        assert_eq!(result, WaveResult::default());
        assert!(!result.has_cycles);
    }

    #[test]
    fn single_bead() {
        let result = compute_waves(&[Bead::new("A")]);
        assert_eq!(
            result.waves,
            vec![Wave {
                level: 0,
                bead_ids: ids(&["A"])
            }]
        );
        assert!(result.cycles.is_empty());
    }

    #[test]
    fn self_loop_is_a_one_bead_cycle() {
        let result = compute_waves(&[Bead::new("A").blocked_by("A"), Bead::new("B")]);
        assert_eq!(result.waves.len(), 1);
        assert_eq!(result.waves[0].bead_ids, ids(&["B"]));
        assert_eq!(result.cycles, vec![ids(&["A"])]);
        assert!(result.has_cycles);
    }

    #[test]
    fn resolved_dependents_are_not_decremented_twice() {
        // B depends on A twice via different types: still wave 1, never negative.
        let result = compute_waves(&[
            Bead::new("A"),
            Bead::new("B").blocked_by("A").depends_on("A", "conditional-blocks"),
            Bead::new("C").blocked_by("B").blocked_by("A"),
        ]);
        let levels: Vec<Vec<String>> = result.waves.into_iter().map(|w| w.bead_ids).collect();
        assert_eq!(levels, vec![ids(&["A"]), ids(&["B"]), ids(&["C"])]);
    }
}
