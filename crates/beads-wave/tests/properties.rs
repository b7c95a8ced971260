//! Property tests for the wave scheduler.

use std::collections::{HashMap, HashSet};

use beads_core::{Bead, Dependency};
use beads_wave::compute_waves;
use proptest::prelude::*;

const TYPES: &[&str] = &[
    "blocks",
    "parent-child",
    "conditional-blocks",
    "waits-for",
    "related",
    "tracks",
    "references",
];

/// Random bead sets over ids `n0..nN`, with edges that may dangle, repeat,
/// self-loop, or carry non-workflow types.
fn bead_set() -> impl Strategy<Value = Vec<Bead>> {
    (1usize..14).prop_flat_map(|n| {
        let edge = (0..n + 2, 0..n, 0..TYPES.len());
        prop::collection::vec(edge, 0..n * 3).prop_map(move |edges| {
            let mut beads: Vec<Bead> = (0..n).map(|i| Bead::new(format!("n{i}"))).collect();
            for (source, target, ty) in edges {
                // Sources past n are dangling.
                let dep = Dependency::new(format!("n{source}"), format!("n{target}"), TYPES[ty]);
                beads[target].dependencies.push(dep);
            }
            beads
        })
    })
}

/// Same set shuffled: bead order and each dependency list reordered.
fn with_permutation() -> impl Strategy<Value = (Vec<Bead>, Vec<Bead>)> {
    bead_set().prop_flat_map(|beads| {
        let shuffled = Just(beads.clone()).prop_shuffle().prop_flat_map(|beads| {
            beads
                .into_iter()
                .map(|bead| {
                    let id = bead.id;
                    Just(bead.dependencies)
                        .prop_shuffle()
                        .prop_map(move |dependencies| Bead {
                            id: id.clone(),
                            dependencies,
                        })
                })
                .collect::<Vec<_>>()
        });
        (Just(beads), shuffled)
    })
}

fn is_strictly_sorted(ids: &[String]) -> bool {
    ids.windows(2).all(|w| w[0] < w[1])
}

proptest! {
    #[test]
    fn prop_every_bead_placed_exactly_once(beads in bead_set()) {
        let result = compute_waves(&beads);
        let mut seen: HashSet<&str> = HashSet::new();
        for id in result.waves.iter().flat_map(|w| &w.bead_ids).chain(result.cycles.iter().flatten()) {
            prop_assert!(seen.insert(id.as_str()), "{} placed twice", id);
        }
        let expected: HashSet<&str> = beads.iter().map(|b| b.id.as_str()).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_waves_and_cycles_sorted(beads in bead_set()) {
        let result = compute_waves(&beads);
        for (i, wave) in result.waves.iter().enumerate() {
            prop_assert_eq!(wave.level, i);
            prop_assert!(!wave.bead_ids.is_empty());
            prop_assert!(is_strictly_sorted(&wave.bead_ids));
        }
        for group in &result.cycles {
            prop_assert!(!group.is_empty());
            prop_assert!(is_strictly_sorted(group));
        }
        let minima: Vec<&String> = result.cycles.iter().map(|g| &g[0]).collect();
        prop_assert!(minima.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(result.has_cycles, !result.cycles.is_empty());
    }

    #[test]
    fn prop_workflow_edges_respect_levels(beads in bead_set()) {
        let result = compute_waves(&beads);
        let level: HashMap<&str, usize> = result
            .waves
            .iter()
            .flat_map(|w| w.bead_ids.iter().map(move |id| (id.as_str(), w.level)))
            .collect();

        for bead in &beads {
            for dep in bead.workflow_dependencies() {
                if let (Some(s), Some(t)) = (level.get(dep.source.as_str()), level.get(bead.id.as_str())) {
                    prop_assert!(s < t, "{} (level {}) must precede {} (level {})", dep.source, s, bead.id, t);
                }
            }
        }
    }

    #[test]
    fn prop_scheduled_beads_never_wait_on_stuck_ones(beads in bead_set()) {
        let result = compute_waves(&beads);
        let stuck: HashSet<&str> = result.cycles.iter().flatten().map(String::as_str).collect();
        for bead in &beads {
            if stuck.contains(bead.id.as_str()) {
                continue;
            }
            for dep in bead.workflow_dependencies() {
                prop_assert!(!stuck.contains(dep.source.as_str()));
            }
        }
    }

    #[test]
    fn prop_input_order_is_irrelevant((original, shuffled) in with_permutation()) {
        prop_assert_eq!(compute_waves(&original), compute_waves(&shuffled));
    }

    #[test]
    fn prop_non_workflow_edges_have_no_effect(beads in bead_set()) {
        let stripped: Vec<Bead> = beads
            .iter()
            .map(|b| Bead {
                id: b.id.clone(),
                dependencies: b.workflow_dependencies().cloned().collect(),
            })
            .collect();
        prop_assert_eq!(compute_waves(&beads), compute_waves(&stripped));
    }

    #[test]
    fn prop_repeating_edges_has_no_effect(beads in bead_set()) {
        let doubled: Vec<Bead> = beads
            .iter()
            .map(|b| {
                let mut dependencies = b.dependencies.clone();
                dependencies.extend(b.dependencies.iter().cloned());
                Bead { id: b.id.clone(), dependencies }
            })
            .collect();
        prop_assert_eq!(compute_waves(&beads), compute_waves(&doubled));
    }
}
