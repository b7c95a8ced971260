//! Dependency graph construction and edge filtering.
//!
//! Nodes live in an arena indexed by position in the sorted identifier list,
//! so index order is identifier order and sorting indices sorts identifiers.

use std::collections::{BTreeSet, HashMap};

use beads_core::Bead;
use tracing::{trace, warn};

/// Index-based view of the workflow dependency relation.
#[derive(Debug)]
pub(crate) struct DepGraph {
    /// Distinct bead ids, ascending.
    ids: Vec<String>,
    /// Number of distinct workflow in-edges per node.
    in_degree: Vec<usize>,
    /// Distinct nodes each node blocks, ascending.
    dependents: Vec<Vec<usize>>,
    edge_count: usize,
}

impl DepGraph {
    /// Builds the graph from beads.
    ///
    /// When an id occurs more than once, the last occurrence's dependency
    /// list is used and earlier ones are discarded.
    pub(crate) fn build(beads: &[Bead]) -> Self {
        let mut latest: HashMap<&str, &Bead> = HashMap::with_capacity(beads.len());
        for bead in beads {
            if latest.insert(bead.id.as_str(), bead).is_some() {
                warn!(bead = %bead.id, "duplicate bead id, last occurrence wins");
            }
        }

        let mut ids: Vec<String> = latest.keys().map(|id| (*id).to_owned()).collect();
        ids.sort_unstable();

        let index: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        // One logical edge per ordered pair, whatever the declared types.
        let mut edges: BTreeSet<(usize, usize)> = BTreeSet::new();
        for (target_id, bead) in &latest {
            let Some(&target) = index.get(target_id) else {
                continue;
            };
            for dep in &bead.dependencies {
                if !dep.is_workflow() {
                    trace!(bead = %bead.id, source = %dep.source, dep_type = %dep.dep_type, "ignoring non-workflow edge");
                    continue;
                }
                let Some(&source) = index.get(dep.source.as_str()) else {
                    trace!(bead = %bead.id, source = %dep.source, "ignoring edge from unknown bead");
                    continue;
                };
                edges.insert((source, target));
            }
        }

        let mut in_degree = vec![0usize; ids.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
        for &(source, target) in &edges {
            in_degree[target] += 1;
            dependents[source].push(target);
        }

        Self {
            ids,
            in_degree,
            dependents,
            edge_count: edges.len(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub(crate) fn id(&self, node: usize) -> &str {
        &self.ids[node]
    }

    pub(crate) fn in_degrees(&self) -> &[usize] {
        &self.in_degree
    }

    /// Nodes that `node` blocks.
    pub(crate) fn dependents(&self, node: usize) -> &[usize] {
        &self.dependents[node]
    }

    /// Maps node indices to owned ids, preserving order.
    pub(crate) fn ids_of(&self, nodes: &[usize]) -> Vec<String> {
        nodes.iter().map(|&n| self.ids[n].clone()).collect()
    }
}
