//! Grouping of unschedulable ("stuck") nodes into cycle groups.
//!
//! Two stuck nodes share a group iff they are connected through
//! stuck-to-stuck edges, ignoring edge direction. This pulls beads that only
//! sit downstream of a cycle into the same group as the cycle itself.

use std::collections::BTreeMap;

use crate::graph::DepGraph;

/// Disjoint-set forest over node indices.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression.
        while self.parent[x] != root {
            let next = self.parent[x];
            self.parent[x] = root;
            x = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = self.rank[ra].saturating_add(1);
            }
        }
    }
}

/// Groups every node with `resolved[n] == false` into connected components.
///
/// Each group is sorted ascending; groups are ordered by their smallest id.
pub(crate) fn group_stuck(graph: &DepGraph, resolved: &[bool]) -> Vec<Vec<String>> {
    let mut uf = UnionFind::new(graph.len());

    for node in (0..graph.len()).filter(|&n| !resolved[n]) {
        for &dependent in graph.dependents(node) {
            if !resolved[dependent] {
                uf.union(node, dependent);
            }
        }
    }

    // Nodes are visited in index (= id) order, so each member list is sorted
    // and the first member is the group's minimum.
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for node in (0..graph.len()).filter(|&n| !resolved[n]) {
        groups.entry(uf.find(node)).or_default().push(node);
    }

    let mut members: Vec<Vec<usize>> = groups.into_values().collect();
    members.sort_unstable_by_key(|m| m[0]);
    members.iter().map(|m| graph.ids_of(m)).collect()
}
