//! Graph-view shapes: nodes plus a flat `from -> to` edge list.
//!
//! This is the form the graph panel works with. [`GraphInput::to_beads`]
//! folds the edge list back onto the nodes it blocks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::bead::Bead;
use crate::dependency::Dependency;
use crate::enums::DependencyType;

/// A node in the dependency graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

/// A directed edge: `from` blocks `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,

    #[serde(
        rename = "type",
        default = "DependencyType::untyped",
        skip_serializing_if = "DependencyType::is_untyped"
    )]
    pub dep_type: DependencyType,
}

/// A whole graph document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphInput {
    pub nodes: Vec<GraphNode>,

    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl GraphInput {
    /// Converts nodes and edges to beads.
    ///
    /// Each node receives the edges whose `to` is that node and whose `from`
    /// is a known node. Edges touching unknown nodes are dropped here. When
    /// an id repeats, its edges go to the last node with that id, the one
    /// the scheduler keeps.
    pub fn to_beads(&self) -> Vec<Bead> {
        let last_index: HashMap<&str, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, n)| (n.id.as_str(), idx))
            .collect();

        let mut beads: Vec<Bead> = self.nodes.iter().map(|n| Bead::new(n.id.clone())).collect();
        for edge in &self.edges {
            if !last_index.contains_key(edge.from.as_str()) {
                continue;
            }
            if let Some(&idx) = last_index.get(edge.to.as_str()) {
                beads[idx].dependencies.push(Dependency::new(
                    edge.from.clone(),
                    edge.to.clone(),
                    edge.dep_type.clone(),
                ));
            }
        }
        beads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn edges_attach_to_their_target_node() {
        let json = r#"{
            "nodes": [{"id": "A", "label": "Start"}, {"id": "B"}],
            "edges": [{"from": "A", "to": "B", "type": "blocks"}]
        }"#;
        let graph: GraphInput = serde_json::from_str(json).unwrap();
        let beads = graph.to_beads();
        assert_eq!(
            beads,
            vec![Bead::new("A"), Bead::new("B").blocked_by("A")]
        );
    }

    #[test]
    fn repeated_node_keeps_edges_on_last_occurrence() {
        let json = r#"{
            "nodes": [{"id": "A"}, {"id": "B"}, {"id": "B", "label": "again"}],
            "edges": [{"from": "A", "to": "B", "type": "blocks"}]
        }"#;
        let graph: GraphInput = serde_json::from_str(json).unwrap();
        assert_eq!(
            graph.to_beads(),
            vec![Bead::new("A"), Bead::new("B"), Bead::new("B").blocked_by("A")]
        );
    }

    #[test]
    fn untyped_edge_is_informational() {
        let json = r#"{"nodes": [{"id": "A"}, {"id": "B"}], "edges": [{"from": "A", "to": "B"}]}"#;
        let graph: GraphInput = serde_json::from_str(json).unwrap();
        let beads = graph.to_beads();
        assert_eq!(beads[1].dependencies.len(), 1);
        assert!(!beads[1].dependencies[0].is_workflow());
    }

    #[test]
    fn edges_from_unknown_nodes_are_dropped() {
        let graph = GraphInput {
            nodes: vec![GraphNode {
                id: "B".into(),
                ..Default::default()
            }],
            edges: vec![GraphEdge {
                from: "ghost".into(),
                to: "B".into(),
                dep_type: DependencyType::Blocks,
            }],
        };
        assert_eq!(graph.to_beads(), vec![Bead::new("B")]);
    }
}
