//! Bead -- the schedulable unit handed to the wave scheduler.

use serde::{Deserialize, Serialize};

use crate::dependency::Dependency;
use crate::enums::DependencyType;

/// Minimal bead structure needed for wave computation.
///
/// `dependencies` lists the edges for which this bead is the blocked party
/// (the things this bead waits on).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bead {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

impl Bead {
    /// Creates a bead with no dependencies.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dependencies: Vec::new(),
        }
    }

    /// Adds a dependency on `source` of the given type, with this bead as target.
    pub fn depends_on(
        mut self,
        source: impl Into<String>,
        dep_type: impl Into<DependencyType>,
    ) -> Self {
        let dep = Dependency::new(source, self.id.clone(), dep_type);
        self.dependencies.push(dep);
        self
    }

    /// Adds a `blocks` dependency on `source`.
    pub fn blocked_by(self, source: impl Into<String>) -> Self {
        self.depends_on(source, DependencyType::Blocks)
    }

    /// Iterates over the workflow-typed dependencies only.
    pub fn workflow_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| d.is_workflow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_sets_owner_as_target() {
        let bead = Bead::new("B").blocked_by("A").depends_on("C", "waits-for");
        assert_eq!(
            bead.dependencies,
            vec![
                Dependency::blocks("A", "B"),
                Dependency::new("C", "B", DependencyType::WaitsFor),
            ]
        );
    }

    #[test]
    fn missing_dependencies_deserialize_as_empty() {
        let bead: Bead = serde_json::from_str(r#"{"id":"A"}"#).unwrap();
        assert_eq!(bead, Bead::new("A"));
    }

    #[test]
    fn workflow_dependencies_skip_informational_edges() {
        let bead = Bead::new("B")
            .blocked_by("A")
            .depends_on("C", "references")
            .depends_on("D", "tracks");
        let sources: Vec<&str> = bead
            .workflow_dependencies()
            .map(|d| d.source.as_str())
            .collect();
        assert_eq!(sources, vec!["A"]);
    }
}
