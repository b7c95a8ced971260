//! Dependency types -- relationships between beads.

use serde::{Deserialize, Serialize};

use crate::enums::DependencyType;

/// A typed edge `source -> target`: the target cannot start until the
/// source completes (for workflow types).
///
/// Dependencies are listed on the bead that is blocked, so the owning bead
/// is always the effective target. `target` is kept for fidelity with the
/// wire shape and may be empty on input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    /// The bead that must complete first.
    pub source: String,

    /// The bead that waits on `source`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,

    /// Dependency type (serialised as "type" in JSON). A missing type is
    /// untyped and does not affect ordering.
    #[serde(
        rename = "type",
        default = "DependencyType::untyped",
        skip_serializing_if = "DependencyType::is_untyped"
    )]
    pub dep_type: DependencyType,
}

impl Dependency {
    /// Creates a dependency of the given type.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        dep_type: impl Into<DependencyType>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            dep_type: dep_type.into(),
        }
    }

    /// Shorthand for a `blocks` dependency.
    pub fn blocks(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, DependencyType::Blocks)
    }

    /// Returns `true` if this edge affects execution ordering.
    pub fn is_workflow(&self) -> bool {
        self.dep_type.is_workflow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_serde_uses_type_key() {
        let dep = Dependency::blocks("A", "B");
        let json = serde_json::to_string(&dep).unwrap();
        assert_eq!(json, r#"{"source":"A","target":"B","type":"blocks"}"#);

        let back: Dependency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dep);
    }

    #[test]
    fn target_and_type_are_optional_on_input() {
        let dep: Dependency = serde_json::from_str(r#"{"source":"A"}"#).unwrap();
        assert_eq!(dep.source, "A");
        assert!(dep.target.is_empty());
        assert!(dep.dep_type.is_untyped());
    }

    #[test]
    fn missing_or_null_type_never_orders() {
        for json in [r#"{"source":"A","target":"B"}"#, r#"{"source":"A","type":null}"#] {
            let dep: Dependency = serde_json::from_str(json).unwrap();
            assert!(!dep.is_workflow(), "{json}");
        }
    }

    #[test]
    fn untyped_dependency_serialises_without_type() {
        let dep: Dependency = serde_json::from_str(r#"{"source":"A","target":"B"}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&dep).unwrap(),
            r#"{"source":"A","target":"B"}"#
        );
    }

    #[test]
    fn non_workflow_type_is_kept_verbatim() {
        let dep: Dependency =
            serde_json::from_str(r#"{"source":"A","target":"C","type":"references"}"#).unwrap();
        assert!(!dep.is_workflow());
        assert_eq!(dep.dep_type.as_str(), "references");
    }
}
