//! Issue records as emitted by `bd list --json` / `bd show --json`.
//!
//! Only the id and dependency edges are modelled. Titles, statuses,
//! timestamps and the rest of the record are ignored on input. Records
//! convert into [`Bead`]s for scheduling.

use serde::{Deserialize, Serialize};

use crate::bead::Bead;
use crate::dependency::Dependency;
use crate::enums::DependencyType;

/// A dependency as stored by `bd`: `issue_id` depends on `depends_on_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDependency {
    pub issue_id: String,

    pub depends_on_id: String,

    /// Dependency type (serialised as "type" in JSON).
    #[serde(
        rename = "type",
        default = "DependencyType::untyped",
        skip_serializing_if = "DependencyType::is_untyped"
    )]
    pub dep_type: DependencyType,
}

impl IssueDependency {
    /// Converts to a scheduler edge: the depended-on issue is the source.
    pub fn to_dependency(&self) -> Dependency {
        Dependency::new(
            self.depends_on_id.clone(),
            self.issue_id.clone(),
            self.dep_type.clone(),
        )
    }
}

/// A bead record from the `bd` CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<IssueDependency>,
}

impl IssueRecord {
    /// Converts this record to a schedulable bead.
    pub fn to_bead(&self) -> Bead {
        Bead {
            id: self.id.clone(),
            dependencies: self
                .dependencies
                .iter()
                .map(IssueDependency::to_dependency)
                .collect(),
        }
    }
}

/// The list envelope returned by the IDE backend: `{ "beads": [...], "count": n }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueList {
    pub beads: Vec<IssueRecord>,

    #[serde(default)]
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RECORD: &str = r#"{
        "id": "bd-b",
        "title": "Wire the parser",
        "status": "in_progress",
        "priority": 1,
        "issue_type": "feature",
        "description": "ignored",
        "dependency_count": 2,
        "dependencies": [
            {"issue_id": "bd-b", "depends_on_id": "bd-a", "type": "blocks",
             "created_at": "2025-01-15T10:00:00Z", "created_by": "alice"},
            {"issue_id": "bd-b", "depends_on_id": "bd-epic", "type": "parent-child",
             "created_at": "2025-01-15T10:00:00Z", "created_by": "alice"}
        ]
    }"#;

    #[test]
    fn parses_bd_record_and_ignores_extra_fields() {
        let rec: IssueRecord = serde_json::from_str(RECORD).unwrap();
        assert_eq!(rec.id, "bd-b");
        assert_eq!(rec.dependencies.len(), 2);
        assert_eq!(rec.dependencies[1].dep_type, DependencyType::ParentChild);
    }

    #[test]
    fn converts_to_bead_with_depends_on_as_source() {
        let rec: IssueRecord = serde_json::from_str(RECORD).unwrap();
        let bead = rec.to_bead();
        assert_eq!(bead.id, "bd-b");
        assert_eq!(
            bead.dependencies,
            vec![
                Dependency::blocks("bd-a", "bd-b"),
                Dependency::new("bd-epic", "bd-b", DependencyType::ParentChild),
            ]
        );
    }

    #[test]
    fn untyped_issue_dependency_is_informational() {
        let json = r#"{"id":"bd-2","dependencies":[{"issue_id":"bd-2","depends_on_id":"bd-1"}]}"#;
        let bead = serde_json::from_str::<IssueRecord>(json).unwrap().to_bead();
        assert_eq!(bead.dependencies.len(), 1);
        assert!(!bead.dependencies[0].is_workflow());
    }

    #[test]
    fn list_envelope_parses() {
        let json = r#"{"beads":[{"id":"bd-1"},{"id":"bd-2"}],"count":2}"#;
        let list: IssueList = serde_json::from_str(json).unwrap();
        assert_eq!(list.count, 2);
        assert_eq!(list.beads[1].id, "bd-2");
    }
}
