//! Dependency types and the workflow allow-list.
//!
//! Types are carried as their wire strings. Names outside the known set are
//! kept verbatim in [`DependencyType::Custom`]; a dependency with no type at
//! all is an empty `Custom`, which never orders execution.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Relationship type between beads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyType {
    Blocks,
    ParentChild,
    ConditionalBlocks,
    WaitsFor,
    Tracks,
    Related,
    DiscoveredFrom,
    RelatesTo,
    Duplicates,
    Supersedes,
    Custom(String),
}

/// Dependency types that impose execution ordering. Closed set.
pub const WORKFLOW_DEP_TYPES: [DependencyType; 4] = [
    DependencyType::Blocks,
    DependencyType::ParentChild,
    DependencyType::ConditionalBlocks,
    DependencyType::WaitsFor,
];

impl DependencyType {
    /// The type of a dependency whose input omitted `type`.
    pub fn untyped() -> Self {
        Self::Custom(String::new())
    }

    /// Returns `true` for a dependency that carried no type.
    pub fn is_untyped(&self) -> bool {
        matches!(self, Self::Custom(s) if s.is_empty())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Blocks => "blocks",
            Self::ParentChild => "parent-child",
            Self::ConditionalBlocks => "conditional-blocks",
            Self::WaitsFor => "waits-for",
            Self::Tracks => "tracks",
            Self::Related => "related",
            Self::DiscoveredFrom => "discovered-from",
            Self::RelatesTo => "relates-to",
            Self::Duplicates => "duplicates",
            Self::Supersedes => "supersedes",
            Self::Custom(s) => s,
        }
    }

    /// Returns `true` if this type orders execution (source must finish
    /// before target starts). Every other type is informational.
    pub fn is_workflow(&self) -> bool {
        matches!(
            self,
            Self::Blocks | Self::ParentChild | Self::ConditionalBlocks | Self::WaitsFor
        )
    }
}

impl From<&str> for DependencyType {
    fn from(s: &str) -> Self {
        match s {
            "blocks" => Self::Blocks,
            "parent-child" => Self::ParentChild,
            "conditional-blocks" => Self::ConditionalBlocks,
            "waits-for" => Self::WaitsFor,
            "tracks" => Self::Tracks,
            "related" => Self::Related,
            "discovered-from" => Self::DiscoveredFrom,
            "relates-to" => Self::RelatesTo,
            "duplicates" => Self::Duplicates,
            "supersedes" => Self::Supersedes,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl From<String> for DependencyType {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Custom(_) => Self::Custom(s),
            known => known,
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DependencyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DependencyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `null` reads the same as a missing type.
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.map(Self::from).unwrap_or_else(Self::untyped))
    }
}

/// Returns `true` if the raw type string names a workflow dependency.
pub fn is_workflow_dep(dep_type: &str) -> bool {
    DependencyType::from(dep_type).is_workflow()
}
