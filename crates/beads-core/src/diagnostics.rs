//! Input diagnostics for bead sets.
//!
//! The wave scheduler never rejects input: dangling references, self-loops
//! and duplicates all get a well-defined result. These checks surface the
//! same conditions to a human so they are not silently absorbed.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::bead::Bead;

/// How much a finding matters for scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational: no effect on the computed waves.
    Info,
    /// Changes or constrains what the scheduler produces.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
        })
    }
}

/// The kind of condition found.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A bead has an empty identifier.
    EmptyId,
    /// The identifier appears more than once; the last occurrence wins.
    DuplicateId { occurrences: usize },
    /// A workflow dependency names a source that is not in the set.
    DanglingSource { source: String },
    /// A workflow dependency on the bead itself.
    SelfLoop,
    /// The same `source -> bead` workflow edge is declared more than once.
    DuplicateEdge { source: String, count: usize },
    /// A dependency type outside the workflow allow-list.
    NonWorkflowType { source: String, dep_type: String },
    /// The dependency's `target` field names a different bead than its owner.
    TargetMismatch { source: String, target: String },
}

impl DiagnosticKind {
    /// Returns the severity of this kind.
    pub fn severity(&self) -> Severity {
        match self {
            Self::DuplicateId { .. } | Self::SelfLoop | Self::EmptyId => Severity::Warning,
            Self::DanglingSource { .. }
            | Self::DuplicateEdge { .. }
            | Self::NonWorkflowType { .. }
            | Self::TargetMismatch { .. } => Severity::Info,
        }
    }
}

/// A single finding about one bead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub bead_id: String,
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    fn new(bead_id: &str, kind: DiagnosticKind) -> Self {
        Self {
            bead_id: bead_id.to_owned(),
            severity: kind.severity(),
            kind,
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::EmptyId => "bead has an empty id".to_string(),
            DiagnosticKind::DuplicateId { occurrences } => format!(
                "id appears {} times; the last occurrence is used",
                occurrences
            ),
            DiagnosticKind::DanglingSource { source } => {
                format!("depends on unknown bead '{}' (ignored)", source)
            }
            DiagnosticKind::SelfLoop => "depends on itself; it can never be scheduled".to_string(),
            DiagnosticKind::DuplicateEdge { source, count } => {
                format!("dependency on '{}' declared {} times (counted once)", source, count)
            }
            DiagnosticKind::NonWorkflowType { source, dep_type } if dep_type.is_empty() => {
                format!("untyped dependency on '{}' does not affect ordering", source)
            }
            DiagnosticKind::NonWorkflowType { source, dep_type } => format!(
                "'{}' dependency on '{}' does not affect ordering",
                dep_type, source
            ),
            DiagnosticKind::TargetMismatch { source, target } => format!(
                "dependency on '{}' names target '{}'; the owning bead is used",
                source, target
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.bead_id, self.message())
    }
}

/// Inspects a bead set and reports every tolerated anomaly.
///
/// Dependencies of overridden duplicate occurrences are not inspected.
/// Output is sorted by bead id, then kind.
pub fn diagnose(beads: &[Bead]) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (idx, bead) in beads.iter().enumerate() {
        *occurrences.entry(bead.id.as_str()).or_insert(0) += 1;
        last_index.insert(bead.id.as_str(), idx);
    }

    for (id, count) in &occurrences {
        if id.is_empty() {
            out.push(Diagnostic::new(id, DiagnosticKind::EmptyId));
        }
        if *count > 1 {
            out.push(Diagnostic::new(
                id,
                DiagnosticKind::DuplicateId {
                    occurrences: *count,
                },
            ));
        }
    }

    for (idx, bead) in beads.iter().enumerate() {
        if last_index.get(bead.id.as_str()) != Some(&idx) {
            continue;
        }
        let mut edge_counts: HashMap<&str, usize> = HashMap::new();
        let mut reported_self_loop = false;
        let mut dangling: HashSet<&str> = HashSet::new();

        for dep in &bead.dependencies {
            if !dep.target.is_empty() && dep.target != bead.id {
                out.push(Diagnostic::new(
                    &bead.id,
                    DiagnosticKind::TargetMismatch {
                        source: dep.source.clone(),
                        target: dep.target.clone(),
                    },
                ));
            }

            if !dep.is_workflow() {
                out.push(Diagnostic::new(
                    &bead.id,
                    DiagnosticKind::NonWorkflowType {
                        source: dep.source.clone(),
                        dep_type: dep.dep_type.as_str().to_owned(),
                    },
                ));
                continue;
            }

            if !occurrences.contains_key(dep.source.as_str()) {
                if dangling.insert(dep.source.as_str()) {
                    out.push(Diagnostic::new(
                        &bead.id,
                        DiagnosticKind::DanglingSource {
                            source: dep.source.clone(),
                        },
                    ));
                }
                continue;
            }

            if dep.source == bead.id && !reported_self_loop {
                reported_self_loop = true;
                out.push(Diagnostic::new(&bead.id, DiagnosticKind::SelfLoop));
            }

            *edge_counts.entry(dep.source.as_str()).or_insert(0) += 1;
        }

        for (source, count) in edge_counts {
            if count > 1 {
                out.push(Diagnostic::new(
                    &bead.id,
                    DiagnosticKind::DuplicateEdge {
                        source: source.to_owned(),
                        count,
                    },
                ));
            }
        }
    }

    out.sort_by(|a, b| a.bead_id.cmp(&b.bead_id).then_with(|| a.kind.cmp(&b.kind)));
    out
}

/// Returns `true` if any finding is a [`Severity::Warning`].
pub fn has_warnings(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Warning)
}
