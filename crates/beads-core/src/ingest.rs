//! Reading beads from JSON documents and JSON Lines.
//!
//! Three record shapes are accepted and normalised into [`Bead`]s:
//!
//! - **beads**: `{ "id", "dependencies": [{ "source", "target", "type" }] }`
//! - **issues**: `bd list --json` records (`issue_id` / `depends_on_id`
//!   dependencies), bare or wrapped as `{ "beads": [...], "count": n }`
//! - **graph**: `{ "nodes": [...], "edges": [{ "from", "to", "type" }] }`
//!
//! Input is either a single JSON document or JSONL (one record per line).

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::str::FromStr;

use serde_json::Value;

use crate::bead::Bead;
use crate::graph::GraphInput;
use crate::issue::{IssueList, IssueRecord};

/// Error type for ingestion.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error at {at}: {source}")]
    Json {
        at: Location,
        source: serde_json::Error,
    },

    #[error("unrecognised input shape: {0}")]
    UnknownShape(String),

    #[error("input looks like {found} records but {expected} was requested")]
    FormatMismatch {
        expected: InputFormat,
        found: InputFormat,
    },

    #[error("unknown input format '{0}' (expected auto, beads, issues or graph)")]
    UnknownFormat(String),
}

/// Result alias for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Where in the input a record came from, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// 1-based line of a JSONL record, or of a syntax error in a document.
    Line(usize),
    /// 0-based index into a top-level JSON array.
    Element(usize),
    /// The document as a whole.
    Document,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(n) => write!(f, "line {n}"),
            Self::Element(i) => write!(f, "element {i}"),
            Self::Document => f.write_str("document"),
        }
    }
}

/// Which record shape to expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Detect per document / record.
    #[default]
    Auto,
    Beads,
    Issues,
    Graph,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Beads => "beads",
            Self::Issues => "issues",
            Self::Graph => "graph",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "beads" => Ok(Self::Beads),
            "issues" => Ok(Self::Issues),
            "graph" => Ok(Self::Graph),
            other => Err(IngestError::UnknownFormat(other.to_owned())),
        }
    }
}

/// Reads all beads from `reader`.
///
/// Empty input yields an empty list.
pub fn read_beads<R: Read>(mut reader: R, format: InputFormat) -> Result<Vec<Bead>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_beads(&text, format)
}

/// Parses beads from an in-memory string. See [`read_beads`].
pub fn parse_beads(text: &str, format: InputFormat) -> Result<Vec<Bead>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(doc) => beads_from_document(doc, format),
        Err(err) => {
            // JSONL only when the first record stands on its own line;
            // otherwise this is a broken multi-line document.
            let mut lines = trimmed.lines().filter(|l| !l.trim().is_empty());
            let first_is_record = lines
                .next()
                .is_some_and(|l| serde_json::from_str::<Value>(l.trim()).is_ok());
            if !first_is_record || lines.next().is_none() {
                return Err(IngestError::Json {
                    at: Location::Line(err.line()),
                    source: err,
                });
            }
            let mut beads = Vec::new();
            for item in read_jsonl(BufReader::new(text.as_bytes())) {
                let (line, value) = item?;
                beads.push(bead_from_record(value, format, Location::Line(line))?);
            }
            Ok(beads)
        }
    }
}

fn beads_from_document(doc: Value, format: InputFormat) -> Result<Vec<Bead>> {
    match doc {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, v)| bead_from_record(v, format, Location::Element(idx)))
            .collect(),
        Value::Object(ref map) if map.contains_key("nodes") => {
            if !matches!(format, InputFormat::Auto | InputFormat::Graph) {
                return Err(IngestError::FormatMismatch {
                    expected: format,
                    found: InputFormat::Graph,
                });
            }
            let graph: GraphInput = from_value(doc, Location::Document)?;
            Ok(graph.to_beads())
        }
        Value::Object(ref map) if map.contains_key("beads") => {
            if !matches!(format, InputFormat::Auto | InputFormat::Issues) {
                return Err(IngestError::FormatMismatch {
                    expected: format,
                    found: InputFormat::Issues,
                });
            }
            let list: IssueList = from_value(doc, Location::Document)?;
            Ok(list.beads.iter().map(IssueRecord::to_bead).collect())
        }
        Value::Object(ref map) if map.contains_key("id") => {
            Ok(vec![bead_from_record(doc, format, Location::Document)?])
        }
        other => Err(IngestError::UnknownShape(describe(&other))),
    }
}

/// Decodes one record, detecting its shape under [`InputFormat::Auto`].
fn bead_from_record(value: Value, format: InputFormat, at: Location) -> Result<Bead> {
    if !value.is_object() {
        return Err(IngestError::UnknownShape(format!(
            "{} at {at}",
            describe(&value)
        )));
    }

    let found = record_shape(&value);
    let shape = match format {
        InputFormat::Auto => found,
        InputFormat::Graph => {
            return Err(IngestError::FormatMismatch {
                expected: InputFormat::Graph,
                found,
            });
        }
        explicit => explicit,
    };

    match shape {
        InputFormat::Issues => Ok(from_value::<IssueRecord>(value, at)?.to_bead()),
        _ => from_value::<Bead>(value, at),
    }
}

/// A record is an issue record when any dependency uses `depends_on_id`.
fn record_shape(value: &Value) -> InputFormat {
    let is_issue = value
        .get("dependencies")
        .and_then(Value::as_array)
        .is_some_and(|deps| deps.iter().any(|d| d.get("depends_on_id").is_some()));
    if is_issue {
        InputFormat::Issues
    } else {
        InputFormat::Beads
    }
}

fn from_value<T: serde::de::DeserializeOwned>(value: Value, at: Location) -> Result<T> {
    serde_json::from_value(value).map_err(|source| IngestError::Json { at, source })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(_) => "a boolean".into(),
        Value::Number(_) => "a number".into(),
        Value::String(_) => "a string".into(),
        Value::Array(_) => "an array".into(),
        Value::Object(map) => {
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.sort_unstable();
            format!("an object with keys [{}]", keys.join(", "))
        }
    }
}

/// Returns an iterator over `(line_number, value)` pairs of a JSONL reader.
///
/// Empty lines are skipped. Line numbers are 1-based.
pub fn read_jsonl<R: BufRead>(reader: R) -> JsonlIter<R> {
    JsonlIter {
        reader,
        line_number: 0,
    }
}

/// Iterator over JSONL-encoded values.
pub struct JsonlIter<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> Iterator for JsonlIter<R> {
    type Item = Result<(usize, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    self.line_number += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(
                        serde_json::from_str::<Value>(trimmed)
                            .map(|v| (self.line_number, v))
                            .map_err(|source| IngestError::Json {
                                at: Location::Line(self.line_number),
                                source,
                            }),
                    );
                }
                Err(e) => return Some(Err(IngestError::Io(e))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::Dependency;
    use crate::enums::DependencyType;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_is_empty_list() {
        assert!(parse_beads("", InputFormat::Auto).unwrap().is_empty());
        assert!(parse_beads("  \n\n ", InputFormat::Auto).unwrap().is_empty());
    }

    #[test]
    fn parses_bead_array() {
        let json = r#"[
            {"id": "A", "dependencies": []},
            {"id": "B", "dependencies": [{"source": "A", "target": "B", "type": "blocks"}]},
            {"id": "C"}
        ]"#;
        let beads = parse_beads(json, InputFormat::Auto).unwrap();
        assert_eq!(
            beads,
            vec![
                Bead::new("A"),
                Bead::new("B").blocked_by("A"),
                Bead::new("C")
            ]
        );
    }

    #[test]
    fn parses_issue_jsonl() {
        let data = concat!(
            r#"{"id":"bd-1","title":"first"}"#,
            "\n\n",
            r#"{"id":"bd-2","title":"second","dependencies":[{"issue_id":"bd-2","depends_on_id":"bd-1","type":"waits-for"}]}"#,
            "\n"
        );
        let beads = parse_beads(data, InputFormat::Auto).unwrap();
        assert_eq!(beads.len(), 2);
        assert_eq!(
            beads[1].dependencies,
            vec![Dependency::new("bd-1", "bd-2", DependencyType::WaitsFor)]
        );
    }

    #[test]
    fn parses_issue_list_envelope() {
        let json = r#"{"beads":[{"id":"bd-1"},{"id":"bd-2","dependencies":[
            {"issue_id":"bd-2","depends_on_id":"bd-1","type":"blocks"}]}],"count":2}"#;
        let beads = parse_beads(json, InputFormat::Issues).unwrap();
        assert_eq!(beads[1], Bead::new("bd-2").blocked_by("bd-1"));
    }

    #[test]
    fn parses_graph_document() {
        let json = r#"{"nodes":[{"id":"A"},{"id":"B"}],"edges":[{"from":"A","to":"B","type":"blocks"}]}"#;
        let beads = parse_beads(json, InputFormat::Auto).unwrap();
        assert_eq!(beads[1], Bead::new("B").blocked_by("A"));
    }

    #[test]
    fn graph_document_rejected_when_beads_requested() {
        let json = r#"{"nodes":[],"edges":[]}"#;
        match parse_beads(json, InputFormat::Beads) {
            Err(IngestError::FormatMismatch { expected, found }) => {
                assert_eq!(expected, InputFormat::Beads);
                assert_eq!(found, InputFormat::Graph);
            }
            other => panic!("expected format mismatch, got {:?}", other),
        }
    }

    #[test]
    fn jsonl_reports_line_number_on_error() {
        let data = "{\"id\":\"A\"}\n\nnot-json\n";
        match parse_beads(data, InputFormat::Auto) {
            Err(IngestError::Json { at, .. }) => assert_eq!(at, Location::Line(3)),
            other => panic!("expected JSON error, got {:?}", other),
        }
    }

    #[test]
    fn array_element_errors_name_the_element() {
        let json = r#"[{"id": "A"}, {"id": "B"}, {"id": 7}]"#;
        match parse_beads(json, InputFormat::Auto) {
            Err(err @ IngestError::Json { .. }) => {
                assert!(matches!(err, IngestError::Json { at: Location::Element(2), .. }));
                assert!(err.to_string().starts_with("JSON error at element 2:"), "{err}");
            }
            other => panic!("expected JSON error, got {:?}", other),
        }
    }

    #[test]
    fn broken_multiline_document_reports_its_own_position() {
        let json = "[\n  {\"id\": \"A\"},\n  {\"id\": \"B\",}\n]\n";
        match parse_beads(json, InputFormat::Auto) {
            Err(IngestError::Json { at, .. }) => assert_eq!(at, Location::Line(3)),
            other => panic!("expected JSON error, got {:?}", other),
        }
    }

    #[test]
    fn untyped_dependency_does_not_become_blocking() {
        let json = r#"[{"id":"A"},{"id":"B","dependencies":[{"source":"A","target":"B"}]}]"#;
        let beads = parse_beads(json, InputFormat::Auto).unwrap();
        let dep = &beads[1].dependencies[0];
        assert!(dep.dep_type.is_untyped());
        assert!(!dep.is_workflow());
    }

    #[test]
    fn scalar_document_is_unknown_shape() {
        assert!(matches!(
            parse_beads("42", InputFormat::Auto),
            Err(IngestError::UnknownShape(_))
        ));
    }

    #[test]
    fn format_parses_from_str() {
        assert_eq!("graph".parse::<InputFormat>().unwrap(), InputFormat::Graph);
        assert!("yaml".parse::<InputFormat>().is_err());
    }
}
