//! Extraction payloads and the declarative rules that match them against workflow steps.
//!
//! A payload is produced by an external document-ingestion collaborator and is only ever
//! read here. Its shape is loose: a `docType` classifier plus nested identifier/entity
//! groups. Anything this module does not recognize is treated as absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level field carrying the document-type classifier.
pub const DOCUMENT_TYPE_FIELD: &str = "docType";

/// Read-only view over externally extracted document data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ExtractionPayload(Value);

impl ExtractionPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Raw JSON value as supplied by the producer.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// A payload whose root is not an object carries no recognizable fields.
    pub fn is_malformed(&self) -> bool {
        !self.0.is_object()
    }

    /// Resolves a dotted path (`identifiers.stateFileNo`, `entities.0.name`) to a value.
    ///
    /// Returns `None` for malformed payloads, unknown segments, and JSON `null`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if self.is_malformed() {
            return None;
        }
        let mut current = &self.0;
        for segment in path.split('.').filter(|segment| !segment.is_empty()) {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        if current.is_null() { None } else { Some(current) }
    }

    /// Trimmed, non-empty string at `path`.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.lookup(path)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// True when `path` resolves to a non-empty string, a number, a boolean, or a non-empty array.
    pub fn has_value(&self, path: &str) -> bool {
        match self.lookup(path) {
            Some(Value::String(text)) => !text.trim().is_empty(),
            Some(Value::Number(_)) | Some(Value::Bool(_)) => true,
            Some(Value::Array(items)) => !items.is_empty(),
            _ => false,
        }
    }

    /// Document-type classifier exactly as supplied, surrounding whitespace included.
    pub fn document_type(&self) -> Option<&str> {
        self.lookup(DOCUMENT_TYPE_FIELD).and_then(Value::as_str)
    }
}

impl From<Value> for ExtractionPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Declares which payload shape proves which kind of step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayloadRule {
    /// Stable name steps can reference through `payload_rule`.
    pub name: String,
    /// Which steps the rule applies to.
    pub step: StepMatcher,
    /// Payload shape that satisfies matched steps.
    pub requirement: PayloadRequirement,
}

/// Selects the steps a [`PayloadRule`] applies to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepMatcher {
    /// Any step whose id contains the keyword. Steps with an explicit `payload_rule` are never keyword-matched.
    IdContains(String),
    /// Only steps naming this rule through `payload_rule`.
    Explicit,
}

/// Payload shape a rule requires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayloadRequirement {
    /// `docType` equals the value exactly.
    DocumentType(String),
    /// The dotted path resolves to a non-empty value.
    FieldPresent(String),
    /// The dotted path resolves to a string matching the regular expression.
    FieldMatches { path: String, pattern: String },
}

impl PayloadRule {
    /// Rules applied when a catalog does not declare its own.
    pub fn builtin() -> Vec<PayloadRule> {
        vec![
            PayloadRule {
                name: "longform-birth-record".into(),
                step: StepMatcher::IdContains("longform".into()),
                requirement: PayloadRequirement::DocumentType("Birth Certificate".into()),
            },
            PayloadRule {
                name: "forensic-identifier".into(),
                step: StepMatcher::IdContains("forensic".into()),
                requirement: PayloadRequirement::FieldPresent("identifiers.stateFileNo".into()),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_walks_objects_and_arrays() {
        let payload = ExtractionPayload::new(json!({
            "docType": "Birth Certificate",
            "identifiers": { "stateFileNo": "142-1990-0001", "localFileNo": "" },
            "entities": [{ "name": "Jane Roe" }]
        }));
        assert_eq!(payload.document_type(), Some("Birth Certificate"));
        assert_eq!(payload.text("identifiers.stateFileNo"), Some("142-1990-0001"));
        assert_eq!(payload.text("entities.0.name"), Some("Jane Roe"));
        assert!(!payload.has_value("identifiers.localFileNo"));
        assert!(payload.lookup("identifiers.missing").is_none());
        assert!(payload.lookup("docType.deeper").is_none());
    }

    #[test]
    fn document_type_is_not_trimmed() {
        let padded = ExtractionPayload::new(json!({ "docType": " Birth Certificate " }));
        assert_eq!(padded.document_type(), Some(" Birth Certificate "));
        assert_eq!(padded.text("docType"), Some("Birth Certificate"));
    }

    #[test]
    fn malformed_payload_has_no_fields() {
        let payload = ExtractionPayload::new(json!(["docType", "Birth Certificate"]));
        assert!(payload.is_malformed());
        assert!(payload.document_type().is_none());
        assert!(!payload.has_value("0"));

        let null_payload = ExtractionPayload::default();
        assert!(null_payload.is_malformed());
    }

    #[test]
    fn rules_round_trip_through_yaml() {
        let yaml = r#"
- name: "notice-number"
  step: explicit
  requirement:
    field_matches: { path: "identifiers.noticeNo", pattern: "^[A-Z]{2}-\\d+$" }
- name: "longform"
  step: { id_contains: "longform" }
  requirement: { document_type: "Birth Certificate" }
"#;
        let rules: Vec<PayloadRule> = serde_yaml::from_str(yaml).expect("parse rules");
        assert_eq!(rules[0].step, StepMatcher::Explicit);
        assert!(matches!(rules[0].requirement, PayloadRequirement::FieldMatches { ref path, .. } if path == "identifiers.noticeNo"));
        assert_eq!(rules[1].requirement, PayloadRequirement::DocumentType("Birth Certificate".into()));
    }
}
