//! Playbook definitions: the fact questionnaire, template binding, and fixed protocol text
//! that the four-phase wizard turns into a packet.

use serde::{Deserialize, Serialize};

/// Catalog record describing one guided remedy wizard.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Playbook {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Questions asked during the fact-collection phase, in display order.
    #[serde(default)]
    pub facts: Vec<FactField>,
    /// Template rendered against the collected facts.
    pub template_id: String,
    /// Corpus tags that make a citation relevant to this playbook.
    #[serde(default)]
    pub relevant_tags: Vec<String>,
    /// Numbered follow-up protocol appended to every packet.
    #[serde(default)]
    pub next_steps: Vec<String>,
    /// Bulleted appeal grounds appended to every packet.
    #[serde(default)]
    pub appeal_grounds: Vec<String>,
}

impl Playbook {
    /// Returns the fact field declared under `key`.
    pub fn fact(&self, key: &str) -> Option<&FactField> {
        self.facts.iter().find(|field| field.key == key)
    }

    /// True when any of `tags` is one of this playbook's relevant tags.
    pub fn is_relevant<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|tag| self.relevant_tags.iter().any(|relevant| relevant == tag.as_ref()))
    }
}

/// One question in a playbook's fact questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct FactField {
    /// Key unique within the playbook; doubles as the template placeholder name.
    pub key: String,
    pub label: String,
    /// Advisory input kind. The engine stores every answer verbatim as text.
    #[serde(rename = "type", default)]
    pub kind: FactFieldType,
    /// Choices offered when `kind` is [`FactFieldType::Select`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Input kinds a fact field may declare.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FactFieldType {
    #[default]
    Text,
    Date,
    Textarea,
    Select,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playbook() -> Playbook {
        serde_yaml::from_str(
            r#"
id: "bc-authentication-playbook"
title: "Birth Certificate Authentication"
template_id: "vital-record-request"
facts:
  - { key: "registrant", label: "Registrant Name" }
  - { key: "auth_goal", label: "Goal", type: "select", options: ["Apostille", "Authentication"] }
relevant_tags: ["vital-records", "authentication"]
"#,
        )
        .expect("parse playbook")
    }

    #[test]
    fn fact_type_defaults_to_text() {
        let playbook = playbook();
        assert_eq!(playbook.fact("registrant").map(|field| field.kind), Some(FactFieldType::Text));
        let select = playbook.fact("auth_goal").expect("select field");
        assert_eq!(select.kind, FactFieldType::Select);
        assert_eq!(select.options.as_ref().map(Vec::len), Some(2));
        assert!(playbook.next_steps.is_empty());
    }

    #[test]
    fn relevance_is_tag_intersection() {
        let playbook = playbook();
        assert!(playbook.is_relevant(&["status", "authentication"]));
        assert!(!playbook.is_relevant(&["traffic"]));
        assert!(!playbook.is_relevant::<&str>(&[]));
    }
}
