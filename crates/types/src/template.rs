//! Reference templates. Content carries `{{key}}` placeholders; `fields` only drive form rendering.

use serde::{Deserialize, Serialize};

/// Immutable document template.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub jurisdiction: String,
    /// Body text containing zero or more `{{key}}` placeholders.
    pub content: String,
    #[serde(default)]
    pub fields: Vec<TemplateField>,
    /// Filing instructions shown next to the drafted document.
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discernment: Option<Discernment>,
}

/// Form descriptor for one template placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct TemplateField {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(rename = "type", default)]
    pub kind: TemplateFieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplateFieldType {
    #[default]
    Text,
    Date,
    Textarea,
    Currency,
    Select,
}

/// Plain-language assessment attached to a template.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Discernment {
    /// What the instrument is recognized to do.
    pub lawful: String,
    /// Where agencies commonly push back.
    pub contested: String,
    pub utility: String,
    /// Expected result when the filing is accepted.
    pub outcome: String,
}
