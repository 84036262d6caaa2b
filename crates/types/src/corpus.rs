//! Citation corpus and script records. Both are read-only reference data.

use serde::{Deserialize, Serialize};

/// Citable authority.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct CorpusItem {
    pub id: String,
    #[serde(default)]
    pub kind: CorpusKind,
    pub title: String,
    /// Formal citation string (for example, `5 U.S.C. § 552`).
    pub citation: String,
    #[serde(default)]
    pub jurisdiction: String,
    /// Quoted text reproduced in packets.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorpusKind {
    #[default]
    Statute,
    Dictionary,
    Rule,
    Manual,
    CaseLaw,
    Commentary,
}

/// Spoken or written script a workflow step may recommend.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Script {
    pub id: String,
    pub title: String,
    pub category: ScriptCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub content: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScriptCategory {
    Court,
    Phone,
    Commercial,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_kind_uses_snake_case() {
        let item: CorpusItem = serde_yaml::from_str(
            r#"
id: "foia-statute"
kind: "case_law"
title: "Freedom of Information Act"
citation: "5 U.S.C. § 552"
text: "Each agency shall make records promptly available."
"#,
        )
        .expect("parse corpus item");
        assert_eq!(item.kind, CorpusKind::CaseLaw);
        assert!(item.tags.is_empty());
        assert!(item.notes.is_none());
    }
}
