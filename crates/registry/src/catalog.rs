//! The concrete catalog: embedded default data plus file-backed overrides.

use std::{
    fs,
    path::{Path, PathBuf},
};

use docket_types::{CatalogSource, CorpusItem, PayloadRule, Playbook, Script, Template, Workflow};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{CatalogConfig, CatalogIssue, validation};

/// Default catalog compiled into the binary.
const EMBEDDED_CATALOG: &str = include_str!("../catalog/default.yaml");

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// YAML catalog failed to parse.
    #[error("catalog YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON catalog failed to parse.
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The catalog parsed but failed integrity validation.
    #[error("catalog failed validation with {} issue(s): {}", .0.len(), join_issues(.0))]
    Invalid(Vec<CatalogIssue>),
}

fn join_issues(issues: &[CatalogIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Read-only reference data consulted by workflow and playbook sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
    #[serde(default)]
    pub playbooks: Vec<Playbook>,
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub corpus: Vec<CorpusItem>,
    #[serde(default)]
    pub scripts: Vec<Script>,
    /// Absent in the file means the built-in rule table.
    #[serde(default = "PayloadRule::builtin")]
    pub payload_rules: Vec<PayloadRule>,
}

fn default_version() -> u32 {
    1
}

impl Catalog {
    /// Loads the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::read_embedded()?.validated()
    }

    /// Parses the embedded catalog without validating it.
    pub fn read_embedded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(EMBEDDED_CATALOG)
    }

    /// Parses a YAML catalog without validating it.
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses a JSON catalog without validating it.
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads and parses a catalog file without validating it.
    ///
    /// Files ending in `.json` are parsed as JSON; anything else is parsed as YAML.
    pub fn read_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), json = is_json, "parsing catalog file");
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Reads, parses, and validates a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        Self::read_path(path)?.validated()
    }

    /// Loads the catalog named by `config`, falling back to the embedded catalog.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        match config.resolved_catalog_path() {
            Some(path) => Self::from_path(&path),
            None => Self::embedded(),
        }
    }

    /// Collects every integrity issue; an empty list means the catalog is usable.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        validation::validate(self)
    }

    fn validated(self) -> Result<Self, CatalogError> {
        let issues = self.validate();
        if !issues.is_empty() {
            for issue in &issues {
                warn!(%issue, "catalog integrity issue");
            }
            return Err(CatalogError::Invalid(issues));
        }
        debug!(
            workflows = self.workflows.len(),
            playbooks = self.playbooks.len(),
            templates = self.templates.len(),
            corpus = self.corpus.len(),
            "catalog loaded"
        );
        Ok(self)
    }
}

impl CatalogSource for Catalog {
    fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    fn playbooks(&self) -> &[Playbook] {
        &self.playbooks
    }

    fn templates(&self) -> &[Template] {
        &self.templates
    }

    fn corpus(&self) -> &[CorpusItem] {
        &self.corpus
    }

    fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    fn payload_rules(&self) -> &[PayloadRule] {
        &self.payload_rules
    }
}
