//! Engine error taxonomy.
//!
//! Only caller mistakes surface here (unknown references, out-of-phase calls, corrupt
//! snapshots). Unreachable navigation, missing facts, and malformed payloads are not
//! errors and never produce one of these variants.

use thiserror::Error;

use crate::playbook::PlaybookPhase;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown workflow '{0}'")]
    UnknownWorkflow(String),
    #[error("workflow '{0}' has no steps")]
    EmptyWorkflow(String),
    #[error("unknown playbook '{0}'")]
    UnknownPlaybook(String),
    #[error("playbook '{playbook}' references unknown template '{template}'")]
    UnknownTemplate { playbook: String, template: String },
    #[error("unknown citation '{0}'")]
    UnknownCitation(String),
    #[error("playbook '{playbook}' has no fact named '{key}'")]
    UnknownFact { playbook: String, key: String },
    #[error("no playbook is selected")]
    NoPlaybookSelected,
    #[error("{operation} is not allowed in the {actual} phase")]
    InvalidPhase { operation: &'static str, actual: PlaybookPhase },
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
