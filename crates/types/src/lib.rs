//! Shared type definitions for the Docket procedure engine.
//!
//! Everything here is plain serde data: catalog records (workflows, playbooks, templates,
//! corpus items, scripts), the extraction payload view, and the payload rule table.

pub mod catalog;
pub mod corpus;
pub mod payload;
pub mod playbook;
pub mod template;
pub mod workflow;

pub use catalog::CatalogSource;
pub use corpus::{CorpusItem, CorpusKind, Script, ScriptCategory};
pub use payload::{DOCUMENT_TYPE_FIELD, ExtractionPayload, PayloadRequirement, PayloadRule, StepMatcher};
pub use playbook::{FactField, FactFieldType, Playbook};
pub use template::{Discernment, Template, TemplateField, TemplateFieldType};
pub use workflow::{Workflow, WorkflowStep};
