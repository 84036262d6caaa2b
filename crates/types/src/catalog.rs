//! Read-only catalog access shared by the engine and the registry.
//!
//! Sessions take a `&impl CatalogSource` instead of reaching for global data, so tests can
//! substitute a small hand-built catalog.

use crate::{CorpusItem, PayloadRule, Playbook, Script, Template, Workflow};

/// Immutable source of workflows, playbooks, templates, corpus items, and scripts.
pub trait CatalogSource {
    fn workflows(&self) -> &[Workflow];
    fn playbooks(&self) -> &[Playbook];
    fn templates(&self) -> &[Template];
    /// Corpus items in catalog order.
    fn corpus(&self) -> &[CorpusItem];
    fn scripts(&self) -> &[Script];
    /// Rule table consulted when deciding whether a payload satisfies a step.
    fn payload_rules(&self) -> &[PayloadRule];

    fn workflow(&self, id: &str) -> Option<&Workflow> {
        self.workflows().iter().find(|workflow| workflow.id == id)
    }

    fn playbook(&self, id: &str) -> Option<&Playbook> {
        self.playbooks().iter().find(|playbook| playbook.id == id)
    }

    fn template(&self, id: &str) -> Option<&Template> {
        self.templates().iter().find(|template| template.id == id)
    }

    fn corpus_item(&self, id: &str) -> Option<&CorpusItem> {
        self.corpus().iter().find(|item| item.id == id)
    }

    fn script(&self, id: &str) -> Option<&Script> {
        self.scripts().iter().find(|script| script.id == id)
    }
}
