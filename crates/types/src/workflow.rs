//! Strongly typed workflow definitions shared across the registry, engine, and CLI.
//!
//! A workflow is an ordered list of steps. Authoring order is significant: the engine
//! walks steps by index, so the `steps` vector is never re-sorted after loading.

use serde::{Deserialize, Serialize};

/// Named, ordered procedure loaded from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Workflow {
    /// Canonical identifier used for lookups (for example, `ds4194-authentication`).
    pub id: String,
    /// Human-readable title for menus.
    pub title: String,
    /// Descriptive copy surfaced in the picker or detail pane.
    #[serde(default)]
    pub description: String,
    /// When true, an extraction payload supplied at selection time may fast-forward past step 0.
    #[serde(default)]
    pub payload_aware: bool,
    /// Ordered steps. A valid workflow carries at least one.
    pub steps: Vec<WorkflowStep>,
}

impl Workflow {
    /// Returns the step at `index`, if any.
    pub fn step(&self, index: usize) -> Option<&WorkflowStep> {
        self.steps.get(index)
    }

    /// Index of the step carrying `step_id`.
    pub fn step_index(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == step_id)
    }

    /// Index of the final step, or `None` for an (invalid) empty workflow.
    pub fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }
}

/// One unit of a [`Workflow`].
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct WorkflowStep {
    /// Identifier unique within the owning workflow.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Ordered, human-readable instructions.
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Template the step recommends drafting.
    #[serde(default)]
    pub recommended_template_id: Option<String>,
    /// Script the step recommends reading.
    #[serde(default)]
    pub recommended_script_id: Option<String>,
    /// Short motivational note shown beside the instructions.
    #[serde(default)]
    pub encouragement: Option<String>,
    /// Name of the payload rule that proves this step. When set, keyword matching on `id` is bypassed.
    #[serde(default)]
    pub payload_rule: Option<String>,
}
