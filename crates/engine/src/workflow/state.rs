//! Workflow session state management.
//!
//! A session walks one workflow's ordered steps. It tracks the active step and the set of
//! completed step ids, decides which steps may be jumped to, and fast-forwards past the
//! first step when an extraction payload already proves it.

use docket_types::{CatalogSource, ExtractionPayload, PayloadRule, Script, Template, Workflow, WorkflowStep};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{EngineError, payload::PayloadValidator};

/// Presentation status of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The step under the cursor.
    Active,
    Completed,
    /// Not completed, but the supplied payload already proves it.
    PayloadSatisfied,
    /// Reachable through sequential progress.
    Available,
    Locked,
}

/// Result of completing the active step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAdvance {
    /// The cursor moved to the contained index.
    Advanced(usize),
    /// The last step was completed; the cursor stays put.
    Terminal,
}

/// Serializable view of a workflow session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowSnapshot {
    pub workflow_id: String,
    pub active_step_index: usize,
    pub completed_step_ids: Vec<String>,
}

/// Mutable progress through one workflow.
///
/// Invariants: `active_step_index < workflow.steps.len()` and every completed id names a
/// step of `workflow`.
#[derive(Debug, Clone)]
pub struct WorkflowSession {
    workflow: Workflow,
    payload_rules: Vec<PayloadRule>,
    payload: Option<ExtractionPayload>,
    active_step_index: usize,
    completed_step_ids: IndexSet<String>,
}

impl WorkflowSession {
    /// Starts a fresh session at step 0.
    ///
    /// When the workflow is payload-aware and `payload` satisfies the first step, that step
    /// is marked completed and the cursor moves to step 1 (or stays at 0 for a single-step
    /// workflow).
    pub fn select(
        workflow: Workflow,
        payload: Option<ExtractionPayload>,
        payload_rules: Vec<PayloadRule>,
    ) -> Result<Self, EngineError> {
        if workflow.steps.is_empty() {
            return Err(EngineError::EmptyWorkflow(workflow.id));
        }

        let mut session = Self {
            workflow,
            payload_rules,
            payload,
            active_step_index: 0,
            completed_step_ids: IndexSet::new(),
        };

        let fast_forward = session.workflow.payload_aware
            && session.payload.is_some()
            && session.validator().step_satisfied(&session.workflow.steps[0], session.payload.as_ref());
        if fast_forward {
            debug!(workflow = %session.workflow.id, "payload satisfies first step; fast-forwarding");
            session.complete_active_step();
        } else {
            debug!(workflow = %session.workflow.id, "workflow selected");
        }

        Ok(session)
    }

    /// Looks up `workflow_id` in `catalog` and selects it with the catalog's payload rules.
    pub fn start(
        catalog: &impl CatalogSource,
        workflow_id: &str,
        payload: Option<ExtractionPayload>,
    ) -> Result<Self, EngineError> {
        let workflow = catalog
            .workflow(workflow_id)
            .ok_or_else(|| EngineError::UnknownWorkflow(workflow_id.to_string()))?;
        Self::select(workflow.clone(), payload, catalog.payload_rules().to_vec())
    }

    /// Rebuilds a session from a snapshot, rejecting snapshots that break the invariants.
    pub fn restore(
        catalog: &impl CatalogSource,
        snapshot: &WorkflowSnapshot,
        payload: Option<ExtractionPayload>,
    ) -> Result<Self, EngineError> {
        let workflow = catalog
            .workflow(&snapshot.workflow_id)
            .ok_or_else(|| EngineError::UnknownWorkflow(snapshot.workflow_id.clone()))?;
        if workflow.steps.is_empty() {
            return Err(EngineError::EmptyWorkflow(workflow.id.clone()));
        }
        if snapshot.active_step_index >= workflow.steps.len() {
            return Err(EngineError::InvalidSnapshot(format!(
                "active step index {} is outside workflow '{}' ({} steps)",
                snapshot.active_step_index,
                workflow.id,
                workflow.steps.len()
            )));
        }
        if let Some(unknown) = snapshot
            .completed_step_ids
            .iter()
            .find(|step_id| workflow.step_index(step_id).is_none())
        {
            return Err(EngineError::InvalidSnapshot(format!(
                "completed step '{}' does not belong to workflow '{}'",
                unknown, workflow.id
            )));
        }

        Ok(Self {
            workflow: workflow.clone(),
            payload_rules: catalog.payload_rules().to_vec(),
            payload,
            active_step_index: snapshot.active_step_index,
            completed_step_ids: snapshot.completed_step_ids.iter().cloned().collect(),
        })
    }

    fn validator(&self) -> PayloadValidator<'_> {
        PayloadValidator::new(&self.payload_rules)
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn payload(&self) -> Option<&ExtractionPayload> {
        self.payload.as_ref()
    }

    pub fn active_step_index(&self) -> usize {
        self.active_step_index
    }

    /// Completed step ids in completion order.
    pub fn completed_step_ids(&self) -> impl Iterator<Item = &str> {
        self.completed_step_ids.iter().map(String::as_str)
    }

    pub fn active_step(&self) -> &WorkflowStep {
        &self.workflow.steps[self.active_step_index]
    }

    pub fn is_step_completed(&self, step_id: &str) -> bool {
        self.completed_step_ids.contains(step_id)
    }

    /// True when the payload proves the step at `index`.
    pub fn is_payload_satisfied(&self, index: usize) -> bool {
        self.workflow
            .step(index)
            .is_some_and(|step| self.validator().step_satisfied(step, self.payload.as_ref()))
    }

    /// Whether the cursor may move to `index`.
    ///
    /// Steps at or before the cursor are always reachable; later steps are reachable when
    /// their predecessor is completed or when the payload proves them. Out-of-range
    /// indices are unreachable.
    pub fn is_reachable(&self, index: usize) -> bool {
        if index >= self.workflow.steps.len() {
            return false;
        }
        if index <= self.active_step_index {
            return true;
        }
        let predecessor_completed = self.is_step_completed(&self.workflow.steps[index - 1].id);
        predecessor_completed || self.is_payload_satisfied(index)
    }

    /// Moves the cursor to `index` when reachable. Returns whether the cursor moved; an
    /// unreachable index leaves the session untouched.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if !self.is_reachable(index) {
            debug!(workflow = %self.workflow.id, index, "ignoring jump to unreachable step");
            return false;
        }
        if index == self.active_step_index {
            return false;
        }
        debug!(workflow = %self.workflow.id, from = self.active_step_index, to = index, "jumped to step");
        self.active_step_index = index;
        true
    }

    /// Moves the cursor back one step; no-op on the first step.
    pub fn previous(&mut self) -> bool {
        match self.active_step_index.checked_sub(1) {
            Some(index) => self.jump_to(index),
            None => false,
        }
    }

    /// Marks the active step completed and advances unless it is the last step.
    pub fn complete_active_step(&mut self) -> StepAdvance {
        let step_id = self.active_step().id.clone();
        debug!(workflow = %self.workflow.id, step = %step_id, "completed step");
        self.completed_step_ids.insert(step_id);

        if self.active_step_index + 1 < self.workflow.steps.len() {
            self.active_step_index += 1;
            StepAdvance::Advanced(self.active_step_index)
        } else {
            StepAdvance::Terminal
        }
    }

    /// True once every step is completed.
    pub fn is_complete(&self) -> bool {
        self.workflow.steps.iter().all(|step| self.is_step_completed(&step.id))
    }

    /// `(completed, total)` step counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed_step_ids.len(), self.workflow.steps.len())
    }

    pub fn step_status(&self, index: usize) -> Option<StepStatus> {
        let step = self.workflow.step(index)?;
        let status = if index == self.active_step_index {
            StepStatus::Active
        } else if self.is_step_completed(&step.id) {
            StepStatus::Completed
        } else if self.is_payload_satisfied(index) {
            StepStatus::PayloadSatisfied
        } else if self.is_reachable(index) {
            StepStatus::Available
        } else {
            StepStatus::Locked
        };
        Some(status)
    }

    /// Status of every step, in workflow order.
    pub fn step_statuses(&self) -> Vec<StepStatus> {
        (0..self.workflow.steps.len()).filter_map(|index| self.step_status(index)).collect()
    }

    pub fn recommended_template<'c>(&self, catalog: &'c impl CatalogSource) -> Option<&'c Template> {
        let template_id = self.active_step().recommended_template_id.as_deref()?;
        catalog.template(template_id)
    }

    pub fn recommended_script<'c>(&self, catalog: &'c impl CatalogSource) -> Option<&'c Script> {
        let script_id = self.active_step().recommended_script_id.as_deref()?;
        catalog.script(script_id)
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            workflow_id: self.workflow.id.clone(),
            active_step_index: self.active_step_index,
            completed_step_ids: self.completed_step_ids.iter().cloned().collect(),
        }
    }
}
