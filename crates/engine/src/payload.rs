//! Decides whether an extraction payload already proves a workflow step.
//!
//! The decision is a lookup in a fixed rule table ([`PayloadRule`]), not inference. A step
//! that names a rule through `payload_rule` is checked against that rule only; any other
//! step is checked against every keyword rule whose keyword appears in its id.

use docket_types::{ExtractionPayload, PayloadRequirement, PayloadRule, StepMatcher, WorkflowStep};
use regex::Regex;
use tracing::{trace, warn};

/// Evaluates payloads against a borrowed rule table.
#[derive(Debug, Clone, Copy)]
pub struct PayloadValidator<'a> {
    rules: &'a [PayloadRule],
}

impl<'a> PayloadValidator<'a> {
    pub fn new(rules: &'a [PayloadRule]) -> Self {
        Self { rules }
    }

    /// Returns the first rule that applies to `step` and is met by `payload`.
    pub fn matching_rule(&self, step: &WorkflowStep, payload: Option<&ExtractionPayload>) -> Option<&'a PayloadRule> {
        let payload = payload.filter(|payload| !payload.is_malformed())?;

        let matched = match step.payload_rule.as_deref() {
            Some(rule_name) => self
                .rules
                .iter()
                .find(|rule| rule.name == rule_name)
                .filter(|rule| requirement_met(&rule.requirement, payload)),
            None => self
                .rules
                .iter()
                .filter(|rule| matches!(&rule.step, StepMatcher::IdContains(keyword) if step.id.contains(keyword.as_str())))
                .find(|rule| requirement_met(&rule.requirement, payload)),
        };

        trace!(step = %step.id, rule = ?matched.map(|rule| rule.name.as_str()), "evaluated payload rules");
        matched
    }

    /// True when `payload` satisfies the requirement of `step`.
    pub fn step_satisfied(&self, step: &WorkflowStep, payload: Option<&ExtractionPayload>) -> bool {
        self.matching_rule(step, payload).is_some()
    }

    /// Keyword-only form keyed by step id. Always false when `payload` is absent or malformed.
    pub fn satisfies(&self, step_id: &str, payload: Option<&ExtractionPayload>) -> bool {
        let Some(payload) = payload.filter(|payload| !payload.is_malformed()) else {
            return false;
        };
        self.rules.iter().any(|rule| {
            matches!(&rule.step, StepMatcher::IdContains(keyword) if step_id.contains(keyword.as_str()))
                && requirement_met(&rule.requirement, payload)
        })
    }
}

/// Keyword-rule check of `step_id` against `payload` using `rules`.
pub fn payload_satisfies(step_id: &str, payload: Option<&ExtractionPayload>, rules: &[PayloadRule]) -> bool {
    PayloadValidator::new(rules).satisfies(step_id, payload)
}

fn requirement_met(requirement: &PayloadRequirement, payload: &ExtractionPayload) -> bool {
    match requirement {
        PayloadRequirement::DocumentType(expected) => payload.document_type() == Some(expected.as_str()),
        PayloadRequirement::FieldPresent(path) => payload.has_value(path),
        PayloadRequirement::FieldMatches { path, pattern } => {
            let Some(text) = payload.text(path) else {
                return false;
            };
            match Regex::new(pattern) {
                Ok(regex) => regex.is_match(text),
                Err(error) => {
                    warn!(%pattern, %error, "ignoring payload rule with invalid pattern");
                    false
                }
            }
        }
    }
}
