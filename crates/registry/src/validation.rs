//! Integrity checks run over every catalog before it is handed to the engine.

use std::collections::HashSet;

use docket_types::{CatalogSource, FactFieldType};
use thiserror::Error;

/// A single integrity problem found in a catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogIssue {
    #[error("duplicate workflow id '{0}'")]
    DuplicateWorkflow(String),
    #[error("workflow '{0}' has no steps")]
    EmptyWorkflow(String),
    #[error("workflow '{workflow}' repeats step id '{step}'")]
    DuplicateStep { workflow: String, step: String },
    #[error("step '{step}' in workflow '{workflow}' recommends unknown template '{template}'")]
    UnknownStepTemplate { workflow: String, step: String, template: String },
    #[error("step '{step}' in workflow '{workflow}' recommends unknown script '{script}'")]
    UnknownStepScript { workflow: String, step: String, script: String },
    #[error("step '{step}' in workflow '{workflow}' references unknown payload rule '{rule}'")]
    UnknownStepPayloadRule { workflow: String, step: String, rule: String },
    #[error("duplicate playbook id '{0}'")]
    DuplicatePlaybook(String),
    #[error("playbook '{playbook}' repeats fact key '{key}'")]
    DuplicateFact { playbook: String, key: String },
    #[error("select fact '{key}' in playbook '{playbook}' has no options")]
    SelectWithoutOptions { playbook: String, key: String },
    #[error("playbook '{playbook}' uses unknown template '{template}'")]
    UnknownPlaybookTemplate { playbook: String, template: String },
    #[error("duplicate template id '{0}'")]
    DuplicateTemplate(String),
    #[error("duplicate corpus item id '{0}'")]
    DuplicateCorpusItem(String),
    #[error("duplicate script id '{0}'")]
    DuplicateScript(String),
    #[error("duplicate payload rule name '{0}'")]
    DuplicatePayloadRule(String),
}

/// Collects every integrity issue in `catalog`, in catalog order.
pub fn validate(catalog: &impl CatalogSource) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    let template_ids = unique_ids(
        catalog.templates().iter().map(|template| template.id.as_str()),
        &mut issues,
        CatalogIssue::DuplicateTemplate,
    );
    let script_ids = unique_ids(
        catalog.scripts().iter().map(|script| script.id.as_str()),
        &mut issues,
        CatalogIssue::DuplicateScript,
    );
    let rule_names = unique_ids(
        catalog.payload_rules().iter().map(|rule| rule.name.as_str()),
        &mut issues,
        CatalogIssue::DuplicatePayloadRule,
    );
    unique_ids(
        catalog.corpus().iter().map(|item| item.id.as_str()),
        &mut issues,
        CatalogIssue::DuplicateCorpusItem,
    );
    unique_ids(
        catalog.workflows().iter().map(|workflow| workflow.id.as_str()),
        &mut issues,
        CatalogIssue::DuplicateWorkflow,
    );
    unique_ids(
        catalog.playbooks().iter().map(|playbook| playbook.id.as_str()),
        &mut issues,
        CatalogIssue::DuplicatePlaybook,
    );

    for workflow in catalog.workflows() {
        if workflow.steps.is_empty() {
            issues.push(CatalogIssue::EmptyWorkflow(workflow.id.clone()));
        }
        let mut step_ids = HashSet::new();
        for step in &workflow.steps {
            if !step_ids.insert(step.id.as_str()) {
                issues.push(CatalogIssue::DuplicateStep {
                    workflow: workflow.id.clone(),
                    step: step.id.clone(),
                });
            }
            if let Some(template) = &step.recommended_template_id
                && !template_ids.contains(template.as_str())
            {
                issues.push(CatalogIssue::UnknownStepTemplate {
                    workflow: workflow.id.clone(),
                    step: step.id.clone(),
                    template: template.clone(),
                });
            }
            if let Some(script) = &step.recommended_script_id
                && !script_ids.contains(script.as_str())
            {
                issues.push(CatalogIssue::UnknownStepScript {
                    workflow: workflow.id.clone(),
                    step: step.id.clone(),
                    script: script.clone(),
                });
            }
            if let Some(rule) = &step.payload_rule
                && !rule_names.contains(rule.as_str())
            {
                issues.push(CatalogIssue::UnknownStepPayloadRule {
                    workflow: workflow.id.clone(),
                    step: step.id.clone(),
                    rule: rule.clone(),
                });
            }
        }
    }

    for playbook in catalog.playbooks() {
        let mut keys = HashSet::new();
        for fact in &playbook.facts {
            if !keys.insert(fact.key.as_str()) {
                issues.push(CatalogIssue::DuplicateFact {
                    playbook: playbook.id.clone(),
                    key: fact.key.clone(),
                });
            }
            let has_options = fact.options.as_ref().is_some_and(|options| !options.is_empty());
            if fact.kind == FactFieldType::Select && !has_options {
                issues.push(CatalogIssue::SelectWithoutOptions {
                    playbook: playbook.id.clone(),
                    key: fact.key.clone(),
                });
            }
        }
        if !template_ids.contains(playbook.template_id.as_str()) {
            issues.push(CatalogIssue::UnknownPlaybookTemplate {
                playbook: playbook.id.clone(),
                template: playbook.template_id.clone(),
            });
        }
    }

    issues
}

fn unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<CatalogIssue>,
    duplicate: impl Fn(String) -> CatalogIssue,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(duplicate(id.to_string()));
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn parse(yaml: &str) -> Catalog {
        Catalog::from_yaml_str(yaml).expect("parse catalog")
    }

    #[test]
    fn reports_dangling_references() {
        let catalog = parse(
            r#"
workflows:
  - id: "w"
    title: "W"
    steps:
      - id: "s1"
        title: "One"
        recommended_template_id: "missing-template"
        recommended_script_id: "missing-script"
        payload_rule: "missing-rule"
playbooks:
  - id: "p"
    title: "P"
    template_id: "missing-template"
"#,
        );
        let issues = validate(&catalog);
        assert_eq!(
            issues,
            vec![
                CatalogIssue::UnknownStepTemplate {
                    workflow: "w".into(),
                    step: "s1".into(),
                    template: "missing-template".into(),
                },
                CatalogIssue::UnknownStepScript {
                    workflow: "w".into(),
                    step: "s1".into(),
                    script: "missing-script".into(),
                },
                CatalogIssue::UnknownStepPayloadRule {
                    workflow: "w".into(),
                    step: "s1".into(),
                    rule: "missing-rule".into(),
                },
                CatalogIssue::UnknownPlaybookTemplate {
                    playbook: "p".into(),
                    template: "missing-template".into(),
                },
            ]
        );
    }

    #[test]
    fn reports_structural_problems() {
        let catalog = parse(
            r#"
workflows:
  - id: "w"
    title: "W"
    steps:
      - { id: "s1", title: "One" }
      - { id: "s1", title: "Again" }
  - id: "empty"
    title: "Empty"
    steps: []
playbooks:
  - id: "p"
    title: "P"
    template_id: "t"
    facts:
      - { key: "goal", label: "Goal", type: "select" }
      - { key: "goal", label: "Goal again", type: "text" }
templates:
  - { id: "t", name: "T", content: "{{goal}}" }
"#,
        );
        let issues = validate(&catalog);
        assert!(issues.contains(&CatalogIssue::DuplicateStep {
            workflow: "w".into(),
            step: "s1".into(),
        }));
        assert!(issues.contains(&CatalogIssue::EmptyWorkflow("empty".into())));
        assert!(issues.contains(&CatalogIssue::SelectWithoutOptions {
            playbook: "p".into(),
            key: "goal".into(),
        }));
        assert!(issues.contains(&CatalogIssue::DuplicateFact {
            playbook: "p".into(),
            key: "goal".into(),
        }));
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn reports_duplicate_ids() {
        let catalog = parse(
            r#"
corpus:
  - { id: "c", title: "C", citation: "C § 1", text: "c" }
  - { id: "c", title: "C2", citation: "C § 2", text: "c" }
payload_rules:
  - name: "r"
    step: explicit
    requirement: { document_type: "Birth Certificate" }
  - name: "r"
    step: explicit
    requirement: { field_present: "identifiers.stateFileNo" }
"#,
        );
        assert_eq!(
            validate(&catalog),
            vec![
                CatalogIssue::DuplicatePayloadRule("r".into()),
                CatalogIssue::DuplicateCorpusItem("c".into()),
            ]
        );
    }

    #[test]
    fn issue_messages_name_the_offender() {
        let issue = CatalogIssue::UnknownPlaybookTemplate {
            playbook: "foia-playbook".into(),
            template: "gone".into(),
        };
        assert_eq!(issue.to_string(), "playbook 'foia-playbook' uses unknown template 'gone'");
    }
}
