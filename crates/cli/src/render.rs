//! Plain-text rendering of catalog listings and session state.

use docket_engine::{StepStatus, WorkflowSession};
use docket_types::{CorpusItem, Playbook, Workflow};
use textwrap::Options;

const WIDTH: usize = 88;
const DETAIL_INDENT: &str = "      ";

fn wrap_detail(text: &str) -> String {
    textwrap::fill(
        text,
        Options::new(WIDTH).initial_indent(DETAIL_INDENT).subsequent_indent(DETAIL_INDENT),
    )
}

fn status_marker(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Active => ">",
        StepStatus::Completed => "x",
        StepStatus::PayloadSatisfied => "~",
        StepStatus::Available => " ",
        StepStatus::Locked => "-",
    }
}

pub fn workflow_list(workflows: &[&Workflow]) -> String {
    let mut out = String::new();
    for workflow in workflows {
        let payload_note = if workflow.payload_aware { " [payload-aware]" } else { "" };
        out.push_str(&format!(
            "{}  {} ({} steps){}\n",
            workflow.id,
            workflow.title,
            workflow.steps.len(),
            payload_note
        ));
        if !workflow.description.is_empty() {
            out.push_str(&wrap_detail(&workflow.description));
            out.push('\n');
        }
    }
    out
}

pub fn playbook_list(playbooks: &[Playbook]) -> String {
    let mut out = String::new();
    for playbook in playbooks {
        out.push_str(&format!("{}  {} ({} facts)\n", playbook.id, playbook.title, playbook.facts.len()));
        if !playbook.description.is_empty() {
            out.push_str(&wrap_detail(&playbook.description));
            out.push('\n');
        }
    }
    out
}

pub fn citation_list(items: &[&CorpusItem]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&format!("{}  {}: {}\n", item.id, item.title, item.citation));
        out.push_str(&wrap_detail(&item.text));
        out.push('\n');
    }
    out
}

/// Step list with status markers; only the active step shows its instructions.
pub fn workflow_session(session: &WorkflowSession) -> String {
    let workflow = session.workflow();
    let (completed, total) = session.progress();
    let mut out = format!("{} ({})  {}/{} completed\n", workflow.title, workflow.id, completed, total);

    for (index, (step, status)) in workflow.steps.iter().zip(session.step_statuses()).enumerate() {
        out.push_str(&format!("  [{}] {}. {}\n", status_marker(status), index + 1, step.title));
        if status != StepStatus::Active {
            continue;
        }
        if !step.description.is_empty() {
            out.push_str(&wrap_detail(&step.description));
            out.push('\n');
        }
        for instruction in &step.instructions {
            out.push_str(&wrap_detail(&format!("- {instruction}")));
            out.push('\n');
        }
        if let Some(template_id) = &step.recommended_template_id {
            out.push_str(&format!("{DETAIL_INDENT}template: {template_id}\n"));
        }
        if let Some(script_id) = &step.recommended_script_id {
            out.push_str(&format!("{DETAIL_INDENT}script: {script_id}\n"));
        }
    }

    if session.is_complete() {
        out.push_str("All steps completed.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use docket_registry::Catalog;

    use super::*;

    #[test]
    fn marks_active_and_locked_steps() {
        let catalog = Catalog::embedded().expect("load embedded catalog");
        let session = WorkflowSession::start(&catalog, "foia-request-protocol", None).expect("start session");
        let text = workflow_session(&session);
        assert!(text.contains("0/4 completed"));
        assert!(text.contains("  [>] 1. Identify the Agency"));
        assert!(text.contains("  [-] 2. Draft and Send the Request"));
        assert!(!text.contains("All steps completed."));
    }

    #[test]
    fn wraps_details_with_indent() {
        let wrapped = wrap_detail(&"word ".repeat(40));
        assert!(wrapped.lines().all(|line| line.starts_with(DETAIL_INDENT) && line.len() <= WIDTH));
    }
}
