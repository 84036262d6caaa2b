use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use docket_engine::{FactMap, PlaybookSession, StepAdvance, WorkflowSession};
use docket_registry::{Catalog, CatalogConfig, search_workflows};
use docket_types::{CatalogSource, ExtractionPayload};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

use cli::{CitationsArgs, Cli, Command, PlaybookArgs, WorkflowAction, WorkflowArgs, WorkflowsArgs};

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let catalog_path = catalog_path(cli.catalog.as_deref());

    match cli.command {
        Command::Validate => run_validate(catalog_path.as_deref()),
        Command::Workflows(args) => run_workflows(&load_catalog(catalog_path.as_deref())?, &args),
        Command::Workflow(args) => run_workflow(&load_catalog(catalog_path.as_deref())?, &args),
        Command::Playbooks => {
            let catalog = load_catalog(catalog_path.as_deref())?;
            print!("{}", render::playbook_list(catalog.playbooks()));
            Ok(())
        }
        Command::Citations(args) => run_citations(&load_catalog(catalog_path.as_deref())?, &args),
        Command::Playbook(args) => run_playbook(&load_catalog(catalog_path.as_deref())?, &args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// `--catalog` wins; otherwise the env override or config file decides.
fn catalog_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| CatalogConfig::load().resolved_catalog_path())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading catalog file");
            Catalog::from_path(path).with_context(|| format!("failed to load catalog {}", path.display()))
        }
        None => Catalog::embedded().context("failed to load embedded catalog"),
    }
}

fn run_validate(path: Option<&Path>) -> Result<()> {
    let (catalog, source) = match path {
        Some(path) => (
            Catalog::read_path(path).with_context(|| format!("failed to parse catalog {}", path.display()))?,
            path.display().to_string(),
        ),
        None => (
            Catalog::read_embedded().context("failed to parse embedded catalog")?,
            "embedded catalog".to_string(),
        ),
    };

    let issues = catalog.validate();
    if issues.is_empty() {
        println!(
            "{source}: ok ({} workflows, {} playbooks, {} templates, {} corpus items)",
            catalog.workflows().len(),
            catalog.playbooks().len(),
            catalog.templates().len(),
            catalog.corpus().len()
        );
        return Ok(());
    }
    for issue in &issues {
        println!("{source}: {issue}");
    }
    bail!("{} catalog issue(s) found", issues.len())
}

fn run_workflows(catalog: &Catalog, args: &WorkflowsArgs) -> Result<()> {
    let workflows = search_workflows(catalog, args.search.as_deref().unwrap_or_default());
    print!("{}", render::workflow_list(&workflows));
    Ok(())
}

fn run_workflow(catalog: &Catalog, args: &WorkflowArgs) -> Result<()> {
    let payload = args.payload.as_deref().map(read_payload).transpose()?;
    let mut session = WorkflowSession::start(catalog, &args.id, payload)?;

    for action in &args.actions {
        match action {
            WorkflowAction::Complete => {
                if session.complete_active_step() == StepAdvance::Terminal {
                    debug!(workflow = %args.id, "final step completed");
                }
            }
            WorkflowAction::Back => {
                if !session.previous() {
                    warn!(%action, "already at the first step");
                }
            }
            WorkflowAction::Jump(index) => {
                if !session.jump_to(*index) && session.active_step_index() != *index {
                    warn!(%action, "step is locked or out of range");
                }
            }
        }
    }

    if args.json {
        let output = serde_json::json!({
            "snapshot": session.snapshot(),
            "statuses": session.step_statuses(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render::workflow_session(&session));
    }
    Ok(())
}

fn read_payload(path: &Path) -> Result<ExtractionPayload> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read payload {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("payload {} is not valid JSON", path.display()))?;
    let payload = ExtractionPayload::new(value);
    if payload.is_malformed() {
        warn!(path = %path.display(), "payload root is not an object; it will satisfy no steps");
    }
    Ok(payload)
}

fn run_citations(catalog: &Catalog, args: &CitationsArgs) -> Result<()> {
    let mut session = PlaybookSession::new();
    session.select(catalog, &args.playbook_id)?;
    print!("{}", render::citation_list(&session.relevant_citations(catalog)));
    Ok(())
}

fn run_playbook(catalog: &Catalog, args: &PlaybookArgs) -> Result<()> {
    let mut session = PlaybookSession::new();
    session.select(catalog, &args.id)?;

    if let Some(path) = &args.facts_file {
        for (key, value) in read_facts(path)? {
            session.set_fact(&key, value)?;
        }
    }
    for (key, value) in &args.facts {
        session.set_fact(key, value.as_str())?;
    }
    for key in session.missing_facts() {
        warn!(fact = key, "fact not provided; the packet will carry a missing marker");
    }

    session.advance_to_citations()?;
    for citation in &args.citations {
        session.toggle_citation(catalog, citation)?;
    }
    session.generate_packet(catalog)?;

    if args.json {
        let record = session.archive_record().context("no packet was generated")?;
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else if let Some(packet) = session.rendered_packet() {
        println!("{packet}");
    }
    Ok(())
}

/// Reads a flat mapping of fact keys to values. YAML parsing also accepts JSON.
fn read_facts(path: &Path) -> Result<FactMap> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read facts {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("facts {} must map keys to strings", path.display()))
}
