//! Command-line surface for the `docket` binary.
use std::{fmt, path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "docket",
    version,
    about = "Guided procedures, document templates, and remedy packets",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Catalog file (YAML or JSON) to use instead of the configured or embedded catalog
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List workflows, optionally filtered by a search term
    Workflows(WorkflowsArgs),
    /// Walk a workflow and print each step's status
    Workflow(WorkflowArgs),
    /// List playbooks
    Playbooks,
    /// List the citations relevant to a playbook
    Citations(CitationsArgs),
    /// Fill a playbook and print the generated packet
    Playbook(PlaybookArgs),
    /// Check the catalog for integrity issues
    Validate,
}

#[derive(Args, Debug)]
pub struct WorkflowsArgs {
    /// Case-insensitive match against title and description
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct WorkflowArgs {
    /// Workflow identifier
    pub id: String,

    /// JSON extraction payload used for fast-forward and step status
    #[arg(long, value_name = "FILE")]
    pub payload: Option<PathBuf>,

    /// Action applied in order: `complete`, `back`, or `jump:<STEP>` (1-based)
    #[arg(long = "action", value_name = "ACTION")]
    pub actions: Vec<WorkflowAction>,

    /// Print the session snapshot and step statuses as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CitationsArgs {
    /// Playbook identifier
    pub playbook_id: String,
}

#[derive(Args, Debug)]
pub struct PlaybookArgs {
    /// Playbook identifier
    pub id: String,

    /// Fact value as KEY=VALUE; repeatable, applied after --facts
    #[arg(long = "fact", value_name = "KEY=VALUE", value_parser = parse_fact)]
    pub facts: Vec<(String, String)>,

    /// YAML or JSON mapping of fact keys to values
    #[arg(long = "facts", value_name = "FILE")]
    pub facts_file: Option<PathBuf>,

    /// Corpus item to cite; repeatable, listed in the given order
    #[arg(long = "cite", value_name = "ID")]
    pub citations: Vec<String>,

    /// Print the archive record as JSON instead of the packet text
    #[arg(long)]
    pub json: bool,
}

/// One scripted step of a `workflow` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    Complete,
    Back,
    /// Zero-based step index.
    Jump(usize),
}

impl FromStr for WorkflowAction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "complete" => Ok(Self::Complete),
            "back" => Ok(Self::Back),
            other => {
                let step = other
                    .strip_prefix("jump:")
                    .ok_or_else(|| format!("unknown action '{other}'; expected complete, back, or jump:<STEP>"))?;
                match step.parse::<usize>() {
                    Ok(number) if number > 0 => Ok(Self::Jump(number - 1)),
                    _ => Err(format!("invalid step number '{step}'; steps are numbered from 1")),
                }
            }
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Back => write!(f, "back"),
            Self::Jump(index) => write!(f, "jump:{}", index + 1),
        }
    }
}

fn parse_fact(value: &str) -> Result<(String, String), String> {
    let (key, fact) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{value}'"))?;
    if key.is_empty() {
        return Err(format!("missing fact key in '{value}'"));
    }
    Ok((key.to_string(), fact.to_string()))
}
