//! # Docket Engine
//!
//! The guided procedure engine. It walks users through catalog workflows step by step and
//! turns playbook facts and citations into an assembled packet. Everything here is
//! synchronous and side-effect free: sessions are plain values owned by the caller, and
//! catalog data is injected through [`CatalogSource`](docket_types::CatalogSource).
//!
//! ## Usage
//!
//! ```rust
//! use docket_engine::{PlaybookSession, WorkflowSession};
//! use docket_registry::Catalog;
//!
//! let catalog = Catalog::embedded()?;
//!
//! let mut workflow = WorkflowSession::start(&catalog, "foia-request-protocol", None)?;
//! workflow.complete_active_step();
//! assert_eq!(workflow.active_step_index(), 1);
//!
//! let mut playbook = PlaybookSession::new();
//! playbook.select(&catalog, "foia-playbook")?;
//! playbook.set_fact("agency_name", "Department of Records")?;
//! playbook.advance_to_citations()?;
//! let packet = playbook.generate_packet(&catalog)?;
//! assert!(packet.contains("Department of Records"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`templates`**: `{{key}}` substitution with `[MISSING <KEY>]` markers
//! - **`payload`**: rule-table check of extraction payloads against workflow steps
//! - **`workflow`**: linear step session with payload-aware fast-forward
//! - **`playbook`**: four-phase wizard session
//! - **`packet`**: packet assembly and archive records

pub mod error;
pub mod packet;
pub mod payload;
pub mod playbook;
pub mod templates;
pub mod workflow;

#[cfg(test)]
mod test_support;

pub use error::EngineError;
pub use packet::{PacketRecord, assemble};
pub use payload::{PayloadValidator, payload_satisfies};
pub use playbook::{PlaybookPhase, PlaybookSession, PlaybookSnapshot};
pub use templates::{FactMap, missing_marker, placeholder_keys, render, render_template};
pub use workflow::state::{StepAdvance, StepStatus, WorkflowSession, WorkflowSnapshot};
