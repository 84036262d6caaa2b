//! Playbook wizard sessions and their phase machine.

pub mod state;

pub use state::{PlaybookPhase, PlaybookSession, PlaybookSnapshot};
