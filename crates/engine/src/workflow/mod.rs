//! Linear workflow sessions.
//!
//! A workflow session is the cursor over one catalog workflow: which step is active, which
//! steps are done, and which later steps an extraction payload already unlocks.

pub mod state;
