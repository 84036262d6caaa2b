//! Four-phase playbook wizard: select, collect facts, select citations, assemble packet.
//!
//! The phase only moves forward. The single way back is [`PlaybookSession::reset`], which
//! returns to `Select` with no playbook bound. A rendered packet exists exactly when the
//! session is in the `Packet` phase.

use std::fmt;

use chrono::{DateTime, Utc};
use docket_types::{CatalogSource, CorpusItem, Playbook};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    EngineError,
    packet::{self, PacketRecord},
    templates::{self, FactMap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaybookPhase {
    #[default]
    Select,
    Facts,
    Citations,
    Packet,
}

impl fmt::Display for PlaybookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlaybookPhase::Select => "SELECT",
            PlaybookPhase::Facts => "FACTS",
            PlaybookPhase::Citations => "CITATIONS",
            PlaybookPhase::Packet => "PACKET",
        };
        f.write_str(label)
    }
}

/// Serializable view of a playbook session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaybookSnapshot {
    pub playbook_id: Option<String>,
    pub phase: PlaybookPhase,
    pub facts: FactMap,
    pub selected_citation_ids: Vec<String>,
    pub rendered_packet: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybookSession {
    playbook: Option<Playbook>,
    phase: PlaybookPhase,
    facts: FactMap,
    selected_citation_ids: IndexSet<String>,
    rendered_packet: Option<String>,
}

impl PlaybookSession {
    /// Creates an idle session in the `Select` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `playbook` and enters the fact-collection phase with empty facts and citations.
    pub fn select_playbook(&mut self, playbook: Playbook) {
        debug!(playbook = %playbook.id, "playbook selected");
        *self = Self {
            playbook: Some(playbook),
            phase: PlaybookPhase::Facts,
            ..Self::default()
        };
    }

    /// Looks up `playbook_id` and selects it. Unknown ids leave the session untouched.
    pub fn select(&mut self, catalog: &impl CatalogSource, playbook_id: &str) -> Result<(), EngineError> {
        let playbook = catalog
            .playbook(playbook_id)
            .ok_or_else(|| EngineError::UnknownPlaybook(playbook_id.to_string()))?;
        self.select_playbook(playbook.clone());
        Ok(())
    }

    pub fn phase(&self) -> PlaybookPhase {
        self.phase
    }

    pub fn playbook(&self) -> Option<&Playbook> {
        self.playbook.as_ref()
    }

    pub fn facts(&self) -> &FactMap {
        &self.facts
    }

    /// Selected citation ids in selection order.
    pub fn selected_citation_ids(&self) -> impl Iterator<Item = &str> {
        self.selected_citation_ids.iter().map(String::as_str)
    }

    pub fn rendered_packet(&self) -> Option<&str> {
        self.rendered_packet.as_deref()
    }

    fn bound_playbook(&self) -> Result<&Playbook, EngineError> {
        self.playbook.as_ref().ok_or(EngineError::NoPlaybookSelected)
    }

    fn require_phase(&self, operation: &'static str, allowed: &[PlaybookPhase]) -> Result<(), EngineError> {
        if allowed.contains(&self.phase) {
            return Ok(());
        }
        warn!(operation, phase = %self.phase, "rejected out-of-phase playbook operation");
        Err(EngineError::InvalidPhase {
            operation,
            actual: self.phase,
        })
    }

    /// Stores `value` verbatim for a fact the bound playbook declares.
    pub fn set_fact(&mut self, key: &str, value: impl Into<String>) -> Result<(), EngineError> {
        self.require_phase("set_fact", &[PlaybookPhase::Facts, PlaybookPhase::Citations])?;
        let playbook = self.bound_playbook()?;
        if playbook.fact(key).is_none() {
            return Err(EngineError::UnknownFact {
                playbook: playbook.id.clone(),
                key: key.to_string(),
            });
        }
        self.facts.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Moves from `Facts` to `Citations`. Incomplete facts do not block the transition.
    pub fn advance_to_citations(&mut self) -> Result<(), EngineError> {
        self.require_phase("advance_to_citations", &[PlaybookPhase::Facts])?;
        self.bound_playbook()?;
        self.phase = PlaybookPhase::Citations;
        debug!(missing = self.missing_facts().len(), "advanced to citation selection");
        Ok(())
    }

    /// Adds or removes `corpus_item_id` from the selection. Returns whether it is now selected.
    pub fn toggle_citation(&mut self, catalog: &impl CatalogSource, corpus_item_id: &str) -> Result<bool, EngineError> {
        self.require_phase("toggle_citation", &[PlaybookPhase::Citations])?;
        if catalog.corpus_item(corpus_item_id).is_none() {
            return Err(EngineError::UnknownCitation(corpus_item_id.to_string()));
        }
        if self.selected_citation_ids.shift_remove(corpus_item_id) {
            return Ok(false);
        }
        self.selected_citation_ids.insert(corpus_item_id.to_string());
        Ok(true)
    }

    /// Corpus items sharing a tag with the bound playbook, in catalog order.
    pub fn relevant_citations<'c>(&self, catalog: &'c impl CatalogSource) -> Vec<&'c CorpusItem> {
        let Some(playbook) = self.playbook.as_ref() else {
            return Vec::new();
        };
        catalog.corpus().iter().filter(|item| playbook.is_relevant(&item.tags)).collect()
    }

    /// Selected corpus items in selection order.
    pub fn selected_citations<'c>(&self, catalog: &'c impl CatalogSource) -> Vec<&'c CorpusItem> {
        self.selected_citation_ids
            .iter()
            .filter_map(|id| catalog.corpus_item(id))
            .collect()
    }

    /// Fact keys that will render as `[MISSING <KEY>]`.
    pub fn missing_facts(&self) -> Vec<&str> {
        let Some(playbook) = self.playbook.as_ref() else {
            return Vec::new();
        };
        playbook
            .facts
            .iter()
            .filter(|field| !templates::has_fact(&self.facts, &field.key))
            .map(|field| field.key.as_str())
            .collect()
    }

    /// Renders the playbook template, appends the fixed blocks, and enters `Packet`.
    pub fn generate_packet(&mut self, catalog: &impl CatalogSource) -> Result<&str, EngineError> {
        self.require_phase("generate_packet", &[PlaybookPhase::Citations])?;
        let playbook = self.bound_playbook()?;
        let template = catalog
            .template(&playbook.template_id)
            .ok_or_else(|| EngineError::UnknownTemplate {
                playbook: playbook.id.clone(),
                template: playbook.template_id.clone(),
            })?;

        let body = templates::render_template(template, &self.facts);
        let citations = self.selected_citations(catalog);
        let rendered = packet::assemble(&body, &citations, &playbook.next_steps, &playbook.appeal_grounds);
        debug!(playbook = %playbook.id, citations = citations.len(), bytes = rendered.len(), "packet generated");

        self.phase = PlaybookPhase::Packet;
        Ok(self.rendered_packet.insert(rendered).as_str())
    }

    /// Drops the bound playbook and returns to `Select`.
    pub fn reset(&mut self) {
        debug!("playbook session reset");
        *self = Self::default();
    }

    /// Archive record for the generated packet, stamped now. `None` before a packet exists.
    pub fn archive_record(&self) -> Option<PacketRecord> {
        self.archive_record_at(Utc::now())
    }

    pub fn archive_record_at(&self, created_at: DateTime<Utc>) -> Option<PacketRecord> {
        let packet = self.rendered_packet.as_deref()?;
        let title = self.playbook.as_ref().map(|playbook| playbook.title.as_str()).unwrap_or("Remedy Packet");
        Some(PacketRecord::playbook(title, packet, created_at))
    }

    pub fn snapshot(&self) -> PlaybookSnapshot {
        PlaybookSnapshot {
            playbook_id: self.playbook.as_ref().map(|playbook| playbook.id.clone()),
            phase: self.phase,
            facts: self.facts.clone(),
            selected_citation_ids: self.selected_citation_ids.iter().cloned().collect(),
            rendered_packet: self.rendered_packet.clone(),
        }
    }

    /// Rebuilds a session from a snapshot, rejecting snapshots that break the phase invariants.
    pub fn restore(catalog: &impl CatalogSource, snapshot: &PlaybookSnapshot) -> Result<Self, EngineError> {
        let invalid = |reason: &str| Err(EngineError::InvalidSnapshot(reason.to_string()));

        if snapshot.rendered_packet.is_some() != (snapshot.phase == PlaybookPhase::Packet) {
            return invalid("a rendered packet must be present exactly in the PACKET phase");
        }

        let Some(playbook_id) = snapshot.playbook_id.as_deref() else {
            if snapshot.phase != PlaybookPhase::Select
                || !snapshot.facts.is_empty()
                || !snapshot.selected_citation_ids.is_empty()
            {
                return invalid("only an empty SELECT session may omit the playbook");
            }
            return Ok(Self::default());
        };
        if snapshot.phase == PlaybookPhase::Select {
            return invalid("a SELECT session cannot have a playbook bound");
        }

        let playbook = catalog
            .playbook(playbook_id)
            .ok_or_else(|| EngineError::UnknownPlaybook(playbook_id.to_string()))?;
        if let Some(key) = snapshot.facts.keys().find(|key| playbook.fact(key).is_none()) {
            return Err(EngineError::UnknownFact {
                playbook: playbook.id.clone(),
                key: key.clone(),
            });
        }
        if let Some(id) = snapshot
            .selected_citation_ids
            .iter()
            .find(|id| catalog.corpus_item(id).is_none())
        {
            return Err(EngineError::UnknownCitation(id.clone()));
        }

        Ok(Self {
            playbook: Some(playbook.clone()),
            phase: snapshot.phase,
            facts: snapshot.facts.clone(),
            selected_citation_ids: snapshot.selected_citation_ids.iter().cloned().collect(),
            rendered_packet: snapshot.rendered_packet.clone(),
        })
    }
}
