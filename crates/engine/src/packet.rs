//! Final packet assembly and the archive record handed to persistence.

use chrono::{DateTime, Utc};
use docket_types::CorpusItem;
use serde::{Deserialize, Serialize};

pub const CITATIONS_HEADING: &str = "LEGAL AUTHORITIES CITED:";
pub const NEXT_STEPS_HEADING: &str = "FOLLOW-UP PROTOCOL & NEXT STEPS:";
pub const APPEAL_GROUNDS_HEADING: &str = "GROUNDS FOR APPEAL (IF REMEDY DENIED):";

const BLOCK_SEPARATOR: &str = "\n\n";

/// Composes a packet from the rendered template body and three appended blocks.
///
/// Order is fixed: body, cited authorities (only when `citations` is non-empty, in the
/// given order), numbered next steps, bulleted appeal grounds. The last two blocks are
/// always emitted, even with empty lists.
pub fn assemble(body: &str, citations: &[&CorpusItem], next_steps: &[String], appeal_grounds: &[String]) -> String {
    let mut packet = String::from(body);

    if !citations.is_empty() {
        let entries: Vec<String> = citations
            .iter()
            .map(|item| format!("- {}: {}\n  \"{}\"", item.title, item.citation, item.text))
            .collect();
        push_block(&mut packet, CITATIONS_HEADING, &entries.join(BLOCK_SEPARATOR));
    }

    let numbered: Vec<String> = next_steps
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{}. {}", index + 1, step))
        .collect();
    push_block(&mut packet, NEXT_STEPS_HEADING, &numbered.join("\n"));

    let bulleted: Vec<String> = appeal_grounds.iter().map(|ground| format!("• {ground}")).collect();
    push_block(&mut packet, APPEAL_GROUNDS_HEADING, &bulleted.join("\n"));

    packet
}

fn push_block(packet: &mut String, heading: &str, body: &str) {
    packet.push_str(BLOCK_SEPARATOR);
    packet.push_str(heading);
    packet.push('\n');
    packet.push_str(body);
}

/// Plain-data record of a generated packet, ready for any persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PacketRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Origin of the record; packets generated by playbooks use `playbook`.
    pub kind: String,
    pub title: String,
    pub summary: String,
    /// Full packet text.
    pub details: String,
}

impl PacketRecord {
    pub fn playbook(title: impl Into<String>, details: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: format!("playbook-{}", created_at.timestamp_millis()),
            created_at,
            kind: "playbook".into(),
            title: title.into(),
            summary: "Generated interactive remedy packet.".into(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use docket_types::CorpusKind;

    fn item(id: &str, title: &str) -> CorpusItem {
        CorpusItem {
            id: id.into(),
            kind: CorpusKind::Statute,
            title: title.into(),
            citation: format!("{title} § 1"),
            jurisdiction: String::new(),
            text: format!("Text of {title}."),
            notes: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn omits_citation_block_without_citations() {
        let packet = assemble("BODY", &[], &["A".into(), "B".into()], &["C".into()]);
        assert!(packet.starts_with("BODY"));
        assert!(!packet.contains(CITATIONS_HEADING));
        assert!(packet.contains("1. A"));
        assert!(packet.contains("2. B"));
        assert_eq!(packet.matches("• C").count(), 1);
        assert_eq!(
            packet,
            "BODY\n\nFOLLOW-UP PROTOCOL & NEXT STEPS:\n1. A\n2. B\n\nGROUNDS FOR APPEAL (IF REMEDY DENIED):\n• C"
        );
    }

    #[test]
    fn lists_citations_in_selection_order() {
        let first = item("b-act", "B Act");
        let second = item("a-act", "A Act");
        let packet = assemble("BODY", &[&first, &second], &[], &[]);
        let b_position = packet.find("- B Act: B Act § 1").expect("first citation");
        let a_position = packet.find("- A Act: A Act § 1").expect("second citation");
        assert!(b_position < a_position);
        assert!(packet.contains("  \"Text of B Act.\"\n\n- A Act"));
        assert!(packet.find(CITATIONS_HEADING) < packet.find(NEXT_STEPS_HEADING));
    }

    #[test]
    fn keeps_empty_protocol_blocks() {
        let packet = assemble("BODY", &[], &[], &[]);
        assert!(packet.contains(NEXT_STEPS_HEADING));
        assert!(packet.contains(APPEAL_GROUNDS_HEADING));
        assert!(!packet.contains("1."));
        assert!(!packet.contains('•'));
    }

    #[test]
    fn record_id_derives_from_timestamp() {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single().expect("valid timestamp");
        let record = PacketRecord::playbook("FOIA Record Quest", "packet", created_at);
        assert_eq!(record.id, format!("playbook-{}", created_at.timestamp_millis()));
        assert_eq!(record.kind, "playbook");
        assert_eq!(record.details, "packet");
    }
}
