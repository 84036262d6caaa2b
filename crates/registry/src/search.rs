//! Case-insensitive substring filters over catalog records.
//!
//! Results keep catalog order. A blank term matches everything.

use docket_types::{CatalogSource, CorpusItem, Workflow};

/// Workflows whose title or description contains `term`.
pub fn search_workflows<'c>(catalog: &'c impl CatalogSource, term: &str) -> Vec<&'c Workflow> {
    let needle = term.trim().to_lowercase();
    catalog
        .workflows()
        .iter()
        .filter(|workflow| matches_any(&needle, [&workflow.title, &workflow.description]))
        .collect()
}

/// Corpus items whose title, citation, or text contains `term`.
pub fn search_corpus<'c>(catalog: &'c impl CatalogSource, term: &str) -> Vec<&'c CorpusItem> {
    let needle = term.trim().to_lowercase();
    catalog
        .corpus()
        .iter()
        .filter(|item| matches_any(&needle, [&item.title, &item.citation, &item.text]))
        .collect()
}

fn matches_any<const N: usize>(needle: &str, haystacks: [&String; N]) -> bool {
    needle.is_empty() || haystacks.iter().any(|haystack| haystack.to_lowercase().contains(needle))
}
