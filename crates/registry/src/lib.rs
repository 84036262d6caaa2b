//! Catalog loading for Docket.
//!
//! This crate owns the read-only reference data the engine consults: workflows, playbooks,
//! templates, the citation corpus, scripts, and the payload rule table. It loads that data
//! from the embedded default catalog or from a YAML/JSON file, checks its integrity, and
//! exposes it through [`docket_types::CatalogSource`].

pub mod catalog;
pub mod config;
pub mod search;
pub mod validation;

pub use catalog::{Catalog, CatalogError};
pub use config::{CATALOG_PATH_ENV, CONFIG_PATH_ENV, CatalogConfig, default_config_path};
pub use search::{search_corpus, search_workflows};
pub use validation::CatalogIssue;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use docket_types::CatalogSource;

    use super::*;

    #[test]
    fn embedded_catalog_is_valid_and_unique() {
        let catalog = Catalog::embedded().expect("load embedded catalog");
        assert!(!catalog.workflows().is_empty(), "catalog workflows should not be empty");
        assert!(!catalog.playbooks().is_empty(), "catalog playbooks should not be empty");

        let mut seen = HashSet::new();
        let duplicates: Vec<&str> = catalog
            .corpus()
            .iter()
            .filter(|item| !seen.insert(item.id.as_str()))
            .map(|item| item.id.as_str())
            .collect();
        assert!(duplicates.is_empty(), "duplicate corpus ids: {duplicates:?}");
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn embedded_catalog_carries_builtin_payload_rules() {
        let catalog = Catalog::embedded().expect("load embedded catalog");
        let names: Vec<&str> = catalog.payload_rules().iter().map(|rule| rule.name.as_str()).collect();
        assert_eq!(names, vec!["longform-birth-record", "forensic-identifier"]);
    }
}
