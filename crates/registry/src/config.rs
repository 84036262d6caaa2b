use std::{env, fs, path::PathBuf};

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "DOCKET_CONFIG_PATH";

/// Environment variable overriding the configured catalog file.
pub const CATALOG_PATH_ENV: &str = "DOCKET_CATALOG_PATH";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file to load instead of the embedded default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl CatalogConfig {
    /// Loads the config from [`default_config_path`]. A missing or unreadable file yields the default.
    pub fn load() -> Self {
        Self::load_from(&default_config_path())
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        if let Ok(content) = fs::read_to_string(path)
            && let Ok(config) = serde_json::from_str(&content)
        {
            debug!(path = %path.display(), "loaded catalog config");
            return config;
        }
        debug!(path = %path.display(), "no usable catalog config, using defaults");
        CatalogConfig::default()
    }

    /// Catalog path after applying the [`CATALOG_PATH_ENV`] override.
    pub fn resolved_catalog_path(&self) -> Option<PathBuf> {
        resolve_catalog_path(env::var(CATALOG_PATH_ENV).ok().as_deref(), self.catalog_path.as_deref())
    }
}

/// Get the default path for the Docket configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(path.trim());
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docket")
        .join("config.json")
}

/// Env override wins over the configured value; blank values count as unset.
pub fn resolve_catalog_path(env_value: Option<&str>, configured: Option<&std::path::Path>) -> Option<PathBuf> {
    if let Some(value) = env_value.map(str::trim).filter(|value| !value.is_empty()) {
        return Some(expand_tilde(value));
    }
    configured.map(|path| expand_tilde(&path.to_string_lossy()))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs_next::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn env_value_overrides_configured_path() {
        let resolved = resolve_catalog_path(Some("/tmp/override.yaml"), Some(Path::new("/etc/docket.yaml")));
        assert_eq!(resolved, Some(PathBuf::from("/tmp/override.yaml")));
    }

    #[test]
    fn blank_env_value_falls_back_to_config() {
        let resolved = resolve_catalog_path(Some("  "), Some(Path::new("/etc/docket.yaml")));
        assert_eq!(resolved, Some(PathBuf::from("/etc/docket.yaml")));
        assert_eq!(resolve_catalog_path(None, None), None);
    }

    #[test]
    fn missing_config_file_yields_default() {
        let config = CatalogConfig::load_from(Path::new("/nonexistent/docket/config.json"));
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn reads_catalog_path_from_json() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "catalog_path": "/srv/catalog.yaml" }"#).expect("write config");
        let config = CatalogConfig::load_from(&path);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.yaml")));
    }

    #[test]
    fn malformed_config_file_yields_default() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").expect("write config");
        assert_eq!(CatalogConfig::load_from(&path), CatalogConfig::default());
    }
}
