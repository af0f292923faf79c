//! Configuration file for the CLI.
//!
//! Stored as JSON at `<config dir>/pageviews/config.json`. A missing file
//! means defaults; command-line flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pageviews_core::ApiHeader;
use pageviews_fetch::{DEFAULT_BASE_URL, EndpointSet, HttpSettings};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Project queried by default, e.g. `en.wikipedia`.
    #[serde(default = "default_project")]
    pub project: String,
    /// `User-Agent` sent upstream.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Contact address sent in `From`.
    #[serde(default)]
    pub from: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_project() -> String {
    "en.wikipedia".to_string()
}

fn default_user_agent() -> String {
    concat!("pageviews-cli/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            user_agent: default_user_agent(),
            from: String::new(),
            timeout_secs: default_timeout_secs(),
            base_url: default_base_url(),
        }
    }
}

impl CliConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pageviews")
            .join("config.json")
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: CliConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(
        mut self,
        project: Option<&str>,
        user_agent: Option<&str>,
        from: Option<&str>,
    ) -> Self {
        if let Some(project) = project {
            self.project = project.to_string();
        }
        if let Some(user_agent) = user_agent {
            self.user_agent = user_agent.to_string();
        }
        if let Some(from) = from {
            self.from = from.to_string();
        }
        self
    }

    /// Identification headers.
    pub fn api_header(&self) -> ApiHeader {
        ApiHeader::new(&self.user_agent, &self.from)
    }

    /// Transport settings.
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings::with_timeout_secs(self.timeout_secs)
    }

    /// Endpoint templates.
    pub fn endpoints(&self) -> EndpointSet {
        EndpointSet::new(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = CliConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.project, "en.wikipedia");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = CliConfig {
            project: "fr.wikipedia".to_string(),
            from: "me@example.org".to_string(),
            ..CliConfig::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(CliConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"project": "de.wikipedia"}"#).unwrap();

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.project, "de.wikipedia");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(CliConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::default().with_overrides(Some("es.wikipedia"), None, Some("ops@example.org"));
        assert_eq!(config.project, "es.wikipedia");
        assert_eq!(config.user_agent, default_user_agent());
        assert_eq!(config.api_header().call_from, "ops@example.org");
    }
}
