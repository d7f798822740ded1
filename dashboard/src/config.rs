//! # Dashboard Configuration
//!
//! Where the API lives, how long to wait for it, how long to debounce
//! search input and where the session file is kept. Loaded from an
//! optional YAML file; every field has a default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory created under the user's data directory for the session file
const APP_DIR_NAME: &str = "church-admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Server root, without the `/api` suffix
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub search_debounce_ms: u64,
    /// Overrides the per-user data directory
    pub session_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_ms: 10_000,
            search_debounce_ms: 300,
            session_dir: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dashboard config: {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse dashboard config: {:?}", path))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// The configured session directory, or `church-admin` under the
    /// platform data directory
    pub fn session_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.session_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join(APP_DIR_NAME))
            .context("Could not determine a data directory for the session")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://admin.example-church.org\nsession_dir: /tmp/church").unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://admin.example-church.org");
        assert_eq!(config.session_dir().unwrap(), PathBuf::from("/tmp/church"));
        assert_eq!(config.search_debounce_ms, 300);
    }
}
