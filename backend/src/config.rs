//! # Server Configuration
//!
//! Settings are resolved in three layers, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional YAML file, named by `CHURCH_ADMIN_CONFIG`
//! 3. `CHURCH_ADMIN_*` environment variables
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 8000
//! cors_origin: https://admin.example-church.org
//! api_token: change-me
//! simulated_latency_ms: 250
//! max_upload_bytes: 5242880
//! log_filter: church_admin_backend=debug,tower_http=info
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_VAR: &str = "CHURCH_ADMIN_CONFIG";
const ENV_PREFIX: &str = "CHURCH_ADMIN_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed browser origin; `None` disables the CORS layer
    pub cors_origin: Option<String>,
    /// When set, every `/api` route except health requires this bearer token
    pub api_token: Option<String>,
    /// Delay added to every in-memory repository operation
    pub simulated_latency_ms: u64,
    pub max_upload_bytes: usize,
    /// `tracing-subscriber` env-filter directive
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origin: Some("http://localhost:8080".to_string()),
            api_token: None,
            simulated_latency_ms: 0,
            max_upload_bytes: 10 * 1024 * 1024,
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults, then the file named by `CHURCH_ADMIN_CONFIG`, then the environment
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Apply `CHURCH_ADMIN_*` overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(host) = var("HOST") {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("Invalid {}PORT: {}", ENV_PREFIX, port))?;
        }
        if let Some(origin) = var("CORS_ORIGIN") {
            self.cors_origin = Some(origin).filter(|origin| !origin.is_empty());
        }
        if let Some(token) = var("API_TOKEN") {
            self.api_token = Some(token).filter(|token| !token.is_empty());
        }
        if let Some(latency) = var("SIMULATED_LATENCY_MS") {
            self.simulated_latency_ms = latency
                .parse()
                .with_context(|| format!("Invalid {}SIMULATED_LATENCY_MS: {}", ENV_PREFIX, latency))?;
        }
        if let Some(limit) = var("MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = limit
                .parse()
                .with_context(|| format!("Invalid {}MAX_UPLOAD_BYTES: {}", ENV_PREFIX, limit))?;
        }
        if let Some(filter) = var("LOG") {
            self.log_filter = filter;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid host address: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
