//! Configuration loading for Pharmagent.
//! Reads pharmagent.toml from the current directory or the path in PHARMAGENT_CONFIG.
//! Every field has a default, so a missing file is not an error.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PharmaError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host()       -> String { "0.0.0.0".to_string() }
fn default_port()       -> u16    { 8000 }
fn default_static_dir() -> String { "static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String { "http://127.0.0.1:8000".to_string() }

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Multiplier applied to every agent's simulated latency. 0 disables it.
    #[serde(default = "default_latency_scale")]
    pub latency_scale: f64,
    /// Upper bound on a whole discovery run.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_latency_scale() -> f64 { 1.0 }
fn default_timeout_secs()  -> u64 { 300 }

/// Largest accepted `latency_scale`.
pub const MAX_LATENCY_SCALE: f64 = 1000.0;

impl AgentsConfig {
    /// Reject scales that are not a finite number in `0..=MAX_LATENCY_SCALE`.
    pub fn validate(&self) -> Result<(), PharmaError> {
        let scale = self.latency_scale;
        if !scale.is_finite() || !(0.0..=MAX_LATENCY_SCALE).contains(&scale) {
            return Err(PharmaError::Config(format!(
                "agents.latency_scale must be between 0 and {MAX_LATENCY_SCALE}, got {scale}"
            )));
        }
        Ok(())
    }
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            latency_scale: default_latency_scale(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_base_url")]
    pub base_url: String,
}

fn default_report_base_url() -> String { "https://pharma-agentic-ai.onrender.com".to_string() }

impl Default for ReportConfig {
    fn default() -> Self {
        Self { base_url: default_report_base_url() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "pharmagent=debug,tower_http=info,info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}


impl Config {
    /// Load configuration from pharmagent.toml, then apply environment overrides.
    /// A `.env` file in the working directory is read first when present.
    pub fn load() -> Result<Self, PharmaError> {
        let _ = dotenvy::dotenv();

        let path = std::env::var("PHARMAGENT_CONFIG")
            .unwrap_or_else(|_| "pharmagent.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            tracing::debug!(path = %path, "no config file, using defaults");
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PharmaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PharmaError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, PharmaError> {
        let config: Self = toml::from_str(content).map_err(|e| PharmaError::Config(e.to_string()))?;
        config.agents.validate()?;
        Ok(config)
    }

    /// Overlay `PHARMAGENT_*` variables resolved through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), PharmaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("PHARMAGENT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PHARMAGENT_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| PharmaError::Config(format!("PHARMAGENT_PORT is not a port: {port}")))?;
        }
        if let Some(url) = lookup("PHARMAGENT_BASE_URL") {
            self.client.base_url = url;
        }
        if let Some(scale) = lookup("PHARMAGENT_AGENT_LATENCY_SCALE") {
            self.agents.latency_scale = scale.parse().map_err(|_| {
                PharmaError::Config(format!("PHARMAGENT_AGENT_LATENCY_SCALE is not a number: {scale}"))
            })?;
            self.agents.validate()?;
        }
        if let Some(url) = lookup("PHARMAGENT_REPORT_BASE_URL") {
            self.report.base_url = url;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
