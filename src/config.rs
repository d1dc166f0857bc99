//! Configuration management
//!
//! Settings are read from the first TOML file found of:
//!
//! 1. an explicit `--config` path (must exist)
//! 2. `./.authgate.toml`
//! 3. `<config_dir>/authgate/config.toml`
//!
//! and then overridden from the environment. The model API key is only ever
//! read from `GEMINI_API_KEY`, never from a file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::paths;

/// Environment variable holding the model API key
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";

/// Environment variable overriding the caller identity
pub const ENV_CALLER: &str = "AUTHGATE_CALLER";

/// Environment variable overriding the ledger path
pub const ENV_LEDGER: &str = "AUTHGATE_LEDGER";

/// Environment variable overriding the server port
pub const ENV_PORT: &str = "PORT";

/// Full application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Language model settings
    #[serde(default)]
    pub model: ModelConfig,
    /// Page fetching settings
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Reconciliation settings
    #[serde(default)]
    pub consensus: ConsensusConfig,
    /// Ledger persistence settings
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// HTTP API settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Identity stamped on every write
    #[serde(default)]
    pub caller: CallerConfig,
    /// Model API key (environment only)
    #[serde(skip)]
    pub api_key: Option<String>,
}

/// Language model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name
    #[serde(default = "default_model_name")]
    pub name: String,
    /// API base URL
    #[serde(default = "default_model_base_url")]
    pub base_url: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Request timeout in seconds
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

fn default_model_name() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_model_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

const fn default_temperature() -> f64 {
    0.2
}

const fn default_model_timeout() -> u64 {
    120
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            base_url: default_model_base_url(),
            temperature: default_temperature(),
            timeout_secs: default_model_timeout(),
        }
    }
}

/// Page fetching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_fetch_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "AuthenticityGate/1.0 (Content Verification Bot)".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Reconciliation settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConsensusConfig {
    /// Independent executions per analysis
    #[serde(default = "default_validators")]
    pub validators: usize,
    /// Largest per-score difference still judged equivalent
    #[serde(default = "default_tolerance")]
    pub tolerance: u64,
}

const fn default_validators() -> usize {
    3
}

const fn default_tolerance() -> u64 {
    15
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            validators: default_validators(),
            tolerance: default_tolerance(),
        }
    }
}

/// Ledger persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Snapshot file
    #[serde(default = "paths::default_ledger")]
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: paths::default_ledger(),
        }
    }
}

/// HTTP API settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,
}

const fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Identity stamped on every write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerConfig {
    /// Caller identity recorded as the record's validator
    #[serde(default = "default_identity")]
    pub identity: String,
}

fn default_identity() -> String {
    "local".to_string()
}

impl Default for CallerConfig {
    fn default() -> Self {
        Self {
            identity: default_identity(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk and the process environment
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match Self::resolve_path(explicit)? {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                Self::from_file(&path)?
            },
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Pick the config file to read, if any
    fn resolve_path(explicit: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            return Ok(Some(path.to_path_buf()));
        }

        Ok([paths::project_config(), paths::global_config()].into_iter().find(|p| p.exists()))
    }

    /// Read a TOML config file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse TOML config text
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML (the API key is never written)
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(caller) = lookup(ENV_CALLER).filter(|c| !c.trim().is_empty()) {
            self.caller.identity = caller;
        }
        if let Some(ledger) = lookup(ENV_LEDGER).filter(|l| !l.trim().is_empty()) {
            self.ledger.path = PathBuf::from(ledger);
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("{ENV_PORT} must be a port number, got '{port}'"))?;
        }
        Ok(())
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.consensus.validators == 0 {
            anyhow::bail!("consensus.validators must be at least 1");
        }
        if self.model.name.trim().is_empty() {
            anyhow::bail!("model.name must not be empty");
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            anyhow::bail!("model.temperature must be between 0 and 2");
        }
        if self.model.timeout_secs == 0 || self.fetch.timeout_secs == 0 {
            anyhow::bail!("timeouts must be at least 1 second");
        }
        Ok(())
    }

    /// Whether a model API key is available
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
