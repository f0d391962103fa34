use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::credentials::{CredentialProvider, EnvToken, FileToken, NoCredentials, StaticToken};
use crate::errors::ConfigError;
use crate::listing::PipelineOptions;

/// Application configuration, stored as a JSON file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Character catalog service
    #[serde(default)]
    pub catalog: ServiceConfig,

    /// Finance backend holding debt records
    #[serde(default = "ServiceConfig::backend")]
    pub backend: ServiceConfig,

    /// Listing pipeline settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Where the bearer token comes from
    #[serde(default)]
    pub auth: AuthConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// One remote service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServiceConfig {
    // @field: Base URL
    pub endpoint: String,

    // @field: Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServiceConfig {
    fn backend() -> Self {
        Self {
            endpoint: default_backend_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        url::Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            name,
            reason: e.to_string(),
        })?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_catalog_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Listing pipeline settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ListingConfig {
    /// Cap on concurrent episode lookups per page (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_enrichments: Option<usize>,
}

impl ListingConfig {
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_concurrent_enrichments: self.max_concurrent_enrichments,
        }
    }
}

/// Token source. The first configured entry wins: `token`, then `token_env`, then `token_file`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
}

impl AuthConfig {
    pub fn credential_provider(&self) -> Arc<dyn CredentialProvider> {
        if let Some(token) = &self.token {
            Arc::new(StaticToken::new(token.clone()))
        } else if let Some(var) = &self.token_env {
            Arc::new(EnvToken::new(var.clone()))
        } else if let Some(path) = &self.token_file {
            Arc::new(FileToken::new(path.clone()))
        } else {
            Arc::new(NoCredentials)
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_catalog_endpoint() -> String {
    "https://rickandmortyapi.com".to_string()
}

fn default_backend_endpoint() -> String {
    "http://localhost:8080".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog: ServiceConfig::default(),
            backend: ServiceConfig::backend(),
            listing: ListingConfig::default(),
            auth: AuthConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate("catalog")?;
        self.backend.validate("backend")?;
        Ok(())
    }

    /// Read a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write this config as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Load the config at `path`, writing a default one first if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}
