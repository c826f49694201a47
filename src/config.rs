//! # Application Configuration
//!
//! One JSON file (every field optional) plus environment overrides:
//! `DATABASE_URL` (or `SUPABASE_DB_URL`), `ITPORTAL_HOST`, `ITPORTAL_PORT`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DatabaseConfig;
use crate::http_server::HttpServerConfig;
use crate::observability::LogConfig;
use crate::requisition::{RequisitionStrategy, DEFAULT_FISCAL_YEAR};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Suffix of requisition numbers (default: "25-26")
    #[serde(default = "default_fiscal_year")]
    pub fiscal_year: String,

    /// How requisition numbers are drawn (default: sequence)
    #[serde(default)]
    pub requisition_strategy: RequisitionStrategy,

    /// Refuse a second active allotment of the same asset (default: false)
    #[serde(default)]
    pub enforce_single_active_allotment: bool,

    #[serde(default)]
    pub log: LogConfig,
}

fn default_fiscal_year() -> String {
    DEFAULT_FISCAL_YEAR.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            database: DatabaseConfig::default(),
            fiscal_year: default_fiscal_year(),
            requisition_strategy: RequisitionStrategy::default(),
            enforce_single_active_allotment: false,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from an optional file, apply the process environment, validate
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without validating it
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply overrides from `lookup` (the environment in production)
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("DATABASE_URL").or_else(|| non_empty("SUPABASE_DB_URL")) {
            self.database.url = url;
        }
        if let Some(host) = non_empty("ITPORTAL_HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty("ITPORTAL_PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "ITPORTAL_PORT",
                value: port.clone(),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "database.url is required (or set DATABASE_URL)".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be > 0".to_string(),
            ));
        }
        if self.fiscal_year.trim().is_empty() {
            return Err(ConfigError::Invalid("fiscal_year must not be empty".to_string()));
        }
        Ok(())
    }
}
