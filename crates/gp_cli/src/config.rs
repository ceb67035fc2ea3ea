//! Process configuration from the environment (`.env` honoured).
//!
//! - `GP_LOG_LEVEL`      default log filter (`warn`)
//! - `GP_DEFAULT_POLICY` policy when neither flag nor scenario names one (`equal`)

use std::env;
use std::fmt;

use gp_core::Policy;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub log_level: String,
    pub default_policy: Policy,
}

impl CliConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(env::var("GP_LOG_LEVEL").ok(), env::var("GP_DEFAULT_POLICY").ok())
    }

    fn from_vars(log_level: Option<String>, policy: Option<String>) -> Result<Self, ConfigError> {
        let default_policy = match policy {
            Some(p) => p.parse().map_err(|_| ConfigError::InvalidPolicy(p))?,
            None => Policy::default(),
        };
        Ok(Self {
            log_level: log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            default_policy,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPolicy(p) => write!(f, "GP_DEFAULT_POLICY: unknown policy '{p}'"),
        }
    }
}

impl std::error::Error for ConfigError {}
