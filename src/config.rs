use anyhow::{Context, Result};
use std::env;
use std::sync::OnceLock;
use tracing::warn;

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// Settings for rendering errors at a transport boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Include the wrapped cause's text in response bodies
    pub expose_cause: bool,
    /// Log 4xx conversions at warn level
    pub log_client_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expose_cause: false,
            log_client_errors: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Config used by the implicit conversions (`IntoResponse`, `From`).
    ///
    /// Loaded from the environment on first use; an invalid environment is
    /// logged and replaced by the defaults.
    pub fn global() -> &'static Config {
        GLOBAL.get_or_init(|| {
            Self::from_env().unwrap_or_else(|e| {
                warn!("Invalid error response configuration, using defaults: {:#}", e);
                Config::default()
            })
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            expose_cause: parse_flag(lookup("ERRORS_EXPOSE_CAUSE"), false)
                .context("ERRORS_EXPOSE_CAUSE must be true or false")?,
            log_client_errors: parse_flag(lookup("ERRORS_LOG_CLIENT_ERRORS"), true)
                .context("ERRORS_LOG_CLIENT_ERRORS must be true or false")?,
        })
    }
}

fn parse_flag(value: Option<String>, default: bool) -> Result<bool> {
    match value {
        Some(raw) => Ok(raw.trim().to_ascii_lowercase().parse::<bool>()?),
        None => Ok(default),
    }
}
