//! Application settings loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) gives a
//! working offline setup on the bundled fixture data. String values may
//! reference environment variables as `${NAME}` or `${NAME:-default}`.
//!
//! ```toml
//! [address]
//! backend = "http"
//! api_key = "${SKIP_HIRE_ADDRESS_KEY}"
//!
//! [catalog]
//! backend = "http"
//! timeout_secs = 10
//!
//! [logging]
//! level = "debug"
//! file = "skip-hire.log"
//! console = false
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use hire_core::ServiceConfig;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceSection {
    /// `"http"` or `"fixture"`.
    pub backend: String,
    /// URL for `http`, CSV path for `fixture`. Empty selects the backend's
    /// default.
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            backend: "fixture".to_string(),
            endpoint: String::new(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl ServiceSection {
    pub fn to_service_config(&self) -> ServiceConfig {
        ServiceConfig {
            backend: self.backend.trim().to_lowercase(),
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone().filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Bare level or full `EnvFilter` directive.
    pub level: String,
    pub file: Option<PathBuf>,
    /// Log to the terminal (stderr) as well.
    pub console: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            console: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub address: ServiceSection,
    pub catalog: ServiceSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let resolved = resolve_env_vars(input)?;
        let config: AppConfig = toml::from_str(&resolved)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&input)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, section) in [("address", &self.address), ("catalog", &self.catalog)] {
            if section.backend.trim().is_empty() {
                return Err(ConfigError::Validation(format!("[{name}] backend cannot be empty")));
            }
            if section.timeout_secs == 0 {
                return Err(ConfigError::Validation(format!(
                    "[{name}] timeout_secs must be at least 1"
                )));
            }
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("[logging] level cannot be empty".into()));
        }
        Ok(())
    }
}

/// Replaces `${NAME}` with the value of `NAME`, or with the text after
/// `:-` when `NAME` is unset.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
        .map_err(|e| ConfigError::Parse(format!("regex error: {e}")))?;

    let mut missing = None;
    let resolved = re.replace_all(input, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match (std::env::var(name), caps.get(2)) {
            (Ok(value), _) => value,
            (Err(_), Some(default)) => default.as_str().to_string(),
            (Err(_), None) => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(ConfigError::Validation(format!(
            "environment variable '{name}' not found"
        ))),
        None => Ok(resolved.into_owned()),
    }
}
