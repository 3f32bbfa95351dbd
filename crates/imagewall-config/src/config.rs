// crates/imagewall-config/src/config.rs
// ============================================================================
// Module: Imagewall Configuration
// Description: Configuration loading and validation for Imagewall.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The allow-list is read once at startup and never mutated; an invalid config
//! fails closed and never reaches the origin policy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::pattern::validate_literal_hostname;
use crate::pattern::validate_pathname;
use crate::pattern::validate_pattern_hostname;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "imagewall.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "IMAGEWALL_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of legacy domain entries.
pub(crate) const MAX_DOMAIN_ENTRIES: usize = 256;
/// Maximum number of remote pattern entries.
pub(crate) const MAX_REMOTE_PATTERNS: usize = 256;
/// Maximum total hostname length in bytes.
pub(crate) const MAX_HOSTNAME_LENGTH: usize = 253;
/// Maximum length of a single hostname label in bytes.
pub(crate) const MAX_HOSTNAME_LABEL_LENGTH: usize = 63;
/// Maximum pathname pattern length in bytes.
pub(crate) const MAX_PATHNAME_LENGTH: usize = 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Imagewall configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImagewallConfig {
    /// Remote image origin allow-list.
    #[serde(default)]
    pub images: ImagesConfig,
    /// Modification time of the config source file, when known.
    #[serde(skip)]
    pub source_modified_at: Option<SystemTime>,
}

impl ImagewallConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.source_modified_at = fs::metadata(&resolved).and_then(|meta| meta.modified()).ok();
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.images.validate()
    }
}

/// Remote image origin allow-list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    /// Legacy literal hostname allow-list. Deprecated; prefer `remote_patterns`.
    #[serde(default)]
    pub domains: Vec<String>,
    /// Remote pattern rules describing permitted image origins.
    #[serde(default)]
    pub remote_patterns: Vec<RemotePattern>,
}

impl ImagesConfig {
    /// Validates the allow-list entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the offending entry when any entry is
    /// invalid or a list exceeds its size limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.domains.len() > MAX_DOMAIN_ENTRIES {
            return Err(ConfigError::Invalid("images.domains has too many entries".to_string()));
        }
        if self.remote_patterns.len() > MAX_REMOTE_PATTERNS {
            return Err(ConfigError::Invalid(
                "images.remote_patterns has too many entries".to_string(),
            ));
        }
        for (idx, domain) in self.domains.iter().enumerate() {
            validate_literal_hostname(domain)
                .map_err(|err| ConfigError::Invalid(format!("images.domains[{idx}]: {err}")))?;
        }
        for (idx, pattern) in self.remote_patterns.iter().enumerate() {
            pattern.validate().map_err(|err| {
                ConfigError::Invalid(format!("images.remote_patterns[{idx}].{err}"))
            })?;
        }
        Ok(())
    }
}

/// Remote pattern rule describing a permitted image origin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemotePattern {
    /// Required URL scheme for the origin.
    pub protocol: Protocol,
    /// Hostname pattern. A leftmost `*.` label matches exactly one subdomain
    /// label; `**.` matches one or more. All other labels are literal.
    pub hostname: String,
    /// Required effective port. Absent means any port.
    #[serde(default)]
    pub port: Option<u16>,
    /// Path pattern the URL path must match. Absent means any path.
    #[serde(default)]
    pub pathname: Option<String>,
}

impl RemotePattern {
    /// Validates a single remote pattern rule.
    fn validate(&self) -> Result<(), String> {
        validate_pattern_hostname(&self.hostname).map_err(|err| format!("hostname {err}"))?;
        if self.port == Some(0) {
            return Err("port must be between 1 and 65535".to_string());
        }
        if let Some(pathname) = &self.pathname {
            validate_pathname(pathname).map_err(|err| format!("pathname {err}"))?;
        }
        Ok(())
    }
}

/// Permitted URL schemes for remote image origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

impl Protocol {
    /// Returns the canonical scheme string for this protocol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
