//! Authorization server configuration.
//!
//! Holds the server-wide default scope, the refresh token rotation policy and
//! the artifact lifetimes consumed by factory implementations.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted lifetime for any artifact (100 years).
pub const MAX_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

/// Root server configuration.
///
/// # Example (TOML)
///
/// ```toml
/// default_scope = "basic"
/// refresh_token_rotation = false
///
/// [lifetimes]
/// authorization_code_lifetime = "10m"
/// access_token_lifetime = "1h"
/// refresh_token_lifetime = "30d"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Scope bound into tokens by the Password, ClientCredentials and OpenId
    /// grants. Empty means "not configured".
    pub default_scope: String,

    /// Issue a fresh refresh token (and drop the presented one) on every
    /// refresh. Disabled by default: the presented token stays valid.
    pub refresh_token_rotation: bool,

    /// Artifact lifetimes.
    pub lifetimes: LifetimeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            default_scope: String::new(),
            refresh_token_rotation: false,
            lifetimes: LifetimeConfig::default(),
        }
    }
}

/// Lifetimes used when minting authorization codes and tokens.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LifetimeConfig {
    /// Authorization code lifetime.
    #[serde(with = "humantime_serde")]
    pub authorization_code_lifetime: Duration,

    /// Access token lifetime.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Refresh token lifetime.
    #[serde(with = "humantime_serde")]
    pub refresh_token_lifetime: Duration,
}

impl Default for LifetimeConfig {
    fn default() -> Self {
        Self {
            authorization_code_lifetime: Duration::from_secs(600), // 10 minutes
            access_token_lifetime: Duration::from_secs(3600),      // 1 hour
            refresh_token_lifetime: Duration::from_secs(30 * 24 * 3600), // 30 days
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl ServerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the default scope.
    #[must_use]
    pub fn with_default_scope(mut self, scope: impl Into<String>) -> Self {
        self.default_scope = scope.into();
        self
    }

    /// Enables or disables refresh token rotation.
    #[must_use]
    pub fn with_refresh_token_rotation(mut self, rotate: bool) -> Self {
        self.refresh_token_rotation = rotate;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The default scope is non-empty but consists only of whitespace
    /// - Any lifetime is zero or longer than [`MAX_LIFETIME`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_scope.is_empty() && self.default_scope.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "default_scope cannot be blank".to_string(),
            ));
        }

        let lifetimes = [
            (
                "authorization_code_lifetime",
                self.lifetimes.authorization_code_lifetime,
            ),
            ("access_token_lifetime", self.lifetimes.access_token_lifetime),
            ("refresh_token_lifetime", self.lifetimes.refresh_token_lifetime),
        ];
        for (name, lifetime) in lifetimes {
            if lifetime.is_zero() {
                return Err(ConfigError::InvalidValue(format!("{} must be > 0", name)));
            }
            if lifetime > MAX_LIFETIME {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must be at most 100 years",
                    name
                )));
            }
        }

        Ok(())
    }
}
