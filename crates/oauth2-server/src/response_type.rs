//! Authorization endpoint response types.
//!
//! The response type selects which grant's authorization operation runs:
//! `code` mints an authorization code, `token` mints an access token
//! directly.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::GrantType;

/// Authorization endpoint `response_type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Authorization code in the redirect query.
    Code,
    /// Access token in the redirect fragment.
    Token,
}

impl ResponseType {
    /// Returns the `response_type` parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
        }
    }
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string names no known response type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown response type: {0}")]
pub struct UnknownResponseType(pub String);

impl FromStr for ResponseType {
    type Err = UnknownResponseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "token" => Ok(Self::Token),
            other => Err(UnknownResponseType(other.to_string())),
        }
    }
}

/// Maps response types to the grant whose authorization operation they run.
#[derive(Debug, Clone)]
pub struct ResponseTypeRegistry {
    entries: HashMap<ResponseType, GrantType>,
}

impl ResponseTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates the standard registry: `code` → AuthorizationCode,
    /// `token` → Implicit.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with(ResponseType::Code, GrantType::AuthorizationCode)
            .with(ResponseType::Token, GrantType::Implicit)
    }

    /// Adds or replaces a mapping.
    #[must_use]
    pub fn with(mut self, response_type: ResponseType, grant_type: GrantType) -> Self {
        self.entries.insert(response_type, grant_type);
        self
    }

    /// Resolves a raw `response_type` value.
    ///
    /// Returns `None` for unknown or unregistered values.
    #[must_use]
    pub fn resolve(&self, response_type: &str) -> Option<GrantType> {
        let response_type = response_type.parse::<ResponseType>().ok()?;
        self.entries.get(&response_type).copied()
    }

    /// Returns `true` if the response type is registered.
    #[must_use]
    pub fn contains(&self, response_type: &str) -> bool {
        self.resolve(response_type).is_some()
    }
}

impl Default for ResponseTypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
