//! OAuth 2.0 client and grant type domain types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// =============================================================================
// Grant Type
// =============================================================================

/// OAuth 2.0 grant types understood by the server.
///
/// Serialised with the canonical names (`AuthorizationCode`, ...). Parsing
/// also accepts the RFC 6749 spellings (`authorization_code`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantType {
    /// Authorization Code flow.
    #[serde(alias = "authorization_code")]
    AuthorizationCode,
    /// Client Credentials flow (machine-to-machine, no user).
    #[serde(alias = "client_credentials")]
    ClientCredentials,
    /// Resource Owner Password Credentials flow.
    #[serde(alias = "password")]
    Password,
    /// Refresh Token flow.
    #[serde(alias = "refresh_token")]
    RefreshToken,
    /// Implicit flow (access token in the redirect fragment).
    #[serde(alias = "implicit")]
    Implicit,
    /// Federated login through a third-party union id.
    #[serde(alias = "open_id")]
    OpenId,
}

impl GrantType {
    /// All grant types, in registration order.
    pub const ALL: [GrantType; 6] = [
        GrantType::AuthorizationCode,
        GrantType::ClientCredentials,
        GrantType::Password,
        GrantType::RefreshToken,
        GrantType::Implicit,
        GrantType::OpenId,
    ];

    /// Returns the canonical grant type name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "AuthorizationCode",
            Self::ClientCredentials => "ClientCredentials",
            Self::Password => "Password",
            Self::RefreshToken => "RefreshToken",
            Self::Implicit => "Implicit",
            Self::OpenId => "OpenId",
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string names no known grant type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grant type: {0}")]
pub struct UnknownGrantType(pub String);

impl FromStr for GrantType {
    type Err = UnknownGrantType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AuthorizationCode" | "authorization_code" => Ok(Self::AuthorizationCode),
            "ClientCredentials" | "client_credentials" => Ok(Self::ClientCredentials),
            "Password" | "password" => Ok(Self::Password),
            "RefreshToken" | "refresh_token" => Ok(Self::RefreshToken),
            "Implicit" | "implicit" => Ok(Self::Implicit),
            "OpenId" | "open_id" => Ok(Self::OpenId),
            other => Err(UnknownGrantType(other.to_string())),
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A registered client application.
///
/// The secret is held in whatever form the repository stores and the caller
/// presents; this type only checks that the two match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client identifier (the request's `app_id`).
    pub client_id: String,

    /// Client secret. `None` for clients that cannot authenticate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Human-readable display name.
    #[serde(default)]
    pub name: String,

    /// Grant types this client may use.
    pub grant_types: Vec<GrantType>,

    /// Registered redirect URIs. Matching is exact.
    #[serde(default)]
    pub redirect_uris: Vec<String>,

    /// Scopes this client may request. Matching is exact.
    #[serde(default)]
    pub scopes: Vec<String>,

    /// The client's own scope, used by the client credentials grant when the
    /// server has no default scope.
    #[serde(default)]
    pub default_scope: String,
}

impl Client {
    /// Creates a client with the given id and no permissions.
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        let client_id = client_id.into();
        Self {
            name: client_id.clone(),
            client_id,
            client_secret: None,
            grant_types: Vec::new(),
            redirect_uris: Vec::new(),
            scopes: Vec::new(),
            default_scope: String::new(),
        }
    }

    /// Sets the client secret.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Adds a permitted grant type.
    #[must_use]
    pub fn with_grant_type(mut self, grant_type: GrantType) -> Self {
        self.grant_types.push(grant_type);
        self
    }

    /// Adds a registered redirect URI.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uris.push(uri.into());
        self
    }

    /// Adds a permitted scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Sets the client's own default scope.
    #[must_use]
    pub fn with_default_scope(mut self, scope: impl Into<String>) -> Self {
        self.default_scope = scope.into();
        self
    }

    /// Checks the presented secret against the stored one.
    ///
    /// Both values are reduced to SHA-256 digests before comparison. A client
    /// without a secret never matches.
    #[must_use]
    pub fn validate_secret(&self, secret: &str) -> bool {
        match &self.client_secret {
            Some(stored) => Sha256::digest(stored.as_bytes()) == Sha256::digest(secret.as_bytes()),
            None => false,
        }
    }

    /// Checks if the client may use the given grant type.
    #[must_use]
    pub fn validate_grant_type(&self, grant_type: GrantType) -> bool {
        self.grant_types.contains(&grant_type)
    }

    /// Checks if the client may request the given scope.
    #[must_use]
    pub fn validate_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|allowed| allowed == scope)
    }

    /// Checks if the redirect URI is registered for this client.
    #[must_use]
    pub fn validate_redirect_uri(&self, uri: &str) -> bool {
        self.redirect_uris.iter().any(|allowed| allowed == uri)
    }
}
