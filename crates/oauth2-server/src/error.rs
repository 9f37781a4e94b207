//! Authorization and token request error types.
//!
//! Every validation step in the grant engine is a precondition guard: the
//! first failing check terminates the call with exactly one of these kinds.
//! Failures raised by repositories or factories are carried as
//! [`AuthError::Storage`] and propagate unchanged.

use std::fmt;

/// Errors that can occur while handling authorization and token requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The response type is not registered.
    #[error("Invalid response type: {response_type}")]
    InvalidResponseType {
        /// The rejected response type.
        response_type: String,
    },

    /// The scope is not in the allowed set or not permitted for the client.
    #[error("Invalid scope: {scope}")]
    InvalidScope {
        /// The rejected scope.
        scope: String,
    },

    /// No client is registered under the given id.
    #[error("Invalid client id: {client_id}")]
    InvalidClientId {
        /// The unknown client id.
        client_id: String,
    },

    /// The grant type is not registered or not permitted for the client.
    #[error("Invalid grant type: {grant_type}")]
    InvalidGrantType {
        /// The rejected grant type.
        grant_type: String,
    },

    /// The redirect URI is not registered for the client or is malformed.
    #[error("Invalid redirect uri: {redirect_uri}")]
    InvalidRedirectUri {
        /// The rejected redirect URI.
        redirect_uri: String,
    },

    /// No user exists for the id supplied with an authorization request.
    #[error("Invalid user id: {user_id}")]
    InvalidUserId {
        /// The unknown user id.
        user_id: String,
    },

    /// The client secret does not match.
    #[error("Invalid client secret")]
    InvalidClientSecret,

    /// The authorization code is unknown, expired, issued to another client,
    /// has no scope, or belongs to a user that no longer exists.
    #[error("Invalid authorization code")]
    InvalidAuthCode,

    /// The refresh token is unknown, expired, issued to another client, or
    /// its scope is empty or no longer permitted.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// The username and password do not identify a user.
    #[error("Invalid user credentials")]
    InvalidUser,

    /// No user is linked to the third-party union id.
    #[error("Invalid union id")]
    InvalidUnionId,

    /// Neither the server nor the client supplies a default scope.
    #[error("Invalid default scope")]
    InvalidDefaultScope,

    /// The grant does not support the requested operation.
    #[error("Unsupported method: {grant_type} does not handle {operation}")]
    UnsupportedMethod {
        /// The grant that rejected the call.
        grant_type: String,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// A repository or factory failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The server configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidResponseType` error.
    #[must_use]
    pub fn invalid_response_type(response_type: impl Into<String>) -> Self {
        Self::InvalidResponseType {
            response_type: response_type.into(),
        }
    }

    /// Creates a new `InvalidScope` error.
    #[must_use]
    pub fn invalid_scope(scope: impl Into<String>) -> Self {
        Self::InvalidScope {
            scope: scope.into(),
        }
    }

    /// Creates a new `InvalidClientId` error.
    #[must_use]
    pub fn invalid_client_id(client_id: impl Into<String>) -> Self {
        Self::InvalidClientId {
            client_id: client_id.into(),
        }
    }

    /// Creates a new `InvalidGrantType` error.
    #[must_use]
    pub fn invalid_grant_type(grant_type: impl Into<String>) -> Self {
        Self::InvalidGrantType {
            grant_type: grant_type.into(),
        }
    }

    /// Creates a new `InvalidRedirectUri` error.
    #[must_use]
    pub fn invalid_redirect_uri(redirect_uri: impl Into<String>) -> Self {
        Self::InvalidRedirectUri {
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Creates a new `InvalidUserId` error.
    #[must_use]
    pub fn invalid_user_id(user_id: impl Into<String>) -> Self {
        Self::InvalidUserId {
            user_id: user_id.into(),
        }
    }

    /// Creates a new `UnsupportedMethod` error.
    #[must_use]
    pub fn unsupported_method(grant_type: impl Into<String>, operation: &'static str) -> Self {
        Self::UnsupportedMethod {
            grant_type: grant_type.into(),
            operation,
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if the caller sent a request that cannot succeed.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !self.is_server_error()
    }

    /// Returns `true` if the failure originated in a collaborator or the
    /// server setup rather than in the request.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Configuration { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidResponseType { .. }
            | Self::InvalidGrantType { .. }
            | Self::InvalidRedirectUri { .. }
            | Self::UnsupportedMethod { .. } => ErrorCategory::Validation,
            Self::InvalidClientId { .. } | Self::InvalidClientSecret => ErrorCategory::Client,
            Self::InvalidUserId { .. } | Self::InvalidUser | Self::InvalidUnionId => {
                ErrorCategory::User
            }
            Self::InvalidAuthCode | Self::InvalidRefreshToken => ErrorCategory::Grant,
            Self::InvalidScope { .. } | Self::InvalidDefaultScope => ErrorCategory::Scope,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// Returns the OAuth 2.0 error code (RFC 6749) closest to this error.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::InvalidResponseType { .. } => "unsupported_response_type",
            Self::InvalidScope { .. } | Self::InvalidDefaultScope => "invalid_scope",
            Self::InvalidClientId { .. } | Self::InvalidClientSecret => "invalid_client",
            Self::InvalidGrantType { .. } => "unauthorized_client",
            Self::InvalidRedirectUri { .. } | Self::InvalidUserId { .. } => "invalid_request",
            Self::InvalidAuthCode
            | Self::InvalidRefreshToken
            | Self::InvalidUser
            | Self::InvalidUnionId => "invalid_grant",
            Self::UnsupportedMethod { .. } => "unsupported_grant_type",
            Self::Storage { .. } | Self::Configuration { .. } => "server_error",
        }
    }
}

/// Categories of request errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed or unsupported request shape.
    Validation,
    /// Client identification or authentication.
    Client,
    /// Resource owner identification.
    User,
    /// Authorization code or refresh token redemption.
    Grant,
    /// Scope resolution.
    Scope,
    /// Repository or factory failures.
    Infrastructure,
    /// Server configuration.
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Client => write!(f, "client"),
            Self::User => write!(f, "user"),
            Self::Grant => write!(f, "grant"),
            Self::Scope => write!(f, "scope"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}
