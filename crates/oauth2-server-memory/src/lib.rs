//! In-memory storage backend for oauth2-server.
//!
//! Provides:
//!
//! - Repositories for clients, users, third-party links, authorization
//!   codes, access tokens and refresh tokens, all on `dashmap::DashMap`
//! - [`RandomTokenFactory`], minting random base64url codes and tokens
//! - Argon2id password hashing for stored users
//!
//! Every `remove` is a single atomic map removal, so a code or refresh token
//! can be claimed at most once even under concurrent redemption.
//!
//! # Example
//!
//! ```ignore
//! use oauth2_server::{AuthorizationServer, ServerConfig};
//! use oauth2_server_memory::MemoryStore;
//!
//! let store = MemoryStore::new();
//! store.clients().insert(client);
//! store.users().insert_user(User::new("7", "alice"), "pw")?;
//!
//! let config = ServerConfig::default().with_default_scope("basic");
//! let server = AuthorizationServer::new(store.grant_context(&config));
//! ```

pub mod client;
pub mod factory;
pub mod password;
pub mod token;
pub mod user;

use std::sync::Arc;

use oauth2_server::{AuthError, GrantContext, ServerConfig};
use time::OffsetDateTime;

pub use client::InMemoryClientRepository;
pub use factory::RandomTokenFactory;
pub use password::{hash_password, verify_password};
pub use token::{
    InMemoryAccessTokenRepository, InMemoryAuthCodeRepository, InMemoryRefreshTokenRepository,
};
pub use user::{InMemoryUserRepository, InMemoryUserThirdPartyRepository};

// =============================================================================
// Error Types
// =============================================================================

/// Errors raised by the in-memory backend outside the repository traits.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An entry with the same key already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Password hashing or hash parsing failed.
    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

impl StoreError {
    /// Create a `Conflict` error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Returns `true` if this is a `Conflict` error.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<argon2::password_hash::Error> for StoreError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::PasswordHash(err.to_string())
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::storage(err.to_string())
    }
}

/// Result type for backend operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Memory Store
// =============================================================================

/// All in-memory repositories, shared behind `Arc`s.
///
/// Cloning the store clones the handles, not the data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    clients: Arc<InMemoryClientRepository>,
    users: Arc<InMemoryUserRepository>,
    user_third_parties: Arc<InMemoryUserThirdPartyRepository>,
    auth_codes: Arc<InMemoryAuthCodeRepository>,
    access_tokens: Arc<InMemoryAccessTokenRepository>,
    refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Repository Accessors
    // -------------------------------------------------------------------------

    /// Client repository.
    #[must_use]
    pub fn clients(&self) -> &InMemoryClientRepository {
        &self.clients
    }

    /// User repository.
    #[must_use]
    pub fn users(&self) -> &InMemoryUserRepository {
        &self.users
    }

    /// Third-party link repository.
    #[must_use]
    pub fn user_third_parties(&self) -> &InMemoryUserThirdPartyRepository {
        &self.user_third_parties
    }

    /// Authorization code repository.
    #[must_use]
    pub fn auth_codes(&self) -> &InMemoryAuthCodeRepository {
        &self.auth_codes
    }

    /// Access token repository.
    #[must_use]
    pub fn access_tokens(&self) -> &InMemoryAccessTokenRepository {
        &self.access_tokens
    }

    /// Refresh token repository.
    #[must_use]
    pub fn refresh_tokens(&self) -> &InMemoryRefreshTokenRepository {
        &self.refresh_tokens
    }

    /// Builds the grant context over this store, with a
    /// [`RandomTokenFactory`] configured from `config`.
    #[must_use]
    pub fn grant_context(&self, config: &ServerConfig) -> GrantContext {
        let factory = Arc::new(RandomTokenFactory::new(config.lifetimes.clone()));

        GrantContext {
            clients: self.clients.clone(),
            users: self.users.clone(),
            user_third_parties: self.user_third_parties.clone(),
            auth_codes: self.auth_codes.clone(),
            access_tokens: self.access_tokens.clone(),
            refresh_tokens: self.refresh_tokens.clone(),
            auth_code_factory: factory.clone(),
            access_token_factory: factory.clone(),
            refresh_token_factory: factory,
            default_scope: String::new(),
            refresh_token_rotation: false,
        }
        .with_config(config)
    }

    /// Drops expired codes and tokens, returning how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        let removed = self.auth_codes.cleanup_expired(now)
            + self.access_tokens.cleanup_expired(now)
            + self.refresh_tokens.cleanup_expired(now);

        if removed > 0 {
            tracing::debug!(removed, "Removed expired codes and tokens");
        }
        removed
    }
}
