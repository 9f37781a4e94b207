//! Collaborators handed to grant strategies.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::factory::{AccessTokenFactory, AuthCodeFactory, RefreshTokenFactory};
use crate::repository::{
    AccessTokenRepository, AuthCodeRepository, ClientRepository, RefreshTokenRepository,
    UserRepository, UserThirdPartyRepository,
};

/// Immutable set of collaborators and policy shared by every grant.
///
/// Grants are stateless; everything they read or write goes through this
/// context, the request, and the entities the server already resolved.
#[derive(Clone)]
pub struct GrantContext {
    /// Client lookup.
    pub clients: Arc<dyn ClientRepository>,
    /// User lookup.
    pub users: Arc<dyn UserRepository>,
    /// Federated identity lookup.
    pub user_third_parties: Arc<dyn UserThirdPartyRepository>,
    /// Authorization code persistence.
    pub auth_codes: Arc<dyn AuthCodeRepository>,
    /// Access token persistence.
    pub access_tokens: Arc<dyn AccessTokenRepository>,
    /// Refresh token persistence.
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    /// Authorization code minting.
    pub auth_code_factory: Arc<dyn AuthCodeFactory>,
    /// Access token minting.
    pub access_token_factory: Arc<dyn AccessTokenFactory>,
    /// Refresh token minting.
    pub refresh_token_factory: Arc<dyn RefreshTokenFactory>,
    /// Server-wide default scope. Empty means not configured.
    pub default_scope: String,
    /// Rotate refresh tokens on use.
    pub refresh_token_rotation: bool,
}

impl GrantContext {
    /// Applies the policy part of a [`ServerConfig`].
    #[must_use]
    pub fn with_config(mut self, config: &ServerConfig) -> Self {
        self.default_scope = config.default_scope.clone();
        self.refresh_token_rotation = config.refresh_token_rotation;
        self
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
}

impl std::fmt::Debug for GrantContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrantContext")
            .field("default_scope", &self.default_scope)
            .field("refresh_token_rotation", &self.refresh_token_rotation)
            .finish_non_exhaustive()
    }
}
