//! Authorization code, access token and refresh token storage.
//!
//! Removing a code or refresh token is the redemption claim: the entry is
//! taken out of the map atomically, and a second removal of the same value
//! fails.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use oauth2_server::{
    AccessToken, AccessTokenRepository, AuthCode, AuthCodeRepository, AuthError, AuthResult,
    RefreshToken, RefreshTokenRepository,
};
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// Authorization codes
// =============================================================================

/// Authorization codes keyed by code value.
#[derive(Debug, Default)]
pub struct InMemoryAuthCodeRepository {
    codes: DashMap<String, AuthCode>,
}

impl InMemoryAuthCodeRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored codes, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns `true` if no codes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Drops codes that expired before `now`.
    pub fn cleanup_expired(&self, now: OffsetDateTime) -> usize {
        let before = self.codes.len();
        self.codes.retain(|_, code| !code.is_expired_at(now));
        before.saturating_sub(self.codes.len())
    }
}

#[async_trait]
impl AuthCodeRepository for InMemoryAuthCodeRepository {
    async fn add(&self, code: &AuthCode) -> AuthResult<()> {
        match self.codes.entry(code.code.clone()) {
            Entry::Occupied(_) => Err(AuthError::storage("authorization code collision")),
            Entry::Vacant(slot) => {
                slot.insert(code.clone());
                Ok(())
            }
        }
    }

    async fn remove(&self, code: &AuthCode) -> AuthResult<()> {
        match self.codes.remove(&code.code) {
            Some(_) => Ok(()),
            None => {
                tracing::warn!(client_id = %code.client_id, "Authorization code already redeemed");
                Err(AuthError::InvalidAuthCode)
            }
        }
    }

    async fn get_by_code(&self, code: &str) -> AuthResult<Option<AuthCode>> {
        Ok(self.codes.get(code).map(|entry| entry.value().clone()))
    }
}

// =============================================================================
// Access tokens
// =============================================================================

/// Access tokens keyed by record id.
#[derive(Debug, Default)]
pub struct InMemoryAccessTokenRepository {
    tokens: DashMap<Uuid, AccessToken>,
}

impl InMemoryAccessTokenRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a token by record id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<AccessToken> {
        self.tokens.get(&id).map(|entry| entry.value().clone())
    }

    /// Finds a token by its value.
    ///
    /// This is a full scan; the grant engine never looks tokens up by value.
    #[must_use]
    pub fn find_by_token(&self, token: &str) -> Option<AccessToken> {
        self.tokens
            .iter()
            .find(|entry| entry.value().token == token)
            .map(|entry| entry.value().clone())
    }

    /// Number of stored tokens, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no tokens are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drops tokens that expired before `now`.
    pub fn cleanup_expired(&self, now: OffsetDateTime) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, token| !token.is_expired_at(now));
        before.saturating_sub(self.tokens.len())
    }
}

#[async_trait]
impl AccessTokenRepository for InMemoryAccessTokenRepository {
    async fn add(&self, token: &AccessToken) -> AuthResult<()> {
        match self.tokens.entry(token.id) {
            Entry::Occupied(_) => Err(AuthError::storage("access token id collision")),
            Entry::Vacant(slot) => {
                slot.insert(token.clone());
                Ok(())
            }
        }
    }

    async fn remove_by_id(&self, id: Uuid) -> AuthResult<()> {
        self.tokens.remove(&id);
        Ok(())
    }
}

// =============================================================================
// Refresh tokens
// =============================================================================

/// Refresh tokens keyed by token value.
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: DashMap<String, RefreshToken>,
}

impl InMemoryRefreshTokenRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no tokens are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drops tokens that expired before `now`.
    pub fn cleanup_expired(&self, now: OffsetDateTime) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, token| !token.is_expired_at(now));
        before.saturating_sub(self.tokens.len())
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn add(&self, token: &RefreshToken) -> AuthResult<()> {
        match self.tokens.entry(token.token.clone()) {
            Entry::Occupied(_) => Err(AuthError::storage("refresh token collision")),
            Entry::Vacant(slot) => {
                slot.insert(token.clone());
                Ok(())
            }
        }
    }

    async fn remove(&self, token: &RefreshToken) -> AuthResult<()> {
        match self.tokens.remove(&token.token) {
            Some(_) => Ok(()),
            None => {
                tracing::warn!(client_id = %token.client_id, "Refresh token already rotated");
                Err(AuthError::InvalidRefreshToken)
            }
        }
    }

    async fn get_by_token(&self, token: &str) -> AuthResult<Option<RefreshToken>> {
        Ok(self.tokens.get(token).map(|entry| entry.value().clone()))
    }
}
