//! Refresh token repository trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::RefreshToken;

/// Persistence for refresh tokens.
///
/// # Example Implementation
///
/// ```ignore
/// use oauth2_server::repository::RefreshTokenRepository;
/// use oauth2_server::types::RefreshToken;
/// use oauth2_server::AuthResult;
///
/// struct InMemoryRefreshTokens {
///     tokens: std::sync::RwLock<std::collections::HashMap<String, RefreshToken>>,
/// }
///
/// #[async_trait::async_trait]
/// impl RefreshTokenRepository for InMemoryRefreshTokens {
///     async fn add(&self, token: &RefreshToken) -> AuthResult<()> {
///         let mut tokens = self.tokens.write().unwrap();
///         tokens.insert(token.token.clone(), token.clone());
///         Ok(())
///     }
///     // ... other methods
/// }
/// ```
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Stores a newly minted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be stored.
    async fn add(&self, token: &RefreshToken) -> AuthResult<()>;

    /// Removes a token. Only called when rotation is enabled.
    ///
    /// As with authorization codes, only one of several racing removals of
    /// the same token may succeed; the others fail with `InvalidRefreshToken`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn remove(&self, token: &RefreshToken) -> AuthResult<()>;

    /// Finds a token by its value.
    ///
    /// Returns tokens regardless of expiry; the engine checks validity.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get_by_token(&self, token: &str) -> AuthResult<Option<RefreshToken>>;
}
