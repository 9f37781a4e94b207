//! Access token repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::AccessToken;

/// Persistence for access tokens.
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// Stores a newly minted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be stored.
    async fn add(&self, token: &AccessToken) -> AuthResult<()>;

    /// Removes a token by its record id.
    ///
    /// Removing a token that is already gone is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn remove_by_id(&self, id: Uuid) -> AuthResult<()>;
}
