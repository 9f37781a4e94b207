//! Authorization code repository trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::AuthCode;

/// Persistence for authorization codes.
#[async_trait]
pub trait AuthCodeRepository: Send + Sync {
    /// Stores a newly minted code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code cannot be stored.
    async fn add(&self, code: &AuthCode) -> AuthResult<()>;

    /// Removes a redeemed code.
    ///
    /// This is the redemption claim. When concurrent redemptions race, the
    /// implementation must let only one removal succeed and fail the others
    /// with `InvalidAuthCode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn remove(&self, code: &AuthCode) -> AuthResult<()>;

    /// Finds a code by its value.
    ///
    /// Returns codes regardless of expiry; the engine checks validity.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get_by_code(&self, code: &str) -> AuthResult<Option<AuthCode>>;
}
