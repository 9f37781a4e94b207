//! User and third-party link repository traits.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::{User, UserThirdPartyLink};

/// Lookup of resource owners.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get_by_user_id(&self, user_id: &str) -> AuthResult<Option<User>>;

    /// Find a user by login name and password.
    ///
    /// Password verification is the implementation's concern. Returns `None`
    /// when the name is unknown or the password does not match.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get_by_name_and_password(
        &self,
        user_name: &str,
        password: &str,
    ) -> AuthResult<Option<User>>;
}

/// Lookup of federated identity links.
#[async_trait]
pub trait UserThirdPartyRepository: Send + Sync {
    /// Find the link for a provider and the union id it issued.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get_by_union_id(
        &self,
        third_party: &str,
        union_id: &str,
    ) -> AuthResult<Option<UserThirdPartyLink>>;
}
