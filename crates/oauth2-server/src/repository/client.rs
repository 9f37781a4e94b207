//! Client repository trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::Client;

/// Lookup of registered clients.
///
/// # Example
///
/// ```ignore
/// use oauth2_server::repository::ClientRepository;
///
/// async fn example(repo: &impl ClientRepository) -> oauth2_server::AuthResult<()> {
///     if let Some(client) = repo.get_by_client_id("my-app").await? {
///         println!("Found client: {}", client.name);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find a client by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get_by_client_id(&self, client_id: &str) -> AuthResult<Option<Client>>;
}
