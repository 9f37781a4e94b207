//! Client storage.

use async_trait::async_trait;
use dashmap::DashMap;
use oauth2_server::{AuthResult, Client, ClientRepository};

/// Registered clients keyed by client id.
#[derive(Debug, Default)]
pub struct InMemoryClientRepository {
    clients: DashMap<String, Client>,
}

impl InMemoryClientRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client, replacing any client with the same id.
    pub fn insert(&self, client: Client) {
        tracing::debug!(client_id = %client.client_id, "Registered client");
        self.clients.insert(client.client_id.clone(), client);
    }

    /// Removes a client, returning it if it was registered.
    pub fn remove(&self, client_id: &str) -> Option<Client> {
        self.clients.remove(client_id).map(|(_, client)| client)
    }

    /// Number of registered clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns `true` if no clients are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn get_by_client_id(&self, client_id: &str) -> AuthResult<Option<Client>> {
        Ok(self
            .clients
            .get(client_id)
            .map(|entry| entry.value().clone()))
    }
}
