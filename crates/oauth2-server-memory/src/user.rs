//! User and third-party link storage.
//!
//! Passwords are only ever held as Argon2id hashes.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use oauth2_server::{
    AuthError, AuthResult, User, UserRepository, UserThirdPartyLink, UserThirdPartyRepository,
};

use crate::password::{hash_password, verify_password};
use crate::{StoreError, StoreResult};

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

/// Users keyed by id, with a username index.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, StoredUser>,
    by_username: DashMap<String, String>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a user with the given plaintext password.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the id or username is taken, or `PasswordHash`
    /// if hashing fails.
    pub fn insert_user(&self, user: User, password: &str) -> StoreResult<()> {
        let password_hash = hash_password(password)?;

        // Same lock order as `remove`: users, then the username index
        match self.users.entry(user.id.clone()) {
            Entry::Occupied(_) => {
                return Err(StoreError::conflict(format!(
                    "user {} already exists",
                    user.id
                )));
            }
            Entry::Vacant(user_slot) => match self.by_username.entry(user.username.clone()) {
                Entry::Occupied(_) => {
                    return Err(StoreError::conflict(format!(
                        "username {} already exists",
                        user.username
                    )));
                }
                Entry::Vacant(name_slot) => {
                    name_slot.insert(user.id.clone());
                    tracing::debug!(user_id = %user.id, "Stored user");
                    user_slot.insert(StoredUser {
                        user,
                        password_hash,
                    });
                }
            },
        }
        Ok(())
    }

    /// Removes a user, returning it if it existed.
    pub fn remove(&self, user_id: &str) -> Option<User> {
        let (_, stored) = self.users.remove(user_id)?;
        self.by_username.remove(&stored.user.username);
        Some(stored.user)
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if no users are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_user_id(&self, user_id: &str) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .get(user_id)
            .map(|entry| entry.value().user.clone()))
    }

    async fn get_by_name_and_password(
        &self,
        user_name: &str,
        password: &str,
    ) -> AuthResult<Option<User>> {
        let Some(user_id) = self
            .by_username
            .get(user_name)
            .map(|entry| entry.value().clone())
        else {
            return Ok(None);
        };

        // Clone out before hashing so no shard lock is held during verification
        let Some(stored) = self.users.get(&user_id).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };

        let matches = verify_password(password, &stored.password_hash)
            .map_err(|e| AuthError::storage(format!("stored password hash: {e}")))?;

        Ok(matches.then_some(stored.user))
    }
}

// =============================================================================
// Third-party links
// =============================================================================

/// Federated identity links keyed by `(third_party, union_id)`.
#[derive(Debug, Default)]
pub struct InMemoryUserThirdPartyRepository {
    links: DashMap<(String, String), UserThirdPartyLink>,
}

impl InMemoryUserThirdPartyRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Links a third-party identity to a local user.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the identity is already linked.
    pub fn link(&self, link: UserThirdPartyLink) -> StoreResult<()> {
        let key = (link.third_party.clone(), link.union_id.clone());
        match self.links.entry(key) {
            Entry::Occupied(_) => Err(StoreError::conflict(format!(
                "{} identity already linked",
                link.third_party
            ))),
            Entry::Vacant(slot) => {
                slot.insert(link);
                Ok(())
            }
        }
    }

    /// Removes a link, returning it if it existed.
    pub fn unlink(&self, third_party: &str, union_id: &str) -> Option<UserThirdPartyLink> {
        self.links
            .remove(&(third_party.to_string(), union_id.to_string()))
            .map(|(_, link)| link)
    }
}

#[async_trait]
impl UserThirdPartyRepository for InMemoryUserThirdPartyRepository {
    async fn get_by_union_id(
        &self,
        third_party: &str,
        union_id: &str,
    ) -> AuthResult<Option<UserThirdPartyLink>> {
        Ok(self
            .links
            .get(&(third_party.to_string(), union_id.to_string()))
            .map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_password_lookup() {
        let repo = InMemoryUserRepository::new();
        repo.insert_user(User::new("7", "alice"), "pw").unwrap();

        let user = repo.get_by_name_and_password("alice", "pw").await.unwrap();
        assert_eq!(user, Some(User::new("7", "alice")));

        assert!(
            repo.get_by_name_and_password("alice", "nope")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            repo.get_by_name_and_password("bob", "pw")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_get_by_user_id() {
        let repo = InMemoryUserRepository::new();
        repo.insert_user(User::new("7", "alice"), "pw").unwrap();

        assert!(repo.get_by_user_id("7").await.unwrap().is_some());
        assert!(repo.get_by_user_id("8").await.unwrap().is_none());
    }

    #[test]
    fn test_insert_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.insert_user(User::new("7", "alice"), "pw").unwrap();

        let err = repo.insert_user(User::new("8", "alice"), "pw").unwrap_err();
        assert!(err.is_conflict());
        let err = repo.insert_user(User::new("7", "bob"), "pw").unwrap_err();
        assert!(err.is_conflict());

        // The rejected username must not be left behind in the index
        repo.insert_user(User::new("9", "bob"), "pw").unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_user() {
        let repo = InMemoryUserRepository::new();
        repo.insert_user(User::new("7", "alice"), "pw").unwrap();

        assert!(repo.remove("7").is_some());
        assert!(repo.is_empty());
        assert!(
            repo.get_by_name_and_password("alice", "pw")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_links() {
        let repo = InMemoryUserThirdPartyRepository::new();
        repo.link(UserThirdPartyLink::new("wechat", "u-1", "7"))
            .unwrap();

        let link = repo.get_by_union_id("wechat", "u-1").await.unwrap().unwrap();
        assert_eq!(link.user_id, "7");
        assert!(repo.get_by_union_id("github", "u-1").await.unwrap().is_none());

        let err = repo
            .link(UserThirdPartyLink::new("wechat", "u-1", "8"))
            .unwrap_err();
        assert!(err.is_conflict());

        assert!(repo.unlink("wechat", "u-1").is_some());
        assert!(repo.get_by_union_id("wechat", "u-1").await.unwrap().is_none());
    }
}
