//! Resource owner types.

use serde::{Deserialize, Serialize};

/// A resource owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,

    /// Login name.
    pub username: String,
}

impl User {
    /// Creates a new user.
    #[must_use]
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// Link between a third-party identity and a local user.
///
/// The pair `(third_party, union_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserThirdPartyLink {
    /// The identity provider name (e.g. "wechat").
    pub third_party: String,

    /// The subject identifier issued by the provider.
    pub union_id: String,

    /// The linked local user.
    pub user_id: String,
}

impl UserThirdPartyLink {
    /// Creates a new link.
    #[must_use]
    pub fn new(
        third_party: impl Into<String>,
        union_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            third_party: third_party.into(),
            union_id: union_id.into(),
            user_id: user_id.into(),
        }
    }
}
