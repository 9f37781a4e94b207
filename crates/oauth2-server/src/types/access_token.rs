//! Access token domain type.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// An issued access token.
///
/// A refresh of the co-issued [`RefreshToken`](super::RefreshToken) supersedes
/// this token: the engine removes it by `id` once the replacement is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// Unique identifier for this token record.
    pub id: Uuid,

    /// The token value handed to the client.
    pub token: String,

    /// Client the token was issued to.
    pub client_id: String,

    /// User that authorized the token (None for client credentials).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Granted scope.
    pub scope: String,

    /// Lifetime in seconds.
    pub expires_in: i64,

    /// When the token was issued.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl AccessToken {
    /// Returns the instant after which the token is no longer usable.
    ///
    /// `None` when the instant is past the representable date range.
    #[must_use]
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.created_at
            .checked_add(Duration::seconds(self.expires_in))
    }

    /// Returns `true` if the token is expired at `now`.
    ///
    /// A token whose expiry is not representable never expires.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at().is_some_and(|expires_at| expires_at < now)
    }
}
