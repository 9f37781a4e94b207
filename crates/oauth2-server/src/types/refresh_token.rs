//! Refresh token domain type.
//!
//! Refresh tokens outlive the access tokens they are issued with and keep a
//! back-reference to the most recent one so it can be revoked on refresh.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// An issued refresh token.
///
/// Usable while `created_at + expires_in >= now`, only by the client it was
/// issued to, and only while it carries a scope the client still permits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
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

    /// Id of the access token issued alongside this refresh token.
    pub access_token_id: Uuid,

    /// When this token was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Lifetime in seconds, counted from `created_at`.
    pub expires_in: i64,
}

impl RefreshToken {
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
