//! Authorization code domain type.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A short-lived, single-use authorization code.
///
/// Redeemable once, before `expires_at`, by the client it was issued to, and
/// only while it carries a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCode {
    /// The code value handed to the client.
    pub code: String,

    /// Client the code was issued to.
    pub client_id: String,

    /// User who authorized the client.
    pub user_id: String,

    /// Granted scope.
    pub scope: String,

    /// Redirect URI used in the authorization request.
    pub redirect_uri: String,

    /// When the code stops being redeemable.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl AuthCode {
    /// Returns `true` if the code is expired at `now`.
    ///
    /// A code whose `expires_at` equals `now` is still valid.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at < now
    }
}
