//! Token endpoint response.

use serde::{Deserialize, Serialize};

/// Successful token response.
///
/// `user_id` is absent for client credentials tokens; `scope` is present only
/// for flows that report it (authorization code).
///
/// # Example Response
///
/// ```json
/// {
///   "expiresIn": 3600,
///   "accessToken": "q0Xk...",
///   "refreshToken": "Zr7c...",
///   "userId": "7",
///   "scope": "read"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Access token lifetime in seconds.
    pub expires_in: i64,

    /// The access token.
    pub access_token: String,

    /// The refresh token.
    pub refresh_token: String,

    /// User the tokens were issued for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Granted scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Creates a new token response with required fields.
    #[must_use]
    pub fn new(access_token: String, expires_in: i64, refresh_token: String) -> Self {
        Self {
            expires_in,
            access_token,
            refresh_token,
            user_id: None,
            scope: None,
        }
    }

    /// Sets the user id.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Sets the user id if present.
    #[must_use]
    pub fn with_optional_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Sets the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_keys() {
        let response = TokenResponse::new("at".to_string(), 3600, "rt".to_string())
            .with_user_id("7")
            .with_scope("read");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["expiresIn"], 3600);
        assert_eq!(json["accessToken"], "at");
        assert_eq!(json["refreshToken"], "rt");
        assert_eq!(json["userId"], "7");
        assert_eq!(json["scope"], "read");
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let response = TokenResponse::new("at".to_string(), 60, "rt".to_string());
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("userId").is_none());
        assert!(json.get("scope").is_none());
    }
}
