//! The inbound request value.

use serde::{Deserialize, Serialize};

/// One inbound authorization or token call.
///
/// All fields are plain strings; an empty string means the parameter was not
/// sent. The value is owned by the caller for the duration of one call. The
/// Password, ClientCredentials and OpenId grants overwrite `scope` with the
/// scope they actually grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Request {
    /// Client identifier.
    pub app_id: String,
    /// Client secret.
    pub app_secret: String,
    /// Authorization endpoint response type (`code` or `token`).
    pub response_type: String,
    /// Token endpoint grant type.
    pub grant_type: String,
    /// Requested scope.
    pub scope: String,
    /// Redirect URI for authorization requests.
    pub redirect_uri: String,
    /// Opaque state echoed back on redirect.
    pub state: String,
    /// Authorization code being redeemed.
    pub code: String,
    /// Refresh token being redeemed.
    pub refresh_token: String,
    /// Resource owner name (password grant).
    pub user_name: String,
    /// Resource owner password (password grant).
    pub password: String,
    /// Third-party identity provider name (open id grant).
    pub third_party: String,
    /// Union id issued by the third-party provider (open id grant).
    pub union_id: String,
}

impl Request {
    /// Creates an authorization endpoint request.
    #[must_use]
    pub fn authorization(
        app_id: impl Into<String>,
        response_type: impl Into<String>,
        scope: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            response_type: response_type.into(),
            scope: scope.into(),
            redirect_uri: redirect_uri.into(),
            ..Self::default()
        }
    }

    /// Creates a token endpoint request authenticated with a client secret.
    #[must_use]
    pub fn token(
        grant_type: impl Into<String>,
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Self {
        Self {
            grant_type: grant_type.into(),
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            ..Self::default()
        }
    }

    /// Sets the state parameter.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Sets the authorization code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = refresh_token.into();
        self
    }

    /// Sets the resource owner credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.user_name = user_name.into();
        self.password = password.into();
        self
    }

    /// Sets the third-party identity.
    #[must_use]
    pub fn with_union_id(
        mut self,
        third_party: impl Into<String>,
        union_id: impl Into<String>,
    ) -> Self {
        self.third_party = third_party.into();
        self.union_id = union_id.into();
        self
    }

    /// Sets the requested scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Overwrites the scope with the one a grant resolved.
    pub fn set_scope(&mut self, scope: impl Into<String>) {
        self.scope = scope.into();
    }
}
