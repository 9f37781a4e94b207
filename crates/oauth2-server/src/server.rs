//! Authorization server orchestrator.
//!
//! The server runs the checks shared by every flow (response/grant type
//! registration, client lookup and permissions, user lookup) in a fixed
//! order, then hands the request to the grant strategy that owns the flow.
//!
//! # Usage
//!
//! ```ignore
//! use oauth2_server::{AuthorizationServer, Request};
//!
//! let server = AuthorizationServer::new(context);
//!
//! let request = Request::authorization("c1", "code", "read", "https://a/cb").with_state("xyz");
//! let redirect = server
//!     .handle_authorization_request(&request, &["read", "write"], "7")
//!     .await?;
//!
//! let mut request = Request::token("AuthorizationCode", "c1", "secret").with_code(code);
//! let response = server.handle_token_request(&mut request).await?;
//! ```

use std::sync::Arc;

use crate::AuthResult;
use crate::error::AuthError;
use crate::grant::{GrantContext, GrantRegistry};
use crate::types::{Request, TokenResponse};

/// Grant-dispatch engine.
///
/// Holds no per-request state: one server serves any number of concurrent
/// calls, each with its own [`Request`].
#[derive(Debug, Clone)]
pub struct AuthorizationServer {
    context: GrantContext,
    registry: Arc<GrantRegistry>,
}

impl AuthorizationServer {
    /// Creates a server with the standard grant registry.
    #[must_use]
    pub fn new(context: GrantContext) -> Self {
        Self::with_registry(context, Arc::new(GrantRegistry::standard()))
    }

    /// Creates a server with a shared, pre-built registry.
    #[must_use]
    pub fn with_registry(context: GrantContext, registry: Arc<GrantRegistry>) -> Self {
        Self { context, registry }
    }

    /// Handles an authorization endpoint request for an authenticated user.
    ///
    /// Checks run strictly in this order; the first failure is returned:
    ///
    /// 1. `response_type` is registered (`InvalidResponseType`)
    /// 2. `scope` is in `scope_set` (`InvalidScope`)
    /// 3. the client exists (`InvalidClientId`)
    /// 4. the client permits the grant behind the response type (`InvalidGrantType`)
    /// 5. the client permits the scope (`InvalidScope`)
    /// 6. the client registered the redirect URI (`InvalidRedirectUri`)
    /// 7. the user exists (`InvalidUserId`)
    ///
    /// # Returns
    ///
    /// The redirect URI produced by the grant: a query carrying the code for
    /// `code`, a fragment carrying the access token for `token`. The
    /// registered redirect URI is kept verbatim as the prefix.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, or any error raised by the grant or
    /// a collaborator.
    pub async fn handle_authorization_request<S: AsRef<str>>(
        &self,
        request: &Request,
        scope_set: &[S],
        user_id: &str,
    ) -> AuthResult<String> {
        let app_id = request.app_id.as_str();
        let scope = request.scope.as_str();
        let response_type = request.response_type.as_str();
        let redirect_uri = request.redirect_uri.as_str();

        let grant_type = self
            .registry
            .response_types()
            .resolve(response_type)
            .ok_or_else(|| {
                tracing::debug!(response_type, "Unsupported response type");
                AuthError::invalid_response_type(response_type)
            })?;

        if !scope_set.iter().any(|allowed| allowed.as_ref() == scope) {
            tracing::debug!(client_id = app_id, scope, "Scope not offered");
            return Err(AuthError::invalid_scope(scope));
        }

        let grant = self
            .registry
            .get(grant_type)
            .ok_or_else(|| AuthError::invalid_response_type(response_type))?;

        let client = self
            .context
            .clients
            .get_by_client_id(app_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(client_id = app_id, "Unknown client");
                AuthError::invalid_client_id(app_id)
            })?;

        if !client.validate_grant_type(grant_type) {
            tracing::debug!(client_id = app_id, grant_type = %grant_type, "Grant type not permitted");
            return Err(AuthError::invalid_grant_type(grant_type.as_str()));
        }
        if !client.validate_scope(scope) {
            tracing::debug!(client_id = app_id, scope, "Scope not permitted for client");
            return Err(AuthError::invalid_scope(scope));
        }
        if !client.validate_redirect_uri(redirect_uri) {
            tracing::warn!(client_id = app_id, "Unregistered redirect uri");
            return Err(AuthError::invalid_redirect_uri(redirect_uri));
        }

        let user = self
            .context
            .users
            .get_by_user_id(user_id)
            .await?
            .ok_or_else(|| AuthError::invalid_user_id(user_id))?;

        tracing::debug!(
            client_id = app_id,
            user_id,
            grant_type = %grant_type,
            "Dispatching authorization request"
        );

        grant
            .handle_authorization_request(&self.context, request, &user, &client)
            .await
    }

    /// Handles a token endpoint request.
    ///
    /// Checks that the grant type is registered, that the client exists and
    /// that it permits the grant type, then delegates to the grant. Some
    /// grants overwrite `request.scope` with the scope they bound.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrantType` or `InvalidClientId` for the shared checks,
    /// or any error raised by the grant or a collaborator.
    pub async fn handle_token_request(&self, request: &mut Request) -> AuthResult<TokenResponse> {
        let (grant_type, grant) = self
            .registry
            .resolve(&request.grant_type)
            .ok_or_else(|| {
                tracing::debug!(grant_type = %request.grant_type, "Unsupported grant type");
                AuthError::invalid_grant_type(request.grant_type.as_str())
            })?;

        let client = self
            .context
            .clients
            .get_by_client_id(&request.app_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(client_id = %request.app_id, "Unknown client");
                AuthError::invalid_client_id(request.app_id.as_str())
            })?;

        if !client.validate_grant_type(grant_type) {
            tracing::debug!(
                client_id = %client.client_id,
                grant_type = %grant_type,
                "Grant type not permitted"
            );
            return Err(AuthError::invalid_grant_type(grant_type.as_str()));
        }

        tracing::debug!(
            client_id = %client.client_id,
            grant_type = %grant_type,
            "Dispatching token request"
        );

        grant
            .handle_token_request(&self.context, request, &client)
            .await
    }

    /// Returns the collaborators handed to grants.
    #[must_use]
    pub fn context(&self) -> &GrantContext {
        &self.context
    }

    /// Returns the grant registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<GrantRegistry> {
        &self.registry
    }

    /// Returns the server default scope.
    #[must_use]
    pub fn default_scope(&self) -> &str {
        &self.context.default_scope
    }
}
