//! Client credentials grant.
//!
//! Machine-to-machine tokens: no user is involved. The scope is the server
//! default, falling back to the client's own default scope.

use async_trait::async_trait;

use crate::AuthResult;
use crate::error::AuthError;
use crate::factory::MintContext;
use crate::grant::{Grant, GrantContext, issue_token_pair, require_client_secret};
use crate::types::{Client, GrantType, Request, TokenResponse};

/// The `ClientCredentials` grant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientCredentialsGrant;

#[async_trait]
impl Grant for ClientCredentialsGrant {
    fn grant_type(&self) -> GrantType {
        GrantType::ClientCredentials
    }

    async fn handle_token_request(
        &self,
        ctx: &GrantContext,
        request: &mut Request,
        client: &Client,
    ) -> AuthResult<TokenResponse> {
        require_client_secret(request, client)?;

        let scope = if !ctx.default_scope.is_empty() {
            ctx.default_scope.clone()
        } else if !client.default_scope.is_empty() {
            client.default_scope.clone()
        } else {
            tracing::warn!(
                client_id = %client.client_id,
                "No default scope for client credentials"
            );
            return Err(AuthError::InvalidDefaultScope);
        };
        request.set_scope(scope);

        let request = &*request;
        let mint = MintContext::new(request, client, None, &request.scope);
        let (access_token, refresh_token) = issue_token_pair(ctx, &mint).await?;

        tracing::debug!(client_id = %client.client_id, "Issued client credentials token");

        Ok(TokenResponse::new(
            access_token.token,
            access_token.expires_in,
            refresh_token.token,
        ))
    }
}
