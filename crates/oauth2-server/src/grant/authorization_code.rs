//! Authorization code grant.
//!
//! The authorization request mints a single-use code and redirects with it
//! in the query. The token request redeems the code for an access token and
//! refresh token pair and deletes the code.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::AuthResult;
use crate::error::AuthError;
use crate::factory::MintContext;
use crate::grant::{
    Grant, GrantContext, issue_token_pair, redirect_with_query, require_client_secret,
};
use crate::types::{Client, GrantType, Request, TokenResponse, User};

/// The `AuthorizationCode` grant.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationCodeGrant;

#[async_trait]
impl Grant for AuthorizationCodeGrant {
    fn grant_type(&self) -> GrantType {
        GrantType::AuthorizationCode
    }

    async fn handle_authorization_request(
        &self,
        ctx: &GrantContext,
        request: &Request,
        user: &User,
        client: &Client,
    ) -> AuthResult<String> {
        let mint = MintContext::new(request, client, Some(user), &request.scope);
        let code = ctx.auth_code_factory.new_auth_code(&mint, user)?;
        ctx.auth_codes.add(&code).await?;

        tracing::debug!(
            client_id = %client.client_id,
            user_id = %user.id,
            "Issued authorization code"
        );

        redirect_with_query(
            &request.redirect_uri,
            &[("code", code.code.as_str())],
            &request.state,
        )
    }

    async fn handle_token_request(
        &self,
        ctx: &GrantContext,
        request: &mut Request,
        client: &Client,
    ) -> AuthResult<TokenResponse> {
        require_client_secret(request, client)?;

        let code = ctx
            .auth_codes
            .get_by_code(&request.code)
            .await?
            .ok_or(AuthError::InvalidAuthCode)?;

        if code.is_expired_at(OffsetDateTime::now_utc()) {
            tracing::debug!(client_id = %client.client_id, "Authorization code expired");
            return Err(AuthError::InvalidAuthCode);
        }
        if code.client_id != request.app_id {
            tracing::warn!(
                client_id = %client.client_id,
                "Authorization code presented by a different client"
            );
            return Err(AuthError::InvalidAuthCode);
        }
        if code.scope.is_empty() {
            return Err(AuthError::InvalidAuthCode);
        }

        let user = ctx
            .users
            .get_by_user_id(&code.user_id)
            .await?
            .ok_or(AuthError::InvalidAuthCode)?;

        let mint = MintContext::new(request, client, Some(&user), &code.scope);
        let (access_token, refresh_token) = issue_token_pair(ctx, &mint).await?;

        // One-time use
        ctx.auth_codes.remove(&code).await?;

        tracing::debug!(
            client_id = %client.client_id,
            user_id = %user.id,
            "Redeemed authorization code"
        );

        Ok(
            TokenResponse::new(
                access_token.token,
                access_token.expires_in,
                refresh_token.token,
            )
            .with_user_id(user.id)
            .with_scope(code.scope),
        )
    }
}
