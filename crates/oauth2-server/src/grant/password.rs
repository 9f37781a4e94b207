//! Resource owner password credentials grant.

use async_trait::async_trait;

use crate::AuthResult;
use crate::error::AuthError;
use crate::factory::MintContext;
use crate::grant::{Grant, GrantContext, issue_token_pair, require_default_scope};
use crate::types::{Client, GrantType, Request, TokenResponse};

/// The `Password` grant.
///
/// Tokens are bound to the server default scope, never to the scope the
/// caller asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordGrant;

#[async_trait]
impl Grant for PasswordGrant {
    fn grant_type(&self) -> GrantType {
        GrantType::Password
    }

    async fn handle_token_request(
        &self,
        ctx: &GrantContext,
        request: &mut Request,
        client: &Client,
    ) -> AuthResult<TokenResponse> {
        request.set_scope(require_default_scope(ctx)?);
        let request = &*request;

        let user = ctx
            .users
            .get_by_name_and_password(&request.user_name, &request.password)
            .await?
            .ok_or_else(|| {
                tracing::debug!(client_id = %client.client_id, "Password login rejected");
                AuthError::InvalidUser
            })?;

        let mint = MintContext::new(request, client, Some(&user), &request.scope);
        let (access_token, refresh_token) = issue_token_pair(ctx, &mint).await?;

        Ok(TokenResponse::new(
            access_token.token,
            access_token.expires_in,
            refresh_token.token,
        )
        .with_user_id(user.id))
    }
}
