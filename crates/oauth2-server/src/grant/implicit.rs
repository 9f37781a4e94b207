//! Implicit grant.
//!
//! The access token is minted during the authorization request and returned
//! in the redirect fragment. There is no token endpoint step.

use async_trait::async_trait;

use crate::AuthResult;
use crate::factory::MintContext;
use crate::grant::{Grant, GrantContext, redirect_with_fragment};
use crate::types::{Client, GrantType, Request, User};

/// The `Implicit` grant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplicitGrant;

#[async_trait]
impl Grant for ImplicitGrant {
    fn grant_type(&self) -> GrantType {
        GrantType::Implicit
    }

    async fn handle_authorization_request(
        &self,
        ctx: &GrantContext,
        request: &Request,
        user: &User,
        client: &Client,
    ) -> AuthResult<String> {
        let mint = MintContext::new(request, client, Some(user), &request.scope);
        let access_token = ctx.access_token_factory.new_access_token(&mint, None)?;
        ctx.access_tokens.add(&access_token).await?;

        tracing::debug!(
            client_id = %client.client_id,
            user_id = %user.id,
            "Issued implicit access token"
        );

        redirect_with_fragment(
            &request.redirect_uri,
            &[("access_token", access_token.token.as_str())],
            &request.state,
        )
    }
}
