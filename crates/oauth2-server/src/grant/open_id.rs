//! Third-party login grant.
//!
//! The caller presents a provider name and the union id that provider issued;
//! tokens are issued for the local user linked to that identity.

use async_trait::async_trait;

use crate::AuthResult;
use crate::error::AuthError;
use crate::factory::MintContext;
use crate::grant::{Grant, GrantContext, issue_token_pair, require_default_scope};
use crate::types::{Client, GrantType, Request, TokenResponse};

/// The `OpenId` grant.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenIdGrant;

#[async_trait]
impl Grant for OpenIdGrant {
    fn grant_type(&self) -> GrantType {
        GrantType::OpenId
    }

    async fn handle_token_request(
        &self,
        ctx: &GrantContext,
        request: &mut Request,
        client: &Client,
    ) -> AuthResult<TokenResponse> {
        request.set_scope(require_default_scope(ctx)?);
        let request = &*request;

        let link = ctx
            .user_third_parties
            .get_by_union_id(&request.third_party, &request.union_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(
                    client_id = %client.client_id,
                    third_party = %request.third_party,
                    "No user linked to union id"
                );
                AuthError::InvalidUnionId
            })?;

        let user = ctx
            .users
            .get_by_user_id(&link.user_id)
            .await?
            .ok_or(AuthError::InvalidUnionId)?;

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
