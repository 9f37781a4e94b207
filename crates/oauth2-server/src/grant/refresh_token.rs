//! Refresh token grant.
//!
//! Redeeming a refresh token mints a new access token and revokes the one
//! the refresh token was last issued with. The refresh token itself is kept
//! unless rotation is enabled, in which case it is replaced by a new one
//! bound to the new access token.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::AuthResult;
use crate::error::AuthError;
use crate::factory::MintContext;
use crate::grant::{Grant, GrantContext, require_client_secret};
use crate::types::{Client, GrantType, Request, TokenResponse};

/// The `RefreshToken` grant.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshTokenGrant;

#[async_trait]
impl Grant for RefreshTokenGrant {
    fn grant_type(&self) -> GrantType {
        GrantType::RefreshToken
    }

    async fn handle_token_request(
        &self,
        ctx: &GrantContext,
        request: &mut Request,
        client: &Client,
    ) -> AuthResult<TokenResponse> {
        let request = &*request;

        let refresh_token = ctx
            .refresh_tokens
            .get_by_token(&request.refresh_token)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if refresh_token.is_expired_at(OffsetDateTime::now_utc()) {
            tracing::debug!(client_id = %client.client_id, "Refresh token expired");
            return Err(AuthError::InvalidRefreshToken);
        }
        if refresh_token.client_id != request.app_id {
            tracing::warn!(
                client_id = %client.client_id,
                "Refresh token presented by a different client"
            );
            return Err(AuthError::InvalidRefreshToken);
        }
        if refresh_token.scope.is_empty() {
            return Err(AuthError::InvalidRefreshToken);
        }

        require_client_secret(request, client)?;

        // The client may have lost the scope since the token was issued
        if !client.validate_scope(&refresh_token.scope) {
            tracing::debug!(
                client_id = %client.client_id,
                scope = %refresh_token.scope,
                "Refresh token scope no longer permitted"
            );
            return Err(AuthError::InvalidRefreshToken);
        }

        let user = match &refresh_token.user_id {
            Some(user_id) => Some(
                ctx.users
                    .get_by_user_id(user_id)
                    .await?
                    .ok_or(AuthError::InvalidRefreshToken)?,
            ),
            None => None,
        };

        let mint = MintContext::new(request, client, user.as_ref(), &refresh_token.scope);
        let access_token = ctx
            .access_token_factory
            .new_access_token(&mint, Some(&refresh_token))?;
        ctx.access_tokens.add(&access_token).await?;
        ctx.access_tokens
            .remove_by_id(refresh_token.access_token_id)
            .await?;

        let issued_refresh_token = if ctx.refresh_token_rotation {
            ctx.refresh_tokens.remove(&refresh_token).await?;
            let rotated = ctx
                .refresh_token_factory
                .new_refresh_token(&mint, &access_token)?;
            ctx.refresh_tokens.add(&rotated).await?;
            rotated.token
        } else {
            refresh_token.token
        };

        tracing::debug!(
            client_id = %client.client_id,
            rotated = ctx.refresh_token_rotation,
            "Refreshed access token"
        );

        Ok(TokenResponse::new(
            access_token.token,
            access_token.expires_in,
            issued_refresh_token,
        )
        .with_optional_user_id(refresh_token.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockStore, access_token, refresh_token, test_client};
    use std::sync::Arc;
    use time::Duration;

    fn setup(user_id: Option<&str>) -> (Arc<MockStore>, uuid::Uuid) {
        let store = MockStore::new();
        store.add_user("7", "alice", "pw");
        let old = access_token(user_id);
        let old_id = old.id;
        store.insert_refresh_token(refresh_token("rt-old", &old, OffsetDateTime::now_utc()));
        store.insert_access_token(old);
        (store, old_id)
    }

    fn request() -> Request {
        Request::token("RefreshToken", "c1", "secret").with_refresh_token("rt-old")
    }

    #[tokio::test]
    async fn test_refresh_replaces_access_token() {
        let (store, old_id) = setup(Some("7"));
        let ctx = store.context();

        let response = RefreshTokenGrant
            .handle_token_request(&ctx, &mut request(), &test_client())
            .await
            .unwrap();

        assert_eq!(response.access_token, "at-1");
        assert_eq!(response.refresh_token, "rt-old");
        assert_eq!(response.user_id.as_deref(), Some("7"));

        let tokens = store.access_tokens.read().unwrap();
        assert!(!tokens.contains_key(&old_id));
        assert_eq!(tokens.len(), 1);
        let new_token = tokens.values().next().unwrap();
        assert_eq!(new_token.scope, "read");
        assert_eq!(new_token.user_id.as_deref(), Some("7"));

        // Not rotated
        let refresh_tokens = store.refresh_tokens.read().unwrap();
        assert_eq!(refresh_tokens.len(), 1);
        assert!(refresh_tokens.contains_key("rt-old"));
    }

    #[tokio::test]
    async fn test_refresh_with_rotation() {
        let (store, old_id) = setup(Some("7"));
        let ctx = store.context().with_refresh_token_rotation(true);

        let response = RefreshTokenGrant
            .handle_token_request(&ctx, &mut request(), &test_client())
            .await
            .unwrap();

        assert_eq!(response.refresh_token, "rt-2");
        let refresh_tokens = store.refresh_tokens.read().unwrap();
        assert!(!refresh_tokens.contains_key("rt-old"));
        let rotated = refresh_tokens.get("rt-2").unwrap();
        assert_ne!(rotated.access_token_id, old_id);
        assert!(
            store
                .access_tokens
                .read()
                .unwrap()
                .contains_key(&rotated.access_token_id)
        );
    }

    #[tokio::test]
    async fn test_refresh_without_user() {
        let (store, _) = setup(None);
        let ctx = store.context();

        let response = RefreshTokenGrant
            .handle_token_request(&ctx, &mut request(), &test_client())
            .await
            .unwrap();

        assert!(response.user_id.is_none());
    }

    #[tokio::test]
    async fn test_lifetime_past_date_range() {
        let store = MockStore::new();
        store.add_user("7", "alice", "pw");
        let old = access_token(Some("7"));
        let mut long_lived = refresh_token("rt-old", &old, OffsetDateTime::now_utc());
        long_lived.expires_in = 400_000_000_000;
        store.insert_refresh_token(long_lived);
        store.insert_access_token(old);
        let ctx = store.context();

        let response = RefreshTokenGrant
            .handle_token_request(&ctx, &mut request(), &test_client())
            .await
            .unwrap();

        assert_eq!(response.refresh_token, "rt-old");
    }

    #[tokio::test]
    async fn test_expired_refresh_token_writes_nothing() {
        let store = MockStore::new();
        let old = access_token(Some("7"));
        let created = OffsetDateTime::now_utc() - Duration::days(2);
        store.insert_refresh_token(refresh_token("rt-old", &old, created));
        let ctx = store.context();

        let err = RefreshTokenGrant
            .handle_token_request(&ctx, &mut request(), &test_client())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidRefreshToken);
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_unknown_refresh_token() {
        let (store, _) = setup(Some("7"));
        let ctx = store.context();
        let mut request = request().with_refresh_token("nope");

        let err = RefreshTokenGrant
            .handle_token_request(&ctx, &mut request, &test_client())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidRefreshToken);
    }

    #[tokio::test]
    async fn test_other_client() {
        let (store, _) = setup(Some("7"));
        let ctx = store.context();
        let mut request = request();
        request.app_id = "c2".to_string();

        let err = RefreshTokenGrant
            .handle_token_request(&ctx, &mut request, &test_client())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidRefreshToken);
    }

    #[tokio::test]
    async fn test_secret_checked_after_token() {
        let (store, _) = setup(Some("7"));
        let ctx = store.context();
        let mut request = request();
        request.app_secret = "wrong".to_string();

        let err = RefreshTokenGrant
            .handle_token_request(&ctx, &mut request, &test_client())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidClientSecret);
        assert_eq!(store.reads(), 1);
    }

    #[tokio::test]
    async fn test_scope_revoked_from_client() {
        let (store, _) = setup(Some("7"));
        let ctx = store.context();
        let mut client = test_client();
        client.scopes.clear();

        let err = RefreshTokenGrant
            .handle_token_request(&ctx, &mut request(), &client)
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidRefreshToken);
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_user_deleted() {
        let (store, _) = setup(Some("7"));
        store.users.write().unwrap().clear();
        let ctx = store.context();

        let err = RefreshTokenGrant
            .handle_token_request(&ctx, &mut request(), &test_client())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidRefreshToken);
    }
}
