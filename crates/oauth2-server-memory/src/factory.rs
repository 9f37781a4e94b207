//! Random code and token minting.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use oauth2_server::{
    AccessToken, AccessTokenFactory, AuthCode, AuthCodeFactory, AuthError, AuthResult,
    LifetimeConfig, MintContext, RefreshToken, RefreshTokenFactory, User,
};
use rand::RngCore;
use time::OffsetDateTime;
use uuid::Uuid;

/// Mints codes and tokens as 256-bit random values, base64url encoded
/// without padding, with lifetimes taken from [`LifetimeConfig`].
#[derive(Debug, Clone, Default)]
pub struct RandomTokenFactory {
    lifetimes: LifetimeConfig,
}

impl RandomTokenFactory {
    /// Creates a factory with the given lifetimes.
    #[must_use]
    pub fn new(lifetimes: LifetimeConfig) -> Self {
        Self { lifetimes }
    }

    /// Returns the configured lifetimes.
    #[must_use]
    pub fn lifetimes(&self) -> &LifetimeConfig {
        &self.lifetimes
    }

    /// Generates a new opaque value.
    #[must_use]
    pub fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

fn lifetime_seconds(lifetime: std::time::Duration) -> AuthResult<i64> {
    i64::try_from(lifetime.as_secs())
        .map_err(|_| AuthError::configuration("token lifetime out of range"))
}

impl AuthCodeFactory for RandomTokenFactory {
    fn new_auth_code(&self, ctx: &MintContext<'_>, user: &User) -> AuthResult<AuthCode> {
        let lifetime = time::Duration::seconds(lifetime_seconds(
            self.lifetimes.authorization_code_lifetime,
        )?);
        let expires_at = OffsetDateTime::now_utc()
            .checked_add(lifetime)
            .ok_or_else(|| AuthError::configuration("authorization code lifetime out of range"))?;

        Ok(AuthCode {
            code: Self::generate_token(),
            client_id: ctx.client.client_id.clone(),
            user_id: user.id.clone(),
            scope: ctx.scope.to_string(),
            redirect_uri: ctx.request.redirect_uri.clone(),
            expires_at,
        })
    }
}

impl AccessTokenFactory for RandomTokenFactory {
    fn new_access_token(
        &self,
        ctx: &MintContext<'_>,
        _previous: Option<&RefreshToken>,
    ) -> AuthResult<AccessToken> {
        Ok(AccessToken {
            id: Uuid::new_v4(),
            token: Self::generate_token(),
            client_id: ctx.client.client_id.clone(),
            user_id: ctx.user.map(|user| user.id.clone()),
            scope: ctx.scope.to_string(),
            expires_in: lifetime_seconds(self.lifetimes.access_token_lifetime)?,
            created_at: OffsetDateTime::now_utc(),
        })
    }
}

impl RefreshTokenFactory for RandomTokenFactory {
    fn new_refresh_token(
        &self,
        ctx: &MintContext<'_>,
        access_token: &AccessToken,
    ) -> AuthResult<RefreshToken> {
        Ok(RefreshToken {
            id: Uuid::new_v4(),
            token: Self::generate_token(),
            client_id: ctx.client.client_id.clone(),
            user_id: ctx.user.map(|user| user.id.clone()),
            scope: ctx.scope.to_string(),
            access_token_id: access_token.id,
            created_at: OffsetDateTime::now_utc(),
            expires_in: lifetime_seconds(self.lifetimes.refresh_token_lifetime)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oauth2_server::{Client, Request};
    use std::time::Duration;

    #[test]
    fn test_generate_token() {
        let token = RandomTokenFactory::generate_token();
        // 32 bytes -> 43 base64url characters without padding
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_ne!(token, RandomTokenFactory::generate_token());
    }

    #[test]
    fn test_mint_binds_context() {
        let factory = RandomTokenFactory::new(LifetimeConfig {
            authorization_code_lifetime: Duration::from_secs(60),
            access_token_lifetime: Duration::from_secs(120),
            refresh_token_lifetime: Duration::from_secs(240),
        });
        let request = Request::authorization("c1", "code", "read", "https://a/cb");
        let client = Client::new("c1");
        let user = User::new("7", "alice");
        let ctx = MintContext::new(&request, &client, Some(&user), "read");

        let code = factory.new_auth_code(&ctx, &user).unwrap();
        assert_eq!(code.user_id, "7");
        assert_eq!(code.redirect_uri, "https://a/cb");
        assert!(code.expires_at <= OffsetDateTime::now_utc() + time::Duration::seconds(60));

        let access = factory.new_access_token(&ctx, None).unwrap();
        assert_eq!(access.expires_in, 120);
        assert_eq!(access.user_id.as_deref(), Some("7"));

        let refresh = factory.new_refresh_token(&ctx, &access).unwrap();
        assert_eq!(refresh.expires_in, 240);
        assert_eq!(refresh.access_token_id, access.id);
        assert_eq!(refresh.scope, "read");
    }

    #[test]
    fn test_mint_without_user() {
        let factory = RandomTokenFactory::default();
        let request = Request::token("ClientCredentials", "c1", "secret");
        let client = Client::new("c1");
        let ctx = MintContext::new(&request, &client, None, "basic");

        let access = factory.new_access_token(&ctx, None).unwrap();
        assert!(access.user_id.is_none());
        assert_eq!(access.expires_in, 3600);
        assert_eq!(access.scope, "basic");
    }

    #[test]
    fn test_lifetime_out_of_range() {
        let factory = RandomTokenFactory::new(LifetimeConfig {
            access_token_lifetime: Duration::MAX,
            ..LifetimeConfig::default()
        });
        let request = Request::default();
        let client = Client::new("c1");
        let ctx = MintContext::new(&request, &client, None, "basic");

        let err = factory.new_access_token(&ctx, None).unwrap_err();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_auth_code_expiry_past_date_range() {
        let factory = RandomTokenFactory::new(LifetimeConfig {
            authorization_code_lifetime: Duration::from_secs(400_000_000_000),
            ..LifetimeConfig::default()
        });
        let request = Request::authorization("c1", "code", "read", "https://a/cb");
        let client = Client::new("c1");
        let user = User::new("7", "alice");
        let ctx = MintContext::new(&request, &client, Some(&user), "read");

        let err = factory.new_auth_code(&ctx, &user).unwrap_err();
        assert_eq!(
            err,
            AuthError::configuration("authorization code lifetime out of range")
        );
    }
}
