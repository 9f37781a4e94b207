//! Factory traits for minting authorization codes and tokens.
//!
//! Token values, ids and lifetimes are entirely the factory's business. The
//! engine only decides *when* an artifact is minted and which client, user
//! and scope it is bound to.

use crate::AuthResult;
use crate::types::{AccessToken, AuthCode, Client, RefreshToken, Request, User};

/// What a new artifact is bound to.
///
/// `scope` is the scope the grant resolved, which is not always the scope
/// the caller sent: redemption binds the stored scope and the default-scope
/// grants bind the server or client default.
#[derive(Debug, Clone, Copy)]
pub struct MintContext<'a> {
    /// The request being handled.
    pub request: &'a Request,
    /// The authenticated client.
    pub client: &'a Client,
    /// The resource owner, absent for client credentials tokens.
    pub user: Option<&'a User>,
    /// The scope to bind.
    pub scope: &'a str,
}

impl<'a> MintContext<'a> {
    /// Creates a new mint context.
    #[must_use]
    pub fn new(
        request: &'a Request,
        client: &'a Client,
        user: Option<&'a User>,
        scope: &'a str,
    ) -> Self {
        Self {
            request,
            client,
            user,
            scope,
        }
    }
}

/// Mints authorization codes.
pub trait AuthCodeFactory: Send + Sync {
    /// Creates a code for `user` authorizing `ctx.client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the code cannot be generated.
    fn new_auth_code(&self, ctx: &MintContext<'_>, user: &User) -> AuthResult<AuthCode>;
}

/// Mints access tokens.
pub trait AccessTokenFactory: Send + Sync {
    /// Creates an access token.
    ///
    /// `previous` is the refresh token being redeemed when the token is
    /// minted by the refresh grant.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be generated.
    fn new_access_token(
        &self,
        ctx: &MintContext<'_>,
        previous: Option<&RefreshToken>,
    ) -> AuthResult<AccessToken>;
}

/// Mints refresh tokens.
pub trait RefreshTokenFactory: Send + Sync {
    /// Creates a refresh token issued alongside `access_token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be generated.
    fn new_refresh_token(
        &self,
        ctx: &MintContext<'_>,
        access_token: &AccessToken,
    ) -> AuthResult<RefreshToken>;
}
