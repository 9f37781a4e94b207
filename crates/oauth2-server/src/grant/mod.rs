//! Grant strategies.
//!
//! Each grant owns the validation and minting protocol of one flow and
//! implements the two-operation [`Grant`] contract. A grant that does not
//! support an operation fails with [`AuthError::UnsupportedMethod`].
//!
//! | Grant | Authorization request | Token request |
//! |---|---|---|
//! | [`AuthorizationCodeGrant`] | mints a code | redeems a code |
//! | [`ImplicitGrant`] | mints an access token | unsupported |
//! | [`ClientCredentialsGrant`] | unsupported | tokens without a user |
//! | [`PasswordGrant`] | unsupported | tokens for name + password |
//! | [`RefreshTokenGrant`] | unsupported | replaces the access token |
//! | [`OpenIdGrant`] | unsupported | tokens for a third-party union id |
//!
//! Strategies are resolved through a [`GrantRegistry`] built once at
//! startup and shared by reference.

pub mod authorization_code;
pub mod client_credentials;
pub mod context;
pub mod implicit;
pub mod open_id;
pub mod password;
pub mod refresh_token;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::AuthResult;
use crate::error::AuthError;
use crate::factory::MintContext;
use crate::response_type::ResponseTypeRegistry;
use crate::types::{AccessToken, Client, GrantType, RefreshToken, Request, TokenResponse, User};

pub use authorization_code::AuthorizationCodeGrant;
pub use client_credentials::ClientCredentialsGrant;
pub use context::GrantContext;
pub use implicit::ImplicitGrant;
pub use open_id::OpenIdGrant;
pub use password::PasswordGrant;
pub use refresh_token::RefreshTokenGrant;

/// The two-operation contract every grant strategy implements.
#[async_trait]
pub trait Grant: Send + Sync {
    /// The grant type this strategy handles.
    fn grant_type(&self) -> GrantType;

    /// Handles an authorization endpoint request for an already validated
    /// client and user, returning the redirect URI to send the user agent to.
    ///
    /// # Errors
    ///
    /// The default implementation fails with `UnsupportedMethod`.
    async fn handle_authorization_request(
        &self,
        _ctx: &GrantContext,
        _request: &Request,
        _user: &User,
        _client: &Client,
    ) -> AuthResult<String> {
        Err(AuthError::unsupported_method(
            self.grant_type().as_str(),
            "authorization request",
        ))
    }

    /// Handles a token endpoint request for a client already known to permit
    /// this grant.
    ///
    /// # Errors
    ///
    /// The default implementation fails with `UnsupportedMethod`.
    async fn handle_token_request(
        &self,
        _ctx: &GrantContext,
        _request: &mut Request,
        _client: &Client,
    ) -> AuthResult<TokenResponse> {
        Err(AuthError::unsupported_method(
            self.grant_type().as_str(),
            "token request",
        ))
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Lookup table from grant type to strategy, plus the response type table.
pub struct GrantRegistry {
    grants: HashMap<GrantType, Arc<dyn Grant>>,
    response_types: ResponseTypeRegistry,
}

impl GrantRegistry {
    /// Creates a registry with no grants and the given response types.
    #[must_use]
    pub fn new(response_types: ResponseTypeRegistry) -> Self {
        Self {
            grants: HashMap::new(),
            response_types,
        }
    }

    /// Creates the standard registry with all six grants and the standard
    /// response types.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(ResponseTypeRegistry::standard())
            .with(Arc::new(AuthorizationCodeGrant))
            .with(Arc::new(ClientCredentialsGrant))
            .with(Arc::new(PasswordGrant))
            .with(Arc::new(RefreshTokenGrant))
            .with(Arc::new(ImplicitGrant))
            .with(Arc::new(OpenIdGrant))
    }

    /// Registers a strategy under its own grant type, replacing any previous
    /// one.
    #[must_use]
    pub fn with(mut self, grant: Arc<dyn Grant>) -> Self {
        self.grants.insert(grant.grant_type(), grant);
        self
    }

    /// Returns the strategy for a grant type.
    #[must_use]
    pub fn get(&self, grant_type: GrantType) -> Option<&Arc<dyn Grant>> {
        self.grants.get(&grant_type)
    }

    /// Resolves a raw `grant_type` value to a registered strategy.
    #[must_use]
    pub fn resolve(&self, grant_type: &str) -> Option<(GrantType, &Arc<dyn Grant>)> {
        let grant_type = grant_type.parse::<GrantType>().ok()?;
        self.get(grant_type).map(|grant| (grant_type, grant))
    }

    /// Returns `true` if a strategy is registered for the grant type.
    #[must_use]
    pub fn contains(&self, grant_type: GrantType) -> bool {
        self.grants.contains_key(&grant_type)
    }

    /// Returns the response type table.
    #[must_use]
    pub fn response_types(&self) -> &ResponseTypeRegistry {
        &self.response_types
    }
}

impl Default for GrantRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for GrantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut grants: Vec<_> = self.grants.keys().map(GrantType::as_str).collect();
        grants.sort_unstable();
        f.debug_struct("GrantRegistry")
            .field("grants", &grants)
            .field("response_types", &self.response_types)
            .finish()
    }
}

// =============================================================================
// Shared steps
// =============================================================================

/// Fails with `InvalidClientSecret` unless the request carries the client's
/// secret.
pub(crate) fn require_client_secret(request: &Request, client: &Client) -> AuthResult<()> {
    if !client.validate_secret(&request.app_secret) {
        tracing::debug!(client_id = %client.client_id, "Client secret mismatch");
        return Err(AuthError::InvalidClientSecret);
    }
    Ok(())
}

/// Returns the server default scope, failing with `InvalidDefaultScope` when
/// it is not configured.
pub(crate) fn require_default_scope(ctx: &GrantContext) -> AuthResult<String> {
    if ctx.default_scope.is_empty() {
        tracing::warn!("Default scope is not configured");
        return Err(AuthError::InvalidDefaultScope);
    }
    Ok(ctx.default_scope.clone())
}

/// Mints and stores an access token, then mints and stores the refresh token
/// issued alongside it.
pub(crate) async fn issue_token_pair(
    ctx: &GrantContext,
    mint: &MintContext<'_>,
) -> AuthResult<(AccessToken, RefreshToken)> {
    let access_token = ctx.access_token_factory.new_access_token(mint, None)?;
    ctx.access_tokens.add(&access_token).await?;

    let refresh_token = ctx
        .refresh_token_factory
        .new_refresh_token(mint, &access_token)?;
    ctx.refresh_tokens.add(&refresh_token).await?;

    Ok((access_token, refresh_token))
}

/// Form-encodes `params`, followed by `state` when non-empty.
fn encode_params(params: &[(&str, &str)], state: &str) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    if !state.is_empty() {
        serializer.append_pair("state", state);
    }
    serializer.finish()
}

/// Rejects anything that is not an absolute URI.
fn check_redirect_uri(redirect_uri: &str) -> AuthResult<()> {
    url::Url::parse(redirect_uri)
        .map(|_| ())
        .map_err(|_| AuthError::invalid_redirect_uri(redirect_uri))
}

/// Appends parameters to the query of `redirect_uri`.
///
/// The registered URI is kept verbatim as the prefix (no normalization), so
/// `https://a` yields `https://a?code=...`. Any fragment stays at the end.
/// `state` is appended after `params` when non-empty.
pub(crate) fn redirect_with_query(
    redirect_uri: &str,
    params: &[(&str, &str)],
    state: &str,
) -> AuthResult<String> {
    check_redirect_uri(redirect_uri)?;

    let (base, fragment) = match redirect_uri.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (redirect_uri, None),
    };
    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };

    let mut uri = format!("{base}{separator}{}", encode_params(params, state));
    if let Some(fragment) = fragment {
        uri.push('#');
        uri.push_str(fragment);
    }
    Ok(uri)
}

/// Replaces the fragment of `redirect_uri` with form-encoded parameters.
///
/// The part before any existing fragment is kept verbatim.
/// `state` is appended after `params` when non-empty.
pub(crate) fn redirect_with_fragment(
    redirect_uri: &str,
    params: &[(&str, &str)],
    state: &str,
) -> AuthResult<String> {
    check_redirect_uri(redirect_uri)?;

    let base = redirect_uri
        .split_once('#')
        .map_or(redirect_uri, |(base, _)| base);
    Ok(format!("{base}#{}", encode_params(params, state)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = GrantRegistry::standard();
        for grant_type in GrantType::ALL {
            let grant = registry.get(grant_type).unwrap();
            assert_eq!(grant.grant_type(), grant_type);
        }
        assert_eq!(
            registry.response_types().resolve("token"),
            Some(GrantType::Implicit)
        );
    }

    #[test]
    fn test_resolve_accepts_both_spellings() {
        let registry = GrantRegistry::standard();
        let (grant_type, _) = registry.resolve("RefreshToken").unwrap();
        assert_eq!(grant_type, GrantType::RefreshToken);
        let (grant_type, _) = registry.resolve("refresh_token").unwrap();
        assert_eq!(grant_type, GrantType::RefreshToken);
        assert!(registry.resolve("device_code").is_none());
    }

    #[test]
    fn test_resolve_unregistered() {
        let registry = GrantRegistry::new(ResponseTypeRegistry::standard())
            .with(Arc::new(PasswordGrant));
        assert!(registry.resolve("Password").is_some());
        assert!(registry.resolve("OpenId").is_none());
        assert!(!registry.contains(GrantType::Implicit));
    }

    #[test]
    fn test_redirect_with_query() {
        let uri = redirect_with_query("https://a/cb", &[("code", "abc")], "xyz").unwrap();
        assert_eq!(uri, "https://a/cb?code=abc&state=xyz");

        let uri = redirect_with_query("https://a/cb?tab=1", &[("code", "abc")], "").unwrap();
        assert_eq!(uri, "https://a/cb?tab=1&code=abc");
    }

    #[test]
    fn test_redirect_keeps_registered_uri_verbatim() {
        let uri = redirect_with_query("https://a", &[("code", "abc")], "").unwrap();
        assert_eq!(uri, "https://a?code=abc");

        let uri = redirect_with_query("HTTPS://A/cb?", &[("code", "abc")], "").unwrap();
        assert_eq!(uri, "HTTPS://A/cb?code=abc");

        let uri = redirect_with_query("https://a/cb#top", &[("code", "abc")], "s").unwrap();
        assert_eq!(uri, "https://a/cb?code=abc&state=s#top");

        let uri = redirect_with_fragment("https://a#old", &[("access_token", "tok")], "").unwrap();
        assert_eq!(uri, "https://a#access_token=tok");
    }

    #[test]
    fn test_redirect_with_query_encodes_state() {
        let uri = redirect_with_query("https://a/cb", &[("code", "abc")], "a b&c").unwrap();
        assert_eq!(uri, "https://a/cb?code=abc&state=a+b%26c");
    }

    #[test]
    fn test_redirect_with_fragment() {
        let uri =
            redirect_with_fragment("https://a/cb", &[("access_token", "tok")], "xyz").unwrap();
        assert_eq!(uri, "https://a/cb#access_token=tok&state=xyz");
    }

    #[test]
    fn test_redirect_rejects_relative_uri() {
        let err = redirect_with_query("/cb", &[("code", "abc")], "").unwrap_err();
        assert_eq!(err, AuthError::invalid_redirect_uri("/cb"));
    }
}
