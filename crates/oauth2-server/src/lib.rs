//! # oauth2-server
//!
//! OAuth 2.0 authorization server core.
//!
//! This crate provides:
//! - A grant-dispatch engine for authorization and token endpoint requests
//! - Six grant strategies (authorization code, implicit, client credentials,
//!   password, refresh token and third-party union id login)
//! - Repository and factory traits that storage backends implement
//! - Server configuration
//!
//! ## Overview
//!
//! The [`AuthorizationServer`] validates the parts of a request shared by all
//! flows, then delegates to the [`Grant`](grant::Grant) registered for the
//! request's grant type. Grants mint codes and tokens through the factory
//! traits and persist them through the repository traits; this crate ships no
//! storage of its own.
//!
//! ## Modules
//!
//! - [`config`] - Server configuration
//! - [`error`] - Error types
//! - [`factory`] - Code and token factory traits
//! - [`grant`] - Grant strategies and the grant registry
//! - [`repository`] - Storage traits
//! - [`response_type`] - Response type to grant type mapping
//! - [`server`] - The dispatch engine
//! - [`types`] - Domain types

pub mod config;
pub mod error;
pub mod factory;
pub mod grant;
pub mod repository;
pub mod response_type;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ConfigError, LifetimeConfig, MAX_LIFETIME, ServerConfig};
pub use error::{AuthError, ErrorCategory};
pub use factory::{AccessTokenFactory, AuthCodeFactory, MintContext, RefreshTokenFactory};
pub use grant::{Grant, GrantContext, GrantRegistry};
pub use repository::{
    AccessTokenRepository, AuthCodeRepository, ClientRepository, RefreshTokenRepository,
    UserRepository, UserThirdPartyRepository,
};
pub use response_type::{ResponseType, ResponseTypeRegistry};
pub use server::AuthorizationServer;
pub use types::{
    AccessToken, AuthCode, Client, GrantType, RefreshToken, Request, TokenResponse, User,
    UserThirdPartyLink,
};

/// Type alias for authorization server results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use oauth2_server::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::config::{ConfigError, LifetimeConfig, ServerConfig};
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::factory::{AccessTokenFactory, AuthCodeFactory, MintContext, RefreshTokenFactory};
    pub use crate::grant::{Grant, GrantContext, GrantRegistry};
    pub use crate::repository::{
        AccessTokenRepository, AuthCodeRepository, ClientRepository, RefreshTokenRepository,
        UserRepository, UserThirdPartyRepository,
    };
    pub use crate::response_type::{ResponseType, ResponseTypeRegistry};
    pub use crate::server::AuthorizationServer;
    pub use crate::types::{
        AccessToken, AuthCode, Client, GrantType, RefreshToken, Request, TokenResponse, User,
        UserThirdPartyLink,
    };
}
