//! Entity and value types shared by the grant engine and its collaborators.
//!
//! ## Domain Types
//!
//! - [`Request`] - One inbound authorization or token call
//! - [`Client`] - Registered client application
//! - [`GrantType`] - Supported grant types
//! - [`User`] / [`UserThirdPartyLink`] - Resource owners and federated links
//! - [`AuthCode`], [`AccessToken`], [`RefreshToken`] - Issued artifacts
//! - [`TokenResponse`] - Token endpoint result

pub mod access_token;
pub mod auth_code;
pub mod client;
pub mod refresh_token;
pub mod request;
pub mod token_response;
pub mod user;

pub use access_token::AccessToken;
pub use auth_code::AuthCode;
pub use client::{Client, GrantType, UnknownGrantType};
pub use refresh_token::RefreshToken;
pub use request::Request;
pub use token_response::TokenResponse;
pub use user::{User, UserThirdPartyLink};
