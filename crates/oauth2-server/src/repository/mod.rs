//! Repository traits for clients, users and issued artifacts.
//!
//! The grant engine treats every repository as a black box. Implementations
//! must guarantee:
//!
//! - atomic single-artifact `add` / `remove`
//! - at-most-once redemption: when two calls look up the same authorization
//!   code or refresh token and race to delete it, only one may succeed
//!
//! # Implementations
//!
//! - `oauth2-server-memory` - in-memory backend

pub mod access_token;
pub mod auth_code;
pub mod client;
pub mod refresh_token;
pub mod user;

pub use access_token::AccessTokenRepository;
pub use auth_code::AuthCodeRepository;
pub use client::ClientRepository;
pub use refresh_token::RefreshTokenRepository;
pub use user::{UserRepository, UserThirdPartyRepository};
