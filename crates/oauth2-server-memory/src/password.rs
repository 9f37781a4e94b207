//! Password hashing for stored users.
//!
//! Passwords are hashed with Argon2id using default parameters and a random
//! salt from `OsRng`, and stored in PHC string format.
//!
//! # Example
//!
//! ```
//! use oauth2_server_memory::password::{hash_password, verify_password};
//!
//! let hash = hash_password("correct horse").unwrap();
//! assert!(verify_password("correct horse", &hash).unwrap());
//! assert!(!verify_password("battery staple", &hash).unwrap());
//! ```

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hashes a password for storage.
///
/// # Errors
///
/// Returns `argon2::password_hash::Error` if hashing fails (rare).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch. Fails only if the hash is malformed.
///
/// # Errors
///
/// Returns `argon2::password_hash::Error` if `hash` is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
