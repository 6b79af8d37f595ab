//! Password hashing utility
//!
//! Primary scheme is bcrypt, which caps input at 72 bytes; anything longer
//! is truncated before hashing so hash and verify agree. If bcrypt rejects
//! the input the hash falls back to argon2 as an explicit second branch.
//! Verification dispatches on the digest prefix, so both schemes remain
//! verifiable side by side.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// bcrypt processes at most 72 bytes of input
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashFailed(String),
}

fn truncated(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}

/// Hash a plaintext password
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let input = truncated(password);
    match bcrypt::hash(input, bcrypt::DEFAULT_COST) {
        Ok(digest) => Ok(digest),
        Err(bcrypt_err) => {
            // Secondary scheme for input the primary library rejects
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(input, &salt)
                .map(|hash| hash.to_string())
                .map_err(|argon_err| {
                    PasswordError::HashFailed(format!(
                        "bcrypt: {}; argon2 fallback: {}",
                        bcrypt_err, argon_err
                    ))
                })
        }
    }
}

/// Verify a plaintext password against a stored digest
pub fn verify_password(password: &str, digest: &str) -> bool {
    let input = truncated(password);
    if digest.starts_with("$argon2") {
        match PasswordHash::new(digest) {
            Ok(parsed) => Argon2::default().verify_password(input, &parsed).is_ok(),
            Err(_) => false,
        }
    } else {
        bcrypt::verify(input, digest).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let digest = hash_password("hunter2-but-longer").unwrap();
        assert!(digest.starts_with("$2"));
        assert!(verify_password("hunter2-but-longer", &digest));
        assert!(!verify_password("wrong-password", &digest));
    }

    #[test]
    fn passwords_agreeing_on_first_72_bytes_match() {
        let base: String = "x".repeat(MAX_PASSWORD_BYTES);
        let longer = format!("{}-trailing-ignored", base);
        let digest = hash_password(&longer).unwrap();
        assert!(verify_password(&base, &digest));
    }

    #[test]
    fn verify_dispatches_on_argon2_prefix() {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(b"fallback-pass", &salt)
            .unwrap()
            .to_string();
        assert!(verify_password("fallback-pass", &digest));
        assert!(!verify_password("not-the-pass", &digest));
    }

    #[test]
    fn garbage_digest_never_verifies() {
        assert!(!verify_password("anything", "not-a-digest"));
        assert!(!verify_password("anything", "$argon2-malformed"));
    }
}
