//! Argon2id password hashing, verification, and strength validation.
//!
//! Hashes use the Argon2id variant with a random salt from [`OsRng`] and
//! are stored in PHC string format, so parameters and salt travel with the
//! hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::OnceLock;

/// Hash of a random throwaway password, built on first use with the same
/// parameters as real hashes.
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Run a full Argon2 verification that can never succeed.
///
/// Used when no account matches so a failed login costs the same whether or
/// not the e-mail exists. Always returns `false`.
pub fn verify_against_dummy(password: &str) -> bool {
    let dummy = DUMMY_HASH.get_or_init(|| {
        let secret = SaltString::generate(&mut OsRng);
        hash_password(secret.as_str()).ok()
    });
    match dummy {
        Some(hash) => {
            let _ = verify_password(password, hash);
        }
        None => tracing::warn!("Dummy password hash unavailable"),
    }
    false
}

/// Reject passwords shorter than `min_length` characters.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        let verified = verify_password("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_dummy_verification_never_matches() {
        assert!(!verify_against_dummy(""));
        assert!(!verify_against_dummy("correct-horse-battery-staple"));
        let dummy = DUMMY_HASH.get().and_then(Option::as_deref).expect("dummy hash is built");
        assert!(dummy.starts_with("$argon2id$"), "dummy must cost the same as a real hash");
    }

    #[test]
    fn test_password_length_boundary() {
        assert!(validate_password_strength("1234567", 8).is_err());
        assert!(validate_password_strength("12345678", 8).is_ok());
        // Counted in characters, not bytes.
        assert!(validate_password_strength("ççççççç", 8).is_err());
    }
}
