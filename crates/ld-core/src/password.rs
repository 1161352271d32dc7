use once_cell::sync::Lazy;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashFailed(String),
}

/// bcrypt cost factor used when provisioning admin accounts. Deliberately
/// slow; this is the one place where the pipeline burns CPU on purpose.
pub const BCRYPT_COST: u32 = 10;

/// Hash computed once at first use and verified against on the
/// unknown-username login path, so that path costs roughly the same as a
/// genuine password mismatch.
static FALLBACK_HASH: Lazy<String> =
    Lazy::new(|| bcrypt::hash("lead-desk-timing-fallback", BCRYPT_COST).unwrap_or_default());

/// Hash a password with bcrypt using [`BCRYPT_COST`].
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| PasswordError::HashFailed(e.to_string()))
}

/// Verify a password against a stored bcrypt hash. A malformed stored hash
/// counts as a mismatch rather than an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Run a full-cost bcrypt verification and discard the result. Called when
/// the login username does not exist, so username enumeration cannot lean on
/// the cheap early return.
pub fn burn_verification(password: &str) {
    let _ = bcrypt::verify(password, &FALLBACK_HASH);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("TestPassword123!").unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("TestPassword123!", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_same_password_different_salts() {
        let h1 = hash_password("password1").unwrap();
        let h2 = hash_password("password1").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_burn_verification_does_not_panic() {
        burn_verification("any probe at all");
    }
}
