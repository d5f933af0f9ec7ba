//! One-way password hashing with bcrypt.

use std::sync::OnceLock;

use uuid::Uuid;

/// Work factor for every hash this domain produces. Fixed to the library default.
pub const HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Hash `password` with a fresh salt.
///
/// Passwords longer than bcrypt's 72-byte input limit are rejected rather than
/// silently truncated.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::non_truncating_hash(password, HASH_COST)
}

/// Check `password` against a stored bcrypt `hash`.
///
/// Any verification error (malformed hash, oversized input) counts as a mismatch.
/// The digest comparison itself is constant-time inside bcrypt.
pub fn verify_password(password: &str, hash: &str) -> bool {
    matches!(bcrypt::non_truncating_verify(password, hash), Ok(true))
}

/// Run a full-cost verification that never matches.
///
/// Lets a lookup miss take as long as a password mismatch. The reference hash is
/// built once from a random secret; if that ever fails, nothing is verified.
pub fn verify_dummy(password: &str) -> bool {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    DUMMY_HASH
        .get_or_init(|| hash_password(&Uuid::new_v4().to_string()).ok())
        .as_deref()
        .is_some_and(|hash| verify_password(password, hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifies() {
        let a = hash_password("s3cret!").expect("hash");
        let b = hash_password("s3cret!").expect("hash");
        assert_ne!(a, "s3cret!");
        assert_ne!(a, b);
        assert!(verify_password("s3cret!", &a));
        assert!(verify_password("s3cret!", &b));
        assert!(!verify_password("s3cret!x", &a));
    }

    #[test]
    fn oversized_password_is_rejected() {
        let long = "x".repeat(73);
        assert!(hash_password(&long).is_err());
    }

    #[test]
    fn dummy_verification_never_matches() {
        for password in ["", "s3cret!", "00000000-0000-0000-0000-000000000000"] {
            assert!(!verify_dummy(password));
        }
        // The reference hash is built once and reused.
        assert!(!verify_dummy("s3cret!"));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("s3cret!", "not-a-bcrypt-hash"));
        assert!(!verify_password("", ""));
    }
}
