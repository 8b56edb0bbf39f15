//! Salted password hashing.

use sha2::{Digest, Sha256};

/// Fresh random salt, hex encoded.
pub fn generate_salt() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn digest(salt: &str, password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// SHA-256 of `salt:password`, hex encoded.
pub fn hash_password(salt: &str, password: &str) -> String {
    hex::encode(digest(salt, password))
}

/// Check `password` against a stored salt and hash.
///
/// Every byte of the digest is compared, so timing does not depend on where
/// the first mismatch sits.
pub fn verify_password(salt: &str, password: &str, expected_hash: &str) -> bool {
    let Ok(expected) = hex::decode(expected_hash) else {
        return false;
    };
    let actual = digest(salt, password);
    if expected.len() != actual.len() {
        return false;
    }
    actual
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_consistency() {
        assert_eq!(hash_password("salt", "secret1"), hash_password("salt", "secret1"));
        assert_eq!(hash_password("salt", "secret1").len(), 64);
    }

    #[test]
    fn test_salt_changes_hash() {
        let a = generate_salt();
        let b = generate_salt();
        assert_ne!(a, b);
        assert_ne!(hash_password(&a, "secret1"), hash_password(&b, "secret1"));
    }

    #[test]
    fn test_verify_password() {
        let salt = generate_salt();
        let stored = hash_password(&salt, "hunter22");
        assert!(verify_password(&salt, "hunter22", &stored));
        assert!(!verify_password(&salt, "hunter23", &stored));
    }

    #[test]
    fn test_verify_rejects_malformed_stored_hash() {
        let salt = generate_salt();
        let stored = hash_password(&salt, "hunter22");
        assert!(!verify_password(&salt, "hunter22", "not-hex"));
        assert!(!verify_password(&salt, "hunter22", &stored[..62]));
        assert!(!verify_password(&salt, "hunter22", ""));
        assert!(verify_password(&salt, "hunter22", &stored.to_uppercase()));
    }
}
