use sha2::{Digest, Sha256};

use crate::config::DEFAULT_PASSWORD_SECRET;

/// Unsalted SHA-256 password digests.
///
/// The digest covers `password ++ secret` where the secret is shared by every
/// account, so two users with the same password store the same digest.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    secret: String,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_PASSWORD_SECRET)
    }
}

impl PasswordHasher {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// 64 lowercase hex characters.
    pub fn hash(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(self.secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn verify(&self, password: &str, digest: &str) -> bool {
        constant_time_eq(self.hash(password).as_bytes(), digest.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let hasher = PasswordHasher::default();
        let digest = hasher.hash("test_password123");

        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert!(hasher.verify("test_password123", &digest));
        assert!(!hasher.verify("wrong_password", &digest));
    }

    #[test]
    fn test_known_digest() {
        // sha256("password" ++ "salt_secret_key")
        let expected = {
            let mut h = Sha256::new();
            h.update(b"passwordsalt_secret_key");
            hex::encode(h.finalize())
        };
        assert_eq!(PasswordHasher::default().hash("password"), expected);
    }

    #[test]
    fn test_digest_is_deterministic_without_salt() {
        let hasher = PasswordHasher::default();
        assert_eq!(hasher.hash("same-password"), hasher.hash("same-password"));
    }

    #[test]
    fn test_secret_changes_digest() {
        let a = PasswordHasher::new("one");
        let b = PasswordHasher::new("two");
        assert_ne!(a.hash("password"), b.hash("password"));
        assert!(!b.verify("password", &a.hash("password")));
    }

    #[test]
    fn test_verify_with_malformed_digest() {
        let hasher = PasswordHasher::default();
        assert!(!hasher.verify("test_password123", "invalidhashformat"));
        assert!(!hasher.verify("test_password123", ""));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }
}
