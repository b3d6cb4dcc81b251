use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

fn salt() -> SaltString {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).expect("salt")
}

/// One-way salted digest in PHC string format. A fresh salt is drawn per
/// call, so hashing the same password twice yields different digests.
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    Argon2::default()
        .hash_password(password.as_bytes(), &salt())
        .map(|h| h.to_string())
}

/// Returns false for any mismatch, including malformed digests. Never
/// panics. Comparison is delegated to the argon2 crate's constant-time
/// verifier.
pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .ok()
        .as_ref()
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_verifies_against_own_hash() {
        let hashword = hash("correct horse battery staple").unwrap();
        assert!(verify("correct horse battery staple", &hashword));
    }

    #[test]
    fn wrong_password_fails() {
        let hashword = hash("correct horse battery staple").unwrap();
        assert!(!verify("incorrect horse", &hashword));
    }

    #[test]
    fn same_password_hashes_differently() {
        assert_ne!(hash("hunter2").unwrap(), hash("hunter2").unwrap());
    }

    #[test]
    fn malformed_digest_verifies_false() {
        assert!(!verify("anything", "not-a-phc-string"));
        assert!(!verify("anything", ""));
    }
}
