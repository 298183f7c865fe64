use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use errors::CustomError;

pub fn generate_random_salt() -> SaltString {
    let mut rng = rand::thread_rng();
    SaltString::generate(&mut rng)
}

pub fn hash_password(password: &str) -> Result<String, CustomError> {
    let argon2 = Argon2::default();
    let salt = generate_random_salt();
    let password_hashed = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| CustomError::UnexpectedError(anyhow::anyhow!("Failed to hash password: {}", err)))?;
    Ok(password_hashed.to_string())
}

// A stored hash that fails to parse counts as a mismatch rather than a panic.
pub fn verify_password(expected_hash: &str, candidate: &str) -> bool {
    let argon2 = Argon2::default();
    PasswordHash::new(expected_hash)
        .map(|parsed| {
            argon2
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_succeeds() {
        let hash = hash_password("pw123").unwrap();
        assert!(verify_password(&hash, "pw123"));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("pw123").unwrap();
        assert!(!verify_password(&hash, "pw124"));
    }

    #[test]
    fn two_hashes_of_the_same_password_differ() {
        let first = hash_password("pw123").unwrap();
        let second = hash_password("pw123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn unparsable_stored_hash_is_a_mismatch() {
        assert!(!verify_password("not-a-phc-string", "pw123"));
    }
}
