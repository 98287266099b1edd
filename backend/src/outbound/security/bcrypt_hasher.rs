//! Bcrypt-backed implementation of the `PasswordHasher` port.

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Password hasher using bcrypt with a configurable cost factor.
#[derive(Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with an explicit cost factor.
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Low-cost hasher for tests, where timing does not matter.
    #[must_use]
    pub fn fast_for_tests() -> Self {
        // 4 is the smallest cost bcrypt accepts.
        Self { cost: 4 }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        bcrypt::hash(password, self.cost).map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        bcrypt::verify(password, hash).map_err(|err| PasswordHashError::verify(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn hash_and_verify_round_trip() {
        let hasher = BcryptPasswordHasher::fast_for_tests();
        let hash = hasher.hash("hunter2").expect("hashing succeeds");
        assert!(hasher.verify("hunter2", &hash).expect("verification runs"));
        assert!(!hasher.verify("wrong", &hash).expect("verification runs"));
    }

    #[rstest]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        let hasher = BcryptPasswordHasher::fast_for_tests();
        let err = hasher
            .verify("hunter2", "not-a-bcrypt-hash")
            .expect_err("malformed hash must error");
        assert!(matches!(err, PasswordHashError::Verify { .. }));
    }

    #[rstest]
    fn hashes_are_salted() {
        let hasher = BcryptPasswordHasher::fast_for_tests();
        let first = hasher.hash("hunter2").expect("hashing succeeds");
        let second = hasher.hash("hunter2").expect("hashing succeeds");
        assert_ne!(first, second);
    }
}
