//! User identity and account aggregate.
//!
//! Purpose: strongly typed user identifiers and the stored account record.
//! The email address doubles as the login name and as the source of the
//! public author display name (the local part before `@`).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised by [`UserId`] and [`EmailAddress`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier is not a valid UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Email is empty once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email contains surrounding whitespace.
    #[error("email must not contain surrounding whitespace")]
    EmailContainsWhitespace,
    /// Email is missing the `@` separator or a local part before it.
    #[error("email must contain a local part followed by '@'")]
    MalformedEmail,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct from an already-parsed UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address used as the login name.
///
/// ## Invariants
/// - Non-empty, no surrounding whitespace.
/// - Contains a non-empty local part followed by `@`.
/// - Stored case-sensitively; two addresses differing only in case are
///   distinct accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::EmailContainsWhitespace);
        }
        match raw.split_once('@') {
            Some((local, _)) if !local.is_empty() => Ok(Self(raw)),
            _ => Err(UserValidationError::MalformedEmail),
        }
    }

    /// Borrow the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The local part before `@`, used as the public author display name.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored user account.
///
/// Created at signup and immutable afterwards. The password hash is an opaque
/// string produced by the configured hasher; the domain never inspects it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Server-generated identifier, referenced by posts as the owner.
    pub id: UserId,
    /// Unique login name and author identity.
    pub email: EmailAddress,
    /// Opaque password hash.
    pub password_hash: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Assemble a new account record.
    #[must_use]
    pub fn new(
        id: UserId,
        email: EmailAddress,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }

    /// Public author display name derived from the email local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email.local_part()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("  ada@example.com", UserValidationError::EmailContainsWhitespace)]
    #[case("ada@example.com ", UserValidationError::EmailContainsWhitespace)]
    #[case("ada.example.com", UserValidationError::MalformedEmail)]
    #[case("@example.com", UserValidationError::MalformedEmail)]
    fn rejects_invalid_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
        let err = EmailAddress::new(raw).expect_err("invalid email must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("ada@example.com", "ada")]
    #[case("grace.hopper@navy.mil", "grace.hopper")]
    #[case("a@b@c", "a")]
    fn local_part_stops_at_first_at_sign(#[case] raw: &str, #[case] expected: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.local_part(), expected);
    }

    #[rstest]
    fn user_id_parse_rejects_garbage() {
        assert_eq!(
            UserId::parse("not-a-uuid").expect_err("must fail"),
            UserValidationError::InvalidId
        );
    }

    #[rstest]
    fn user_id_round_trips_through_display() {
        let id = UserId::random();
        let parsed = UserId::parse(&id.to_string()).expect("display output is valid");
        assert_eq!(parsed, id);
    }
}
