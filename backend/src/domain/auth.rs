//! Authentication primitives: validated credentials and the issued session.
//!
//! Inbound payload parsing stays outside the domain; handlers construct these
//! types from raw strings before talking to the account service. Passwords
//! are held in zeroizing buffers so they are wiped when dropped.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserValidationError};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    /// Email failed address validation.
    #[error(transparent)]
    Email(#[from] UserValidationError),
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated signup payload.
///
/// ## Invariants
/// - `email` satisfies [`EmailAddress`] validation.
/// - `password` is non-empty; caller-provided whitespace is preserved so
///   credential comparisons are never surprising.
#[derive(Clone)]
pub struct SignupCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignupCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// The validated email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The raw password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignupCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated login payload.
///
/// The login name is kept as a raw trimmed string rather than an
/// [`EmailAddress`]: an unknown or malformed name must fail with the same
/// bad-credentials signal as a wrong password, not with a validation error.
#[derive(Clone)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyEmail.into());
        }
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Login name used for the account lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// The raw password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of a successful signup or login: a bearer token bound to the
/// account's email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Signed bearer token carrying the user id and expiry.
    pub access_token: String,
    /// Email echoed back to the client.
    pub email: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.com", "")]
    fn signup_rejects_empty_password(#[case] email: &str, #[case] password: &str) {
        let err = SignupCredentials::try_from_parts(email, password)
            .expect_err("empty password must fail");
        assert_eq!(err, CredentialValidationError::EmptyPassword);
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("@example.com")]
    fn signup_rejects_malformed_email(#[case] email: &str) {
        let err = SignupCredentials::try_from_parts(email, "pw")
            .expect_err("malformed email must fail");
        assert!(matches!(err, CredentialValidationError::Email(_)));
    }

    #[rstest]
    fn login_trims_the_login_name_only() {
        let creds =
            LoginCredentials::try_from_parts("  ada@example.com  ", "  pw  ").expect("valid");
        assert_eq!(creds.email(), "ada@example.com");
        assert_eq!(creds.password(), "  pw  ");
    }

    #[rstest]
    fn login_accepts_names_that_are_not_addresses() {
        // Unknown login names fail later with a bad-credentials signal, not
        // with payload validation.
        let creds = LoginCredentials::try_from_parts("ada", "pw").expect("valid");
        assert_eq!(creds.email(), "ada");
    }

    #[rstest]
    fn debug_output_redacts_passwords() {
        let creds = SignupCredentials::try_from_parts("ada@example.com", "hunter2")
            .expect("valid");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
