//! Bearer-token identity resolution.
//!
//! Two resolution modes exist: required (missing or bad tokens fail with an
//! unauthorized error) and optional (any problem quietly yields "no
//! identity"). Optional resolution backs the one anonymous-reachable
//! operation, reading a post.

use std::sync::Arc;

use tracing::debug;

use super::error::Error;
use super::ports::{TokenError, TokenService};
use super::user::UserId;

/// Resolves inbound bearer tokens to user identities via the token port.
#[derive(Clone)]
pub struct IdentityResolver {
    tokens: Arc<dyn TokenService>,
}

impl IdentityResolver {
    /// Create a resolver over the given token service.
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }

    /// Resolve a token that must be present and valid.
    ///
    /// # Errors
    /// Returns an unauthorized error when the token is absent, malformed,
    /// carries a bad signature, or has expired.
    pub fn resolve_required(&self, token: Option<&str>) -> Result<UserId, Error> {
        let raw = token.ok_or_else(|| Error::unauthorized("Not authenticated"))?;
        self.tokens.verify(raw).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            match err {
                TokenError::Expired => Error::unauthorized("Token has expired"),
                _ => Error::unauthorized("Invalid token"),
            }
        })
    }

    /// Resolve a token that may be absent; never fails.
    ///
    /// Absent, malformed, or expired tokens all yield `None` so guests and
    /// broken clients are treated alike.
    pub fn resolve_optional(&self, token: Option<&str>) -> Option<UserId> {
        let raw = token?;
        match self.tokens.verify(raw) {
            Ok(user_id) => Some(user_id),
            Err(err) => {
                debug!(error = %err, "ignoring invalid optional token");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    /// Token service double that recognises a single literal token.
    struct SingleTokenService {
        accepted: &'static str,
        subject: UserId,
        failure: TokenError,
    }

    impl TokenService for SingleTokenService {
        fn issue(&self, _user: &UserId) -> Result<String, TokenError> {
            Ok(self.accepted.to_owned())
        }

        fn verify(&self, raw: &str) -> Result<UserId, TokenError> {
            if raw == self.accepted {
                Ok(self.subject)
            } else {
                Err(self.failure.clone())
            }
        }
    }

    fn resolver(failure: TokenError) -> (IdentityResolver, UserId) {
        let subject = UserId::random();
        let service = SingleTokenService {
            accepted: "good-token",
            subject,
            failure,
        };
        (IdentityResolver::new(Arc::new(service)), subject)
    }

    #[rstest]
    fn required_accepts_a_valid_token() {
        let (resolver, subject) = resolver(TokenError::Invalid);
        let resolved = resolver.resolve_required(Some("good-token")).expect("valid");
        assert_eq!(resolved, subject);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("bad-token"))]
    fn required_rejects_missing_or_invalid(#[case] token: Option<&str>) {
        let (resolver, _) = resolver(TokenError::Invalid);
        let err = resolver.resolve_required(token).expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn required_reports_expiry_distinctly() {
        let (resolver, _) = resolver(TokenError::Expired);
        let err = resolver
            .resolve_required(Some("stale-token"))
            .expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Token has expired");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("bad-token"))]
    fn optional_swallows_missing_and_invalid(#[case] token: Option<&str>) {
        let (resolver, _) = resolver(TokenError::Invalid);
        assert_eq!(resolver.resolve_optional(token), None);
    }

    #[rstest]
    fn optional_resolves_a_valid_token() {
        let (resolver, subject) = resolver(TokenError::Invalid);
        assert_eq!(resolver.resolve_optional(Some("good-token")), Some(subject));
    }
}
