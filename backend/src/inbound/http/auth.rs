//! Bearer-token extraction helpers used by HTTP handlers.
//!
//! Handlers stay focused on request/response mapping; the identity decision
//! itself lives in the domain resolver.

use actix_web::HttpRequest;
use actix_web::http::header;

use crate::domain::{IdentityResolver, UserId};

use super::ApiResult;

/// Pull the bearer token out of the `Authorization` header, if present and
/// well-formed. The scheme comparison is case-insensitive.
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let header = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the request's identity, failing when it is missing or invalid.
pub(crate) fn require_identity(
    req: &HttpRequest,
    identity: &IdentityResolver,
) -> ApiResult<UserId> {
    identity.resolve_required(bearer_token(req))
}

/// Resolve the request's identity when possible; guests resolve to `None`.
pub(crate) fn optional_identity(
    req: &HttpRequest,
    identity: &IdentityResolver,
) -> Option<UserId> {
    identity.resolve_optional(bearer_token(req))
}
