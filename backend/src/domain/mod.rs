//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define the strongly typed entities and the post
//! visibility/ownership rules consumed by the API and persistence layers.
//! Everything here is transport agnostic; inbound adapters translate to
//! HTTP, outbound adapters implement the ports.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod identity;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod text_assist;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{AuthSession, CredentialValidationError, LoginCredentials, SignupCredentials};
pub use self::error::{Error, ErrorCode};
pub use self::identity::IdentityResolver;
pub use self::post::{
    DEFAULT_TITLE, Post, PostContent, PostContentError, PostId, PostIdError, PostPatch,
    PostStatus, PostStatusError, PostSummary, PostView,
};
pub use self::post_service::PostAccessService;
pub use self::text_assist::{GenerateAction, GenerateActionError, TextAssistService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, User, UserId, UserValidationError};

/// Convenient result alias for code returning domain errors.
pub type ApiResult<T> = Result<T, Error>;
