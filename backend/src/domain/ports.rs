//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to talk to infrastructure
//! (document store, password hashing, token signing, text generation). Each
//! trait exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`. Driving ports
//! are the use-case surface consumed by inbound adapters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::auth::{AuthSession, LoginCredentials, SignupCredentials};
use super::error::Error;
use super::post::{Post, PostContent, PostId, PostPatch, PostStatus, PostSummary, PostView};
use super::text_assist::GenerateAction;
use super::user::{User, UserId};

// ---------------------------------------------------------------------------
// Driven ports: document store
// ---------------------------------------------------------------------------

/// Errors surfaced by the post store adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostStoreError {
    /// Store connectivity failures (pool checkout, closed connections).
    #[error("post store connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("post store query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl PostStoreError {
    /// Helper for connection-oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the user store adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// Store connectivity failures.
    #[error("user store connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The email is already registered.
    #[error("email already registered: {email}")]
    DuplicateEmail {
        /// The conflicting address.
        email: String,
    },
}

impl UserStoreError {
    /// Helper for connection-oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-email conflicts.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Field changes applied by a conditional owned-post update.
///
/// `None` fields are left untouched; `updated_at` is always written. Built by
/// the access-control engine, never by adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct PostUpdate {
    /// New title, when present.
    pub title: Option<String>,
    /// Replacement content tree, when present.
    pub content: Option<PostContent>,
    /// New status, when present.
    pub status: Option<PostStatus>,
    /// Refreshed mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    /// Build an update record from a patch and a timestamp.
    #[must_use]
    pub fn from_patch(patch: PostPatch, updated_at: DateTime<Utc>) -> Self {
        Self {
            title: patch.title,
            content: patch.content,
            status: patch.status,
            updated_at,
        }
    }
}

/// Keyed access to stored posts.
///
/// The `*_owned` operations are single conditional read-modify-write calls:
/// the ownership predicate is part of the store operation itself, and the
/// boolean result reports whether any record matched both id and owner. This
/// keeps the engine free of check-then-act races at this layer; concurrent
/// writers to the same id resolve last-writer-wins.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a freshly created post.
    async fn insert(&self, post: &Post) -> Result<(), PostStoreError>;

    /// Fetch a post by id regardless of owner.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostStoreError>;

    /// Every post owned by `owner`, in storage order.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Post>, PostStoreError>;

    /// Apply `update` iff a post matches both `id` and `owner`; report
    /// whether one did.
    async fn update_owned(
        &self,
        id: &PostId,
        owner: &UserId,
        update: &PostUpdate,
    ) -> Result<bool, PostStoreError>;

    /// Delete iff a post matches both `id` and `owner`; report whether one
    /// did.
    async fn delete_owned(&self, id: &PostId, owner: &UserId) -> Result<bool, PostStoreError>;
}

/// Keyed access to stored user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account; fails with [`UserStoreError::DuplicateEmail`]
    /// when the address is taken.
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// Case-sensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Lookup by id, used for author denormalization on reads.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;
}

/// Connectivity probe for the health endpoint.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Succeeds when the backing store answers a trivial round-trip.
    async fn ping(&self) -> Result<(), PostStoreError>;
}

// ---------------------------------------------------------------------------
// Driven ports: credentials and tokens
// ---------------------------------------------------------------------------

/// Errors surfaced by the password hashing adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hash computation failed.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Verification could not run (e.g. the stored hash is malformed).
    #[error("password verification failed: {message}")]
    Verify {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl PasswordHashError {
    /// Helper for hash-computation failures.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Helper for verification failures.
    pub fn verify(message: impl Into<String>) -> Self {
        Self::Verify {
            message: message.into(),
        }
    }
}

/// One-way password hashing and verification. Pure and stateless.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into an opaque storable string.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}

/// Errors surfaced by the token adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token is malformed, carries a bad signature, or names an invalid
    /// subject.
    #[error("token is invalid")]
    Invalid,
    /// The token's expiry has passed.
    #[error("token has expired")]
    Expired,
    /// Token issuance failed.
    #[error("token issuance failed: {message}")]
    Issue {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl TokenError {
    /// Helper for issuance failures.
    pub fn issue(message: impl Into<String>) -> Self {
        Self::Issue {
            message: message.into(),
        }
    }
}

/// Bearer-token issuance and verification. Pure and stateless; expiry is
/// fixed at issuance with no refresh mechanism.
pub trait TokenService: Send + Sync {
    /// Issue a signed token whose subject is `user`.
    fn issue(&self, user: &UserId) -> Result<String, TokenError>;

    /// Verify signature and expiry, returning the subject.
    fn verify(&self, raw: &str) -> Result<UserId, TokenError>;
}

// ---------------------------------------------------------------------------
// Driven ports: text generation
// ---------------------------------------------------------------------------

/// Errors surfaced by the text generation adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextGenerationError {
    /// The provider could not be reached.
    #[error("text generation transport failed: {message}")]
    Transport {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The provider answered with a failure.
    #[error("text generation provider failed: {message}")]
    Provider {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The provider's response could not be decoded.
    #[error("text generation response could not be decoded: {message}")]
    Decode {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl TextGenerationError {
    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for provider-reported failures.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Single-shot prompt completion against an external model.
///
/// No retries and no caching; a failure surfaces to the caller unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one prompt and return the provider's trimmed text.
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError>;
}

/// Placeholder generator used when no provider is configured. Every call
/// fails with a provider error so the HTTP surface stays honest about the
/// missing configuration.
pub struct UnconfiguredTextGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, TextGenerationError> {
        Err(TextGenerationError::provider(
            "text generation is not configured",
        ))
    }
}

// ---------------------------------------------------------------------------
// Driving ports: use-cases consumed by inbound adapters
// ---------------------------------------------------------------------------

/// Account signup and login.
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// Register a new account and issue its first token.
    async fn signup(&self, credentials: SignupCredentials) -> Result<AuthSession, Error>;

    /// Authenticate an existing account and issue a token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;
}

/// Owner-gated post mutations.
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Create a fresh draft owned by `owner`.
    async fn create_draft(&self, owner: &UserId) -> Result<PostId, Error>;

    /// Apply a partial update to an owned post.
    async fn update_post(
        &self,
        id: &PostId,
        owner: &UserId,
        patch: PostPatch,
    ) -> Result<(), Error>;

    /// Publish an owned post (idempotent).
    async fn publish_post(&self, id: &PostId, owner: &UserId) -> Result<(), Error>;

    /// Permanently delete an owned post regardless of status.
    async fn delete_post(&self, id: &PostId, owner: &UserId) -> Result<(), Error>;
}

/// Post reads, subject to the visibility rules.
#[async_trait]
pub trait PostQuery: Send + Sync {
    /// Read one post as `viewer` (possibly anonymous).
    async fn read_post(
        &self,
        id: &PostId,
        viewer: Option<&UserId>,
    ) -> Result<PostView, Error>;

    /// Every post owned by `owner`, as summaries.
    async fn list_own_posts(&self, owner: &UserId) -> Result<Vec<PostSummary>, Error>;
}

/// AI-assisted text transformations.
#[async_trait]
pub trait TextAssist: Send + Sync {
    /// Grammar/clarity pass that preserves Markdown formatting.
    async fn fix_grammar(&self, text: &str) -> Result<String, Error>;

    /// Run one of the fixed generate actions over `text`.
    async fn generate(&self, text: &str, action: GenerateAction) -> Result<String, Error>;
}

#[cfg(test)]
mod port_tests {
    //! Smoke coverage for port error helpers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn error_helpers_carry_messages() {
        assert!(
            PostStoreError::connection("pool exhausted")
                .to_string()
                .contains("pool exhausted")
        );
        assert!(
            UserStoreError::duplicate_email("ada@example.com")
                .to_string()
                .contains("ada@example.com")
        );
        assert!(
            TextGenerationError::decode("bad json")
                .to_string()
                .contains("bad json")
        );
    }

    #[tokio::test]
    async fn unconfigured_generator_always_fails() {
        let err = UnconfiguredTextGenerator
            .generate("hello")
            .await
            .expect_err("must fail");
        assert!(matches!(err, TextGenerationError::Provider { .. }));
    }
}
