//! Post aggregate: the editable, publishable document.
//!
//! A post is owned by exactly one user for its whole lifetime and carries a
//! structured rich-text tree as content. Visibility is governed by the
//! draft/published status: drafts are private to their owner, published posts
//! are public.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use super::user::UserId;

/// Title given to freshly created drafts.
pub const DEFAULT_TITLE: &str = "Untitled Draft";

/// Opaque post identifier with a validity predicate (UUID syntax).
///
/// Malformed identifiers are rejected at the HTTP boundary before any
/// storage lookup happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

/// Validation error raised by [`PostId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("post id must be a valid UUID")]
pub struct PostIdError;

impl PostId {
    /// Validate and construct a [`PostId`] from string input.
    pub fn parse(raw: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(raw).map(Self).map_err(|_| PostIdError)
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

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStatus {
    /// Visible only to the owner.
    #[serde(rename = "DRAFT")]
    Draft,
    /// Publicly readable by anyone, including anonymous viewers.
    #[serde(rename = "PUBLISHED")]
    Published,
}

/// Parse error raised by [`PostStatus::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be DRAFT or PUBLISHED")]
pub struct PostStatusError;

impl PostStatus {
    /// Wire representation of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostStatus {
    type Err = PostStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            _ => Err(PostStatusError),
        }
    }
}

/// Structured rich-text document tree.
///
/// ## Invariants
/// - The value is a JSON object holding a `root` object.
/// - The root node's `type` is `"root"` and its `children` is an array.
///
/// A freshly created draft's root holds exactly one empty paragraph child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct PostContent(Value);

/// Validation errors raised by [`PostContent::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostContentError {
    /// The value is not a JSON object with a `root` member.
    #[error("content must be an object with a root node")]
    MissingRoot,
    /// The root node is not typed `"root"`.
    #[error("content root node must have type \"root\"")]
    WrongRootType,
    /// The root node has no children array.
    #[error("content root node must hold a children array")]
    MissingChildren,
}

impl PostContent {
    /// Validate and wrap a document tree.
    pub fn new(value: Value) -> Result<Self, PostContentError> {
        let root = value
            .get("root")
            .and_then(Value::as_object)
            .ok_or(PostContentError::MissingRoot)?;
        if root.get("type").and_then(Value::as_str) != Some("root") {
            return Err(PostContentError::WrongRootType);
        }
        if !root.get("children").is_some_and(Value::is_array) {
            return Err(PostContentError::MissingChildren);
        }
        Ok(Self(value))
    }

    /// The initial tree given to a fresh draft: a root with one empty
    /// paragraph child.
    #[must_use]
    pub fn initial() -> Self {
        Self(json!({
            "root": {
                "children": [
                    {
                        "children": [],
                        "direction": null,
                        "format": "",
                        "indent": 0,
                        "type": "paragraph",
                        "version": 1
                    }
                ],
                "direction": null,
                "format": "",
                "indent": 0,
                "type": "root",
                "version": 1
            }
        }))
    }

    /// Borrow the underlying JSON tree.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the wrapper and return the JSON tree.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<PostContent> for Value {
    fn from(value: PostContent) -> Self {
        value.0
    }
}

impl TryFrom<Value> for PostContent {
    type Error = PostContentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored post record.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Server-generated identifier.
    pub id: PostId,
    /// Document title.
    pub title: String,
    /// Rich-text tree.
    pub content: PostContent,
    /// Draft/published visibility state.
    pub status: PostStatus,
    /// Owner, fixed at creation and never reassigned.
    pub user_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation, never on reads.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Assemble a fresh draft owned by `owner` with the default title and
    /// initial content tree.
    #[must_use]
    pub fn new_draft(owner: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: PostId::random(),
            title: DEFAULT_TITLE.to_owned(),
            content: PostContent::initial(),
            status: PostStatus::Draft,
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update over a post's mutable fields.
///
/// Fields left as `None` are untouched (merge semantics, not replacement).
/// `status` is deliberately accepted here as well as via the dedicated
/// publish operation; see DESIGN.md for the recorded looseness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    /// New title, when present.
    pub title: Option<String>,
    /// Replacement content tree, when present.
    pub content: Option<PostContent>,
    /// New status, when present.
    pub status: Option<PostStatus>,
}

impl PostPatch {
    /// True when no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.status.is_none()
    }
}

/// Full read view of a post, shaped for presentation.
///
/// Includes the `is_owner` flag so callers can decide whether to offer edit
/// affordances, plus denormalized author display info.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    /// Post identifier.
    pub id: PostId,
    /// Document title.
    pub title: String,
    /// Rich-text tree.
    pub content: PostContent,
    /// Draft/published visibility state.
    pub status: PostStatus,
    /// True iff the viewer is the post's owner.
    pub is_owner: bool,
    /// Author display name: the owner email's local part, or "Anonymous"
    /// when the owner record is missing.
    pub author_name: String,
    /// Author email, empty when the owner record is missing.
    pub author_email: String,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Summary view used when listing a user's own posts.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    /// Post identifier.
    pub id: PostId,
    /// Document title.
    pub title: String,
    /// Rich-text tree.
    pub content: PostContent,
    /// Draft/published visibility state.
    pub status: PostStatus,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            status: post.status,
            updated_at: post.updated_at,
        }
    }
}
