//! Post lifecycle and access control engine.
//!
//! This service owns the visibility and ownership rules: published posts are
//! public, drafts are visible only to their owner, and every owner-gated
//! mutation deliberately reports "not found" whether the post is missing or
//! merely owned by someone else, so probing cannot reveal which.
//!
//! Reads are the exception: a genuinely absent post is distinguished (404)
//! from a private one (403), because a published post's existence is public
//! anyway and a draft's owner needs the difference. Do not unify the two
//! behaviours.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use super::error::Error;
use super::ports::{
    PostCommand, PostQuery, PostRepository, PostStoreError, PostUpdate, UserRepository,
    UserStoreError,
};
use super::post::{Post, PostId, PostPatch, PostStatus, PostSummary, PostView};
use super::user::UserId;

/// Fallback author name when the owner record is missing.
const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Access-control engine over the post and user stores.
#[derive(Clone)]
pub struct PostAccessService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl PostAccessService {
    /// Create the engine over its stores and a clock for mutation
    /// timestamps.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            users,
            clock,
        }
    }

    /// The single signal for failed owner-gated mutations. Missing post and
    /// foreign post are indistinguishable on purpose.
    fn not_found_or_forbidden() -> Error {
        Error::not_found("Post not found or unauthorized")
    }

    async fn author_display(&self, owner: &UserId) -> Result<(String, String), Error> {
        let author = self
            .users
            .find_by_id(owner)
            .await
            .map_err(map_user_store_error)?;
        Ok(author.map_or_else(
            || (ANONYMOUS_AUTHOR.to_owned(), String::new()),
            |user| {
                (
                    user.display_name().to_owned(),
                    user.email.as_str().to_owned(),
                )
            },
        ))
    }
}

fn map_post_store_error(error: PostStoreError) -> Error {
    Error::internal(error.to_string())
}

fn map_user_store_error(error: UserStoreError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl PostCommand for PostAccessService {
    async fn create_draft(&self, owner: &UserId) -> Result<PostId, Error> {
        let post = Post::new_draft(*owner, self.clock.utc());
        self.posts
            .insert(&post)
            .await
            .map_err(map_post_store_error)?;
        debug!(post_id = %post.id, owner = %owner, "draft created");
        Ok(post.id)
    }

    async fn update_post(
        &self,
        id: &PostId,
        owner: &UserId,
        patch: PostPatch,
    ) -> Result<(), Error> {
        let update = PostUpdate::from_patch(patch, self.clock.utc());
        let matched = self
            .posts
            .update_owned(id, owner, &update)
            .await
            .map_err(map_post_store_error)?;
        if !matched {
            return Err(Self::not_found_or_forbidden());
        }
        debug!(post_id = %id, "post updated");
        Ok(())
    }

    async fn publish_post(&self, id: &PostId, owner: &UserId) -> Result<(), Error> {
        // Unconditional set: re-publishing an already published post succeeds
        // and only refreshes updated_at.
        let update = PostUpdate {
            title: None,
            content: None,
            status: Some(PostStatus::Published),
            updated_at: self.clock.utc(),
        };
        let matched = self
            .posts
            .update_owned(id, owner, &update)
            .await
            .map_err(map_post_store_error)?;
        if !matched {
            return Err(Self::not_found_or_forbidden());
        }
        debug!(post_id = %id, "post published");
        Ok(())
    }

    async fn delete_post(&self, id: &PostId, owner: &UserId) -> Result<(), Error> {
        // Deletion ignores status: drafts and published posts alike go, and
        // permanently.
        let matched = self
            .posts
            .delete_owned(id, owner)
            .await
            .map_err(map_post_store_error)?;
        if !matched {
            return Err(Self::not_found_or_forbidden());
        }
        debug!(post_id = %id, "post deleted");
        Ok(())
    }
}

#[async_trait]
impl PostQuery for PostAccessService {
    async fn read_post(
        &self,
        id: &PostId,
        viewer: Option<&UserId>,
    ) -> Result<PostView, Error> {
        let post = self
            .posts
            .find_by_id(id)
            .await
            .map_err(map_post_store_error)?
            .ok_or_else(|| Error::not_found("Post not found"))?;

        let is_owner = viewer.is_some_and(|viewer_id| *viewer_id == post.user_id);
        let is_published = post.status == PostStatus::Published;
        if !is_published && !is_owner {
            return Err(Error::forbidden("This document is private."));
        }

        let (author_name, author_email) = self.author_display(&post.user_id).await?;
        Ok(PostView {
            id: post.id,
            title: post.title,
            content: post.content,
            status: post.status,
            is_owner,
            author_name,
            author_email,
            updated_at: post.updated_at,
        })
    }

    async fn list_own_posts(&self, owner: &UserId) -> Result<Vec<PostSummary>, Error> {
        // Ownership already implies visibility; no private/public check here.
        let posts = self
            .posts
            .list_by_owner(owner)
            .await
            .map_err(map_post_store_error)?;
        Ok(posts.into_iter().map(PostSummary::from).collect())
    }
}
