//! In-memory repository implementations.
//!
//! Functional equivalents of the Diesel adapters, used by unit and
//! integration tests and as the fallback when the server starts without a
//! database URL. Records live in insertion order, which is the "storage
//! natural order" the listing operation promises nothing beyond.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{
    PostRepository, PostStoreError, PostUpdate, StoreHealth, UserRepository, UserStoreError,
};
use crate::domain::{Post, PostId, User, UserId};

/// In-memory `PostRepository`.
#[derive(Default)]
pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostStoreError> {
        self.posts
            .write()
            .map_err(|_| PostStoreError::connection("post store lock poisoned"))?
            .push(post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostStoreError> {
        let posts = self
            .posts
            .read()
            .map_err(|_| PostStoreError::connection("post store lock poisoned"))?;
        Ok(posts.iter().find(|post| post.id == *id).cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Post>, PostStoreError> {
        let posts = self
            .posts
            .read()
            .map_err(|_| PostStoreError::connection("post store lock poisoned"))?;
        Ok(posts
            .iter()
            .filter(|post| post.user_id == *owner)
            .cloned()
            .collect())
    }

    async fn update_owned(
        &self,
        id: &PostId,
        owner: &UserId,
        update: &PostUpdate,
    ) -> Result<bool, PostStoreError> {
        let mut posts = self
            .posts
            .write()
            .map_err(|_| PostStoreError::connection("post store lock poisoned"))?;
        let Some(post) = posts
            .iter_mut()
            .find(|post| post.id == *id && post.user_id == *owner)
        else {
            return Ok(false);
        };
        if let Some(title) = &update.title {
            post.title.clone_from(title);
        }
        if let Some(content) = &update.content {
            post.content = content.clone();
        }
        if let Some(status) = update.status {
            post.status = status;
        }
        post.updated_at = update.updated_at;
        Ok(true)
    }

    async fn delete_owned(&self, id: &PostId, owner: &UserId) -> Result<bool, PostStoreError> {
        let mut posts = self
            .posts
            .write()
            .map_err(|_| PostStoreError::connection("post store lock poisoned"))?;
        let before = posts.len();
        posts.retain(|post| !(post.id == *id && post.user_id == *owner));
        Ok(posts.len() < before)
    }
}

/// In-memory `UserRepository` enforcing the unique-email rule.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserStoreError::connection("user store lock poisoned"))?;
        if users.iter().any(|known| known.email == user.email) {
            return Err(UserStoreError::duplicate_email(user.email.as_str()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserStoreError::connection("user store lock poisoned"))?;
        Ok(users
            .iter()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserStoreError::connection("user store lock poisoned"))?;
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }
}

/// Always-healthy probe for the in-memory stores.
pub struct MemoryStoreHealth;

#[async_trait]
impl StoreHealth for MemoryStoreHealth {
    async fn ping(&self) -> Result<(), PostStoreError> {
        Ok(())
    }
}
