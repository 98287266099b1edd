//! PostgreSQL-backed `PostRepository` implementation using Diesel.
//!
//! The ownership predicate of the `*_owned` operations is pushed into the
//! SQL filter, so each mutation stays a single conditional statement and the
//! affected-row count doubles as the match report.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{PostRepository, PostStoreError, PostUpdate};
use crate::domain::{Post, PostContent, PostId, PostStatus, UserId};

use super::models::{NewPostRow, PostChangeset, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn map_pool_error(error: PoolError) -> PostStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PostStoreError::connection(message)
        }
    }
}

pub(crate) fn map_diesel_error(error: diesel::result::Error) -> PostStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PostStoreError::connection("database connection error")
        }
        _ => PostStoreError::query("database error"),
    }
}

fn row_to_post(row: PostRow) -> Result<Post, PostStoreError> {
    let status = match row.status.parse::<PostStatus>() {
        Ok(status) => status,
        Err(_) => {
            warn!(
                value = row.status,
                post_id = %row.id,
                "unrecognised status value, defaulting to DRAFT"
            );
            PostStatus::Draft
        }
    };
    let content = PostContent::new(row.content)
        .map_err(|err| PostStoreError::query(format!("stored content is malformed: {err}")))?;
    Ok(Post {
        id: PostId::from_uuid(row.id),
        title: row.title,
        content,
        status,
        user_id: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewPostRow {
            id: *post.id.as_uuid(),
            title: post.title.as_str(),
            content: post.content.as_value(),
            status: post.status.as_str(),
            user_id: *post.user_id.as_uuid(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        };
        diesel::insert_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = posts::table
            .find(id.as_uuid())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_post).transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Post>, PostStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostRow> = posts::table
            .filter(posts::user_id.eq(owner.as_uuid()))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_post).collect()
    }

    async fn update_owned(
        &self,
        id: &PostId,
        owner: &UserId,
        update: &PostUpdate,
    ) -> Result<bool, PostStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = PostChangeset {
            title: update.title.as_deref(),
            content: update.content.as_ref().map(PostContent::as_value),
            status: update.status.map(PostStatus::as_str),
            updated_at: update.updated_at,
        };
        let affected = diesel::update(
            posts::table
                .filter(posts::id.eq(id.as_uuid()))
                .filter(posts::user_id.eq(owner.as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete_owned(&self, id: &PostId, owner: &UserId) -> Result<bool, PostStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(
            posts::table
                .filter(posts::id.eq(id.as_uuid()))
                .filter(posts::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
