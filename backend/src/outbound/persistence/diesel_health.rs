//! Connectivity probe backed by the PostgreSQL pool.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostStoreError, StoreHealth};

use super::diesel_post_repository::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

/// `StoreHealth` implementation running a trivial round-trip query.
#[derive(Clone)]
pub struct DieselStoreHealth {
    pool: DbPool,
}

impl DieselStoreHealth {
    /// Create a probe over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for DieselStoreHealth {
    async fn ping(&self) -> Result<(), PostStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
