//! Document store adapters.
//!
//! PostgreSQL persistence via Diesel with async support through
//! `diesel-async` and `bb8` pooling, plus in-memory equivalents for tests
//! and database-less startup. Adapters are thin translators between rows and
//! domain types; no business logic lives here.

mod diesel_health;
mod diesel_post_repository;
mod diesel_user_repository;
mod memory;
mod models;
mod pool;
mod schema;

pub use diesel_health::DieselStoreHealth;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use memory::{MemoryPostRepository, MemoryStoreHealth, MemoryUserRepository};
pub use pool::{DbPool, PoolConfig, PoolError};
