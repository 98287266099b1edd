//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod ai;
pub mod auth;
pub mod error;
pub mod health;
pub mod posts;
pub mod state;
pub mod validation;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// The `/api` scope with every REST endpoint registered.
///
/// Shared between the server factory and the test harness so both wire the
/// same routes.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(accounts::signup)
        .service(accounts::login)
        .service(posts::create_draft)
        .service(posts::list_posts)
        .service(posts::read_post)
        .service(posts::update_post)
        .service(posts::publish_post)
        .service(posts::delete_post)
        .service(ai::fix_grammar)
        .service(ai::generate)
}
