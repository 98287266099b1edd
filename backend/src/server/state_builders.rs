//! Builders wiring the HTTP state from configured adapters.
//!
//! Database-backed repositories are used when a pool is available, the
//! in-memory stores otherwise; the same applies to the text generator.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use backend::domain::ports::{
    PostRepository, StoreHealth, TextGenerator, UnconfiguredTextGenerator, UserRepository,
};
use backend::domain::{
    AccountService, IdentityResolver, PostAccessService, TextAssistService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::assist::GeminiTextGenerator;
use backend::outbound::persistence::{
    DieselPostRepository, DieselStoreHealth, DieselUserRepository, MemoryPostRepository,
    MemoryStoreHealth, MemoryUserRepository,
};
use backend::outbound::security::{BcryptPasswordHasher, JwtTokenService};

use super::ServerConfig;

type Stores = (
    Arc<dyn PostRepository>,
    Arc<dyn UserRepository>,
    Arc<dyn StoreHealth>,
);

fn build_stores(config: &ServerConfig) -> Stores {
    match &config.db_pool {
        Some(pool) => (
            Arc::new(DieselPostRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselStoreHealth::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; falling back to in-memory stores");
            (
                Arc::new(MemoryPostRepository::default()),
                Arc::new(MemoryUserRepository::default()),
                Arc::new(MemoryStoreHealth),
            )
        }
    }
}

fn build_generator(config: &ServerConfig) -> std::io::Result<Arc<dyn TextGenerator>> {
    match &config.gemini {
        Some(settings) => {
            let generator = GeminiTextGenerator::new(settings.clone()).map_err(|err| {
                std::io::Error::other(format!("failed to build generation client: {err}"))
            })?;
            Ok(Arc::new(generator))
        }
        None => {
            warn!("no generation provider configured; AI endpoints will report failures");
            Ok(Arc::new(UnconfiguredTextGenerator))
        }
    }
}

/// Assemble the HTTP handler state from the server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (posts, users, store_health) = build_stores(config);
    let generator = build_generator(config)?;

    let tokens = Arc::new(JwtTokenService::new(
        &config.token_secret,
        config.token_ttl,
        clock.clone(),
    ));
    let hasher = Arc::new(BcryptPasswordHasher::default());
    let post_service = Arc::new(PostAccessService::new(posts, users.clone(), clock.clone()));

    Ok(web::Data::new(HttpState {
        auth: Arc::new(AccountService::new(users, hasher, tokens.clone(), clock)),
        post_command: post_service.clone(),
        post_query: post_service,
        assist: Arc::new(TextAssistService::new(generator)),
        store_health,
        identity: IdentityResolver::new(tokens),
    }))
}
