//! Shared fixtures for handler and integration tests.
//!
//! Builds fully wired HTTP state over the in-memory adapters, plus an Actix
//! app mirroring the production route table. Compiled for the crate's own
//! tests and, behind the `test-support` feature, for integration tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{StoreHealth, TextGenerator, UnconfiguredTextGenerator};
use crate::domain::{
    AccountService, IdentityResolver, PostAccessService, SignupCredentials, TextAssistService,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{api_scope, health};
use crate::middleware::Trace;
use crate::outbound::persistence::{
    MemoryPostRepository, MemoryStoreHealth, MemoryUserRepository,
};
use crate::outbound::security::{BcryptPasswordHasher, JwtTokenService};

/// Signing secret used by every test token service.
pub const TEST_TOKEN_SECRET: &[u8] = b"test-only-token-secret";

/// Password used by [`signup_token`].
pub const TEST_PASSWORD: &str = "hunter2";

/// Fully wired state over in-memory stores and an unconfigured generator.
pub fn memory_state() -> HttpState {
    memory_state_with_generator(Arc::new(UnconfiguredTextGenerator))
}

/// Fully wired state with a caller-supplied text generator.
pub fn memory_state_with_generator(generator: Arc<dyn TextGenerator>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(MemoryUserRepository::default());
    let posts = Arc::new(MemoryPostRepository::default());
    let tokens = Arc::new(JwtTokenService::new(
        TEST_TOKEN_SECRET,
        chrono::Duration::days(7),
        clock.clone(),
    ));
    let hasher = Arc::new(BcryptPasswordHasher::fast_for_tests());
    let post_service = Arc::new(PostAccessService::new(
        posts,
        users.clone(),
        clock.clone(),
    ));

    HttpState {
        auth: Arc::new(AccountService::new(
            users,
            hasher,
            tokens.clone(),
            clock,
        )),
        post_command: post_service.clone(),
        post_query: post_service,
        assist: Arc::new(TextAssistService::new(generator)),
        store_health: Arc::new(MemoryStoreHealth),
        identity: IdentityResolver::new(tokens),
    }
}

/// Fully wired state with a caller-supplied store health probe.
pub fn memory_state_with_store_health(store_health: Arc<dyn StoreHealth>) -> HttpState {
    HttpState {
        store_health,
        ..memory_state()
    }
}

/// Register an account directly against the state and return its bearer
/// token.
///
/// # Panics
/// Panics when signup fails; fixtures treat that as a broken test setup.
pub async fn signup_token(state: &HttpState, email: &str) -> String {
    let credentials =
        SignupCredentials::try_from_parts(email, TEST_PASSWORD).expect("valid test credentials");
    state
        .auth
        .signup(credentials)
        .await
        .expect("test signup succeeds")
        .access_token
}

/// Actix app mirroring the production route table over the given state.
pub fn build_test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .service(api_scope())
        .service(health::health)
}
