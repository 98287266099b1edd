//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::IdentityResolver;
use crate::domain::ports::{AuthUseCase, PostCommand, PostQuery, StoreHealth, TextAssist};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup and login use-cases.
    pub auth: Arc<dyn AuthUseCase>,
    /// Owner-gated post mutations.
    pub post_command: Arc<dyn PostCommand>,
    /// Visibility-checked post reads.
    pub post_query: Arc<dyn PostQuery>,
    /// AI text transformations.
    pub assist: Arc<dyn TextAssist>,
    /// Store connectivity probe for the health endpoint.
    pub store_health: Arc<dyn StoreHealth>,
    /// Bearer-token identity resolution.
    pub identity: IdentityResolver,
}
