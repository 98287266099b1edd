//! Document-editing backend library.
//!
//! Users authenticate with bearer tokens, draft rich-text documents,
//! publish them for public viewing, and can request AI-assisted text
//! transformations. Modules follow a hexagonal split: `domain` holds the
//! entities and visibility rules, `inbound` the HTTP adapter, `outbound`
//! the store, credential, and provider adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
