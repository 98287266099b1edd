//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! HTTP endpoint from the inbound layer, the request/response schemas, and
//! the bearer-token security scheme. Swagger UI serves the document in debug
//! builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::accounts::{LoginForm, SignupRequest, TokenEnvelope};
use crate::inbound::http::ai::{
    FixGrammarRequest, FixGrammarResponse, GenerateRequest, GenerateResponse,
};
use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::posts::{
    CreateDraftResponse, MessageResponse, PostSummaryResponse, PostViewResponse,
    PublishResponse, UpdatePostRequest,
};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token issued by POST /api/auth/signup or /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Document backend API",
        description = "HTTP interface for draft editing, publishing, and AI text assistance."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::posts::create_draft,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::read_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::publish_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::ai::fix_grammar,
        crate::inbound::http::ai::generate,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        Error,
        ErrorCode,
        SignupRequest,
        LoginForm,
        TokenEnvelope,
        CreateDraftResponse,
        UpdatePostRequest,
        MessageResponse,
        PublishResponse,
        PostViewResponse,
        PostSummaryResponse,
        FixGrammarRequest,
        FixGrammarResponse,
        GenerateRequest,
        GenerateResponse,
        HealthResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn document_contains_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/auth/signup",
            "/api/auth/login",
            "/api/posts",
            "/api/posts/{post_id}",
            "/api/posts/{post_id}/publish",
            "/api/ai/fix-grammar",
            "/api/ai/generate",
            "/health",
        ] {
            assert!(
                paths.iter().any(|path| *path == expected),
                "missing path {expected}"
            );
        }
    }
}
