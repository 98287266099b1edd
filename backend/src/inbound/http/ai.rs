//! AI text-assist API handlers.
//!
//! ```text
//! POST /api/ai/fix-grammar {"text":"…"}
//! POST /api/ai/generate    {"text":"…","action":"summarize|continue|title"}
//! ```
//!
//! Both endpoints are open: the transformations carry no per-user state and
//! the original surface never gated them.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;

use super::ApiResult;
use super::state::HttpState;
use super::validation::parse_generate_action;

/// Grammar-fix request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FixGrammarRequest {
    /// Markdown text to clean up.
    pub text: String,
}

/// Grammar-fix response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FixGrammarResponse {
    /// The improved Markdown text.
    pub improved_text: String,
}

/// Generate request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GenerateRequest {
    /// Input text for the action.
    pub text: String,
    /// One of `summarize`, `continue`, `title`.
    pub action: String,
}

/// Generate response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    /// The provider's trimmed output.
    pub generated_text: String,
}

/// Fix grammar and clarity while preserving Markdown formatting.
#[utoipa::path(
    post,
    path = "/api/ai/fix-grammar",
    request_body = FixGrammarRequest,
    responses(
        (status = 200, description = "Improved text", body = FixGrammarResponse),
        (status = 500, description = "Provider failure", body = Error)
    ),
    tags = ["ai"],
    operation_id = "fixGrammar",
    security([])
)]
#[post("/ai/fix-grammar")]
pub async fn fix_grammar(
    state: web::Data<HttpState>,
    payload: web::Json<FixGrammarRequest>,
) -> ApiResult<web::Json<FixGrammarResponse>> {
    let improved_text = state.assist.fix_grammar(&payload.text).await?;
    Ok(web::Json(FixGrammarResponse { improved_text }))
}

/// Run one of the fixed generate actions over the supplied text.
#[utoipa::path(
    post,
    path = "/api/ai/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated text", body = GenerateResponse),
        (status = 400, description = "Unknown action", body = Error),
        (status = 500, description = "Provider failure", body = Error)
    ),
    tags = ["ai"],
    operation_id = "generateText",
    security([])
)]
#[post("/ai/generate")]
pub async fn generate(
    state: web::Data<HttpState>,
    payload: web::Json<GenerateRequest>,
) -> ApiResult<web::Json<GenerateResponse>> {
    let action = parse_generate_action(&payload.action)?;
    let generated_text = state.assist.generate(&payload.text, action).await?;
    Ok(web::Json(GenerateResponse { generated_text }))
}
