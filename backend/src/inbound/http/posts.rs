//! Post API handlers.
//!
//! ```text
//! POST   /api/posts                  create a draft
//! GET    /api/posts                  list own posts
//! GET    /api/posts/{id}             read one post (auth optional)
//! PATCH  /api/posts/{id}             partial update
//! POST   /api/posts/{id}/publish     publish
//! DELETE /api/posts/{id}             delete
//! ```
//!
//! Reading a single post is the only endpoint reachable without a token;
//! everything else resolves a required identity before touching storage.

use actix_web::{HttpRequest, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, PostPatch, PostSummary, PostView};

use super::ApiResult;
use super::auth::{optional_identity, require_identity};
use super::state::HttpState;
use super::validation::{parse_content, parse_post_id, parse_status};

/// Response for draft creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDraftResponse {
    /// Identifier of the new draft.
    pub id: String,
    /// Human-readable confirmation.
    pub message: String,
}

/// Partial update body; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdatePostRequest {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement content tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub content: Option<Value>,
    /// New status (`DRAFT` or `PUBLISHED`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Plain confirmation envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Response for the publish endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublishResponse {
    /// Always `PUBLISHED`.
    pub status: String,
}

/// Full post view with ownership flag and author info.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostViewResponse {
    /// Post identifier.
    pub id: String,
    /// Document title.
    pub title: String,
    /// Rich-text tree.
    #[schema(value_type = Object)]
    pub content: Value,
    /// `DRAFT` or `PUBLISHED`.
    pub status: String,
    /// True iff the viewer owns the post.
    pub is_owner: bool,
    /// Author display name, `Anonymous` when the owner record is missing.
    pub author_name: String,
    /// Author email, empty when the owner record is missing.
    pub author_email: String,
    /// Last mutation timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<PostView> for PostViewResponse {
    fn from(view: PostView) -> Self {
        Self {
            id: view.id.to_string(),
            title: view.title,
            content: view.content.into_value(),
            status: view.status.to_string(),
            is_owner: view.is_owner,
            author_name: view.author_name,
            author_email: view.author_email,
            updated_at: view.updated_at.to_rfc3339(),
        }
    }
}

/// Summary entry for the own-posts listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostSummaryResponse {
    /// Post identifier.
    pub id: String,
    /// Document title.
    pub title: String,
    /// Rich-text tree.
    #[schema(value_type = Object)]
    pub content: Value,
    /// `DRAFT` or `PUBLISHED`.
    pub status: String,
    /// Last mutation timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<PostSummary> for PostSummaryResponse {
    fn from(summary: PostSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
            content: summary.content.into_value(),
            status: summary.status.to_string(),
            updated_at: summary.updated_at.to_rfc3339(),
        }
    }
}

fn parse_patch(payload: UpdatePostRequest) -> Result<PostPatch, Error> {
    Ok(PostPatch {
        title: payload.title,
        content: payload.content.map(parse_content).transpose()?,
        status: payload.status.as_deref().map(parse_status).transpose()?,
    })
}

/// Create a fresh draft owned by the caller.
#[utoipa::path(
    post,
    path = "/api/posts",
    responses(
        (status = 200, description = "Draft created", body = CreateDraftResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createDraft"
)]
#[post("/posts")]
pub async fn create_draft(
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CreateDraftResponse>> {
    let owner = require_identity(&req, &state.identity)?;
    let id = state.post_command.create_draft(&owner).await?;
    Ok(web::Json(CreateDraftResponse {
        id: id.to_string(),
        message: "Draft created".to_owned(),
    }))
}

/// List every post owned by the caller.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "Own posts", body = [PostSummaryResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PostSummaryResponse>>> {
    let owner = require_identity(&req, &state.identity)?;
    let summaries = state.post_query.list_own_posts(&owner).await?;
    Ok(web::Json(
        summaries.into_iter().map(PostSummaryResponse::from).collect(),
    ))
}

/// Read one post; drafts are only visible to their owner.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post view", body = PostViewResponse),
        (status = 400, description = "Malformed post id", body = Error),
        (status = 403, description = "Private document", body = Error),
        (status = 404, description = "Post not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "readPost",
    security([])
)]
#[get("/posts/{post_id}")]
pub async fn read_post(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostViewResponse>> {
    let id = parse_post_id(&path.into_inner())?;
    let viewer = optional_identity(&req, &state.identity);
    let view = state.post_query.read_post(&id, viewer.as_ref()).await?;
    Ok(web::Json(view.into()))
}

/// Apply a partial update to an owned post.
#[utoipa::path(
    patch,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Malformed id or payload", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Post not found or not yours", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[patch("/posts/{post_id}")]
pub async fn update_post(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePostRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let owner = require_identity(&req, &state.identity)?;
    let id = parse_post_id(&path.into_inner())?;
    let patch = parse_patch(payload.into_inner())?;
    state.post_command.update_post(&id, &owner, patch).await?;
    Ok(web::Json(MessageResponse {
        message: "Updated successfully".to_owned(),
    }))
}

/// Publish an owned post; republishing succeeds and refreshes the
/// modification time.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/publish",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Published", body = PublishResponse),
        (status = 400, description = "Malformed post id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Post not found or not yours", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "publishPost"
)]
#[post("/posts/{post_id}/publish")]
pub async fn publish_post(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublishResponse>> {
    let owner = require_identity(&req, &state.identity)?;
    let id = parse_post_id(&path.into_inner())?;
    state.post_command.publish_post(&id, &owner).await?;
    Ok(web::Json(PublishResponse {
        status: "PUBLISHED".to_owned(),
    }))
}

/// Permanently delete an owned post, draft or published.
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Malformed post id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Post not found or not yours", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{post_id}")]
pub async fn delete_post(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let owner = require_identity(&req, &state.identity)?;
    let id = parse_post_id(&path.into_inner())?;
    state.post_command.delete_post(&id, &owner).await?;
    Ok(web::Json(MessageResponse {
        message: "Draft deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    //! Handler coverage against in-memory state.
    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::{test as actix_test, web};

    use super::*;
    use crate::test_support::{build_test_app, memory_state, signup_token};

    #[actix_web::test]
    async fn post_routes_require_a_token() {
        let app = actix_test::init_service(build_test_app(web::Data::new(memory_state()))).await;

        let create = actix_test::TestRequest::post().uri("/api/posts").to_request();
        let response = actix_test::call_service(&app, create).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let list = actix_test::TestRequest::get().uri("/api/posts").to_request();
        let response = actix_test::call_service(&app, list).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn garbage_tokens_are_rejected() {
        let app = actix_test::init_service(build_test_app(web::Data::new(memory_state()))).await;
        let create = actix_test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, "Bearer not.a.token"))
            .to_request();
        let response = actix_test::call_service(&app, create).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn malformed_ids_fail_before_storage() {
        let state = web::Data::new(memory_state());
        let app = actix_test::init_service(build_test_app(state.clone())).await;
        let token = signup_token(&state, "ada@example.com").await;

        let read = actix_test::TestRequest::get()
            .uri("/api/posts/not-a-uuid")
            .to_request();
        let response = actix_test::call_service(&app, read).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let patch = actix_test::TestRequest::patch()
            .uri("/api/posts/not-a-uuid")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .set_json(UpdatePostRequest::default())
            .to_request();
        let response = actix_test::call_service(&app, patch).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn create_then_read_round_trips() {
        let state = web::Data::new(memory_state());
        let app = actix_test::init_service(build_test_app(state.clone())).await;
        let token = signup_token(&state, "ada@example.com").await;

        let create = actix_test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let created: CreateDraftResponse =
            actix_test::call_and_read_body_json(&app, create).await;
        assert_eq!(created.message, "Draft created");

        let read = actix_test::TestRequest::get()
            .uri(&format!("/api/posts/{}", created.id))
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let view: PostViewResponse = actix_test::call_and_read_body_json(&app, read).await;
        assert_eq!(view.status, "DRAFT");
        assert_eq!(view.title, "Untitled Draft");
        assert!(view.is_owner);
        assert_eq!(view.author_name, "ada");
        assert_eq!(view.author_email, "ada@example.com");
    }

    #[actix_web::test]
    async fn rejects_malformed_content_trees() {
        let state = web::Data::new(memory_state());
        let app = actix_test::init_service(build_test_app(state.clone())).await;
        let token = signup_token(&state, "ada@example.com").await;

        let create = actix_test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let created: CreateDraftResponse =
            actix_test::call_and_read_body_json(&app, create).await;

        let patch = actix_test::TestRequest::patch()
            .uri(&format!("/api/posts/{}", created.id))
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .set_json(UpdatePostRequest {
                content: Some(serde_json::json!({ "root": "not-a-node" })),
                ..UpdatePostRequest::default()
            })
            .to_request();
        let response = actix_test::call_service(&app, patch).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn rejects_unknown_status_values() {
        let state = web::Data::new(memory_state());
        let app = actix_test::init_service(build_test_app(state.clone())).await;
        let token = signup_token(&state, "ada@example.com").await;

        let create = actix_test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let created: CreateDraftResponse =
            actix_test::call_and_read_body_json(&app, create).await;

        let patch = actix_test::TestRequest::patch()
            .uri(&format!("/api/posts/{}", created.id))
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .set_json(UpdatePostRequest {
                status: Some("ARCHIVED".to_owned()),
                ..UpdatePostRequest::default()
            })
            .to_request();
        let response = actix_test::call_service(&app, patch).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn listing_shows_only_own_posts() {
        let state = web::Data::new(memory_state());
        let app = actix_test::init_service(build_test_app(state.clone())).await;
        let ada = signup_token(&state, "ada@example.com").await;
        let eve = signup_token(&state, "eve@example.com").await;

        let create = actix_test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, format!("Bearer {ada}")))
            .to_request();
        let _: CreateDraftResponse = actix_test::call_and_read_body_json(&app, create).await;

        let list = actix_test::TestRequest::get()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, format!("Bearer {eve}")))
            .to_request();
        let summaries: Vec<PostSummaryResponse> =
            actix_test::call_and_read_body_json(&app, list).await;
        assert!(summaries.is_empty());
    }
}
