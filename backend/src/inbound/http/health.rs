//! Health endpoint reporting process and store status.
//!
//! The endpoint answers 200 either way; orchestration reads the body. A
//! failed ping marks the database as errored rather than failing the
//! request.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use super::state::HttpState;

/// Health report body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`.
    pub status: String,
    /// `connected` or `error`.
    pub database: String,
}

/// Report service and database connectivity status.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health report", body = HealthResponse)
    ),
    tags = ["health"],
    operation_id = "health",
    security([])
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    let report = match state.store_health.ping().await {
        Ok(()) => HealthResponse {
            status: "healthy".to_owned(),
            database: "connected".to_owned(),
        },
        Err(err) => {
            warn!(error = %err, "store ping failed");
            HealthResponse {
                status: "unhealthy".to_owned(),
                database: "error".to_owned(),
            }
        }
    };
    HttpResponse::Ok().json(report)
}
