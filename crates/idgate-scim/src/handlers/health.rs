//! Liveness probe backed by a trivial store query.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use tracing::error;

use idgate_store::IdentityStore;

use crate::models::ScimVersion;

/// Health check.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachable"),
        (status = 500, description = "Store unreachable"),
    ),
    tag = "Info"
)]
pub async fn health(
    Extension(version): Extension<ScimVersion>,
    Extension(store): Extension<Arc<dyn IdentityStore>>,
) -> Response {
    let timestamp = Utc::now();

    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "healthy",
                "version": version.display_name(),
                "database": "connected",
                "timestamp": timestamp,
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "unhealthy",
                    "version": version.display_name(),
                    "database": "disconnected",
                    "error": e.to_string(),
                    "timestamp": timestamp,
                })),
            )
                .into_response()
        }
    }
}
