//! SCIM User resource handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Response,
    Extension,
};

use crate::error::VersionedScimError;
use crate::handlers::common::{scim_response, ListQuery};
use crate::models::{ScimPagination, ScimVersion};
use crate::services::UserService;

/// List users with pagination.
///
/// GET /scim/v2/Users
#[utoipa::path(
    get,
    path = "/scim/v2/Users",
    responses(
        (status = 200, description = "List of SCIM users"),
        (status = 400, description = "Malformed pagination parameters"),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "SCIM Users"
)]
pub async fn list_users(
    Extension(version): Extension<ScimVersion>,
    Extension(service): Extension<Arc<UserService>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, VersionedScimError> {
    let pagination =
        ScimPagination::from_query(query.start_index.as_deref(), query.count.as_deref())
            .map_err(|e| e.versioned(version))?;

    let response = service
        .list_users(pagination)
        .await
        .map_err(|e| e.versioned(version))?;

    Ok(scim_response(StatusCode::OK, response))
}

/// Get a user by id.
///
/// GET /scim/v2/Users/{id}
#[utoipa::path(
    get,
    path = "/scim/v2/Users/{id}",
    responses(
        (status = 200, description = "The SCIM user"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found"),
    ),
    tag = "SCIM Users"
)]
pub async fn get_user(
    Extension(version): Extension<ScimVersion>,
    Extension(service): Extension<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<Response, VersionedScimError> {
    let user = service
        .get_user(&id)
        .await
        .map_err(|e| e.versioned(version))?;

    Ok(scim_response(StatusCode::OK, user))
}
