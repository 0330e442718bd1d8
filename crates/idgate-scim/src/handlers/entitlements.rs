//! SCIM Entitlement resource handlers (extension variant).

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
use crate::services::EntitlementService;

/// List entitlements with pagination.
///
/// GET /scim/v2/Entitlements
#[utoipa::path(
    get,
    path = "/scim/v2/Entitlements",
    responses(
        (status = 200, description = "List of SCIM entitlements"),
        (status = 400, description = "Malformed pagination parameters"),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "SCIM Entitlements"
)]
pub async fn list_entitlements(
    Extension(version): Extension<ScimVersion>,
    Extension(service): Extension<Arc<EntitlementService>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, VersionedScimError> {
    let pagination =
        ScimPagination::from_query(query.start_index.as_deref(), query.count.as_deref())
            .map_err(|e| e.versioned(version))?;

    let response = service
        .list_entitlements(pagination)
        .await
        .map_err(|e| e.versioned(version))?;

    Ok(scim_response(StatusCode::OK, response))
}

/// Get an entitlement by id.
///
/// GET /scim/v2/Entitlements/{id}
#[utoipa::path(
    get,
    path = "/scim/v2/Entitlements/{id}",
    responses(
        (status = 200, description = "The SCIM entitlement"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Entitlement not found"),
    ),
    tag = "SCIM Entitlements"
)]
pub async fn get_entitlement(
    Extension(version): Extension<ScimVersion>,
    Extension(service): Extension<Arc<EntitlementService>>,
    Path(id): Path<String>,
) -> Result<Response, VersionedScimError> {
    let entitlement = service
        .get_entitlement(&id)
        .await
        .map_err(|e| e.versioned(version))?;

    Ok(scim_response(StatusCode::OK, entitlement))
}
