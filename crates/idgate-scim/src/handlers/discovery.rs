//! SCIM discovery endpoints and the connector info document.
//!
//! Discovery endpoints do NOT require authentication per the SCIM
//! spec. The 1.1 variant only serves `ServiceProviderConfig` (in its
//! legacy shape); `Schemas` and `ResourceTypes` exist on 2.0 only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::handlers::common::scim_response;
use crate::models::{ScimEntitlement, ScimUser, ScimVersion};
use crate::router::EntitlementsEnabled;

/// SCIM ServiceProviderConfig.
///
/// GET /scim/v2/ServiceProviderConfig
#[utoipa::path(
    get,
    path = "/scim/v2/ServiceProviderConfig",
    responses(
        (status = 200, description = "Service provider configuration"),
    ),
    tag = "SCIM Discovery"
)]
pub async fn service_provider_config(Extension(version): Extension<ScimVersion>) -> Response {
    let config = match version {
        ScimVersion::V20 => serde_json::json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:ServiceProviderConfig"],
            "documentationUri": "https://tools.ietf.org/html/rfc7644",
            "patch": { "supported": false },
            "bulk": {
                "supported": false,
                "maxOperations": 0,
                "maxPayloadSize": 0
            },
            "filter": {
                "supported": true,
                "maxResults": 200
            },
            "changePassword": { "supported": false },
            "sort": { "supported": true },
            "etag": { "supported": false },
            "authenticationSchemes": [
                {
                    "type": "httpbasic",
                    "name": "HTTP Basic",
                    "description": "Authentication via HTTP Basic",
                    "specUri": "http://www.rfc-editor.org/info/rfc2617",
                    "documentationUri": "https://tools.ietf.org/html/rfc7617"
                }
            ]
        }),
        // Legacy 1.1 shape: no schemas array, documentationUrl/specUrl
        // spellings.
        ScimVersion::V11 => serde_json::json!({
            "documentationUrl": "https://tools.ietf.org/html/rfc7644",
            "patch": { "supported": false },
            "bulk": { "supported": false },
            "filter": {
                "supported": true,
                "maxResults": 200
            },
            "changePassword": { "supported": false },
            "sort": { "supported": true },
            "etag": { "supported": false },
            "authenticationSchemes": [
                {
                    "name": "HTTP Basic",
                    "description": "Authentication via HTTP Basic",
                    "specUrl": "http://www.rfc-editor.org/info/rfc2617",
                    "type": "httpbasic"
                }
            ]
        }),
    };

    scim_response(StatusCode::OK, config)
}

/// SCIM Schemas (2.0 only).
///
/// GET /scim/v2/Schemas
#[utoipa::path(
    get,
    path = "/scim/v2/Schemas",
    responses(
        (status = 200, description = "Supported schemas"),
    ),
    tag = "SCIM Discovery"
)]
pub async fn schemas(
    Extension(EntitlementsEnabled(entitlements)): Extension<EntitlementsEnabled>,
) -> Response {
    let mut resources = vec![
        serde_json::json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Schema"],
            "id": ScimUser::SCHEMA,
            "name": "User",
            "description": "User Account"
        }),
        serde_json::json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Schema"],
            "id": ScimUser::ENTERPRISE_SCHEMA,
            "name": "EnterpriseUser",
            "description": "Enterprise User"
        }),
    ];

    if entitlements {
        resources.push(serde_json::json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Schema"],
            "id": ScimEntitlement::SCHEMA,
            "name": "Entitlement",
            "description": "Entitlement (Role, Permission, Group)"
        }));
    }

    let response = serde_json::json!({
        "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
        "totalResults": resources.len(),
        "Resources": resources
    });

    scim_response(StatusCode::OK, response)
}

/// SCIM ResourceTypes (2.0 only).
///
/// GET /scim/v2/ResourceTypes
#[utoipa::path(
    get,
    path = "/scim/v2/ResourceTypes",
    responses(
        (status = 200, description = "Supported resource types"),
    ),
    tag = "SCIM Discovery"
)]
pub async fn resource_types(
    Extension(EntitlementsEnabled(entitlements)): Extension<EntitlementsEnabled>,
) -> Response {
    let mut resources = vec![serde_json::json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:ResourceType"],
        "id": "User",
        "name": "User",
        "endpoint": "/Users",
        "description": "User Account",
        "schema": ScimUser::SCHEMA,
        "schemaExtensions": [
            {
                "schema": ScimUser::ENTERPRISE_SCHEMA,
                "required": false
            }
        ]
    })];

    if entitlements {
        resources.push(serde_json::json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:ResourceType"],
            "id": "Entitlement",
            "name": "Entitlement",
            "endpoint": "/Entitlements",
            "description": "Entitlement (Role, Permission, Group)",
            "schema": ScimEntitlement::SCHEMA
        }));
    }

    let response = serde_json::json!({
        "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
        "totalResults": resources.len(),
        "Resources": resources
    });

    scim_response(StatusCode::OK, response)
}

/// Connector info document.
///
/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Connector information"),
    ),
    tag = "Info"
)]
pub async fn connector_info(
    Extension(version): Extension<ScimVersion>,
    Extension(EntitlementsEnabled(entitlements)): Extension<EntitlementsEnabled>,
) -> Response {
    let mut endpoints = serde_json::json!({
        "users": "/scim/v2/Users",
        "config": "/scim/v2/ServiceProviderConfig",
        "health": "/health"
    });

    if entitlements {
        endpoints["entitlements"] = serde_json::json!("/scim/v2/Entitlements");
    }
    if version == ScimVersion::V20 {
        endpoints["schemas"] = serde_json::json!("/scim/v2/Schemas");
        endpoints["resourceTypes"] = serde_json::json!("/scim/v2/ResourceTypes");
    }

    let body = serde_json::json!({
        "message": "idgate SCIM connector",
        "version": env!("CARGO_PKG_VERSION"),
        "scimVersion": version.as_str(),
        "endpoints": endpoints
    });

    (StatusCode::OK, Json(body)).into_response()
}
