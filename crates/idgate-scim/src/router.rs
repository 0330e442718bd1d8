//! SCIM router assembly.

use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Router};

use idgate_store::{EntitlementColumns, IdentityStore, UserColumns};

use crate::handlers::{discovery, entitlements, health, users};
use crate::middleware::auth::{basic_auth_middleware, BasicAuth};
use crate::models::ScimVersion;
use crate::services::{EntitlementService, ResourceMapper, UserService};

/// Whether the entitlements extension is enabled, exposed to handlers
/// as a request extension.
#[derive(Debug, Clone, Copy)]
pub struct EntitlementsEnabled(pub bool);

/// Configuration for the SCIM router.
pub struct ScimGatewayConfig {
    /// Backing store.
    pub store: Arc<dyn IdentityStore>,
    /// Protocol variant served by this deployment.
    pub version: ScimVersion,
    /// Whether the entitlements extension routes are mounted.
    pub entitlements_enabled: bool,
    /// User attribute column mapping.
    pub user_columns: UserColumns,
    /// Entitlement attribute column mapping.
    pub entitlement_columns: EntitlementColumns,
    /// Basic-auth username for the resource routes.
    pub scim_username: String,
    /// Basic-auth password for the resource routes.
    pub scim_password: String,
}

/// Build the gateway router.
///
/// Resource routes sit behind Basic auth; discovery routes, the health
/// probe, and the info document are open. The `Entitlements` routes
/// exist only when the extension is enabled, and `Schemas`/
/// `ResourceTypes` only on the 2.0 variant.
pub fn scim_router(config: ScimGatewayConfig) -> Router {
    let mapper = ResourceMapper::new(
        config.version,
        config.user_columns,
        config.entitlement_columns,
    );
    let user_service = Arc::new(UserService::new(
        config.store.clone(),
        mapper.clone(),
        config.entitlements_enabled,
    ));
    let entitlement_service = Arc::new(EntitlementService::new(config.store.clone(), mapper));
    let auth = Arc::new(BasicAuth::new(
        config.scim_username,
        config.scim_password,
        config.version,
    ));

    let mut resources = Router::new()
        .route("/Users", get(users::list_users))
        .route("/Users/:id", get(users::get_user));
    if config.entitlements_enabled {
        resources = resources
            .route("/Entitlements", get(entitlements::list_entitlements))
            .route("/Entitlements/:id", get(entitlements::get_entitlement));
    }
    let resources = resources.layer(middleware::from_fn_with_state(auth, basic_auth_middleware));

    let mut discovery_routes = Router::new().route(
        "/ServiceProviderConfig",
        get(discovery::service_provider_config),
    );
    if config.version == ScimVersion::V20 {
        discovery_routes = discovery_routes
            .route("/Schemas", get(discovery::schemas))
            .route("/ResourceTypes", get(discovery::resource_types));
    }

    Router::new()
        .nest("/scim/v2", resources.merge(discovery_routes))
        .route("/health", get(health::health))
        .route("/", get(discovery::connector_info))
        .layer(Extension(user_service))
        .layer(Extension(entitlement_service))
        .layer(Extension(config.store))
        .layer(Extension(config.version))
        .layer(Extension(EntitlementsEnabled(config.entitlements_enabled)))
}
