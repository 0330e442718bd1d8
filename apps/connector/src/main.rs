use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use idgate_scim::{scim_router, ScimGatewayConfig};
use idgate_store::{IdentityStore, PgIdentityStore};

use crate::config::ConnectorConfig;

mod config;

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,idgate_scim=debug,idgate_store=debug")),
        )
        .init();

    // Load configuration
    let config = ConnectorConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    tracing::info!(
        scim_version = %config.scim_version,
        entitlements = config.entitlements_enabled,
        database = %config.store.database,
        users_table = %config.store.users_table,
        "starting SCIM connector"
    );

    // Connect to the backing store
    let store = PgIdentityStore::connect(config.store.clone())
        .await
        .unwrap_or_else(|e| {
            eprintln!("Database connection error: {e}");
            std::process::exit(1);
        });
    let store: Arc<dyn IdentityStore> = Arc::new(store);

    let app = scim_router(ScimGatewayConfig {
        store,
        version: config.scim_version,
        entitlements_enabled: config.entitlements_enabled,
        user_columns: config.store.user_columns.clone(),
        entitlement_columns: config.store.entitlement_columns.clone(),
        scim_username: config.scim_username.clone(),
        scim_password: config.scim_password.clone(),
    })
    .layer(TraceLayer::new_for_http())
    .layer(TimeoutLayer::new(Duration::from_secs(30)));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap_or_else(|e| {
        eprintln!("Failed to bind {addr}: {e}");
        std::process::exit(1);
    });

    tracing::info!(%addr, "SCIM connector listening");

    // Serve until shutdown, draining in-flight requests so no
    // connection is leaked mid-response.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            eprintln!("Server error: {e}");
            std::process::exit(1);
        });

    tracing::info!("SCIM connector stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown signal handler");
    }
}
