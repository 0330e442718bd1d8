//! Connector configuration loaded from the environment.
//!
//! Everything is collected once at startup into an immutable struct
//! and passed explicitly to the store and the router; no component
//! reads the environment after this point.

use std::str::FromStr;

use idgate_scim::ScimVersion;
use idgate_store::{SslMode, StoreConfig};

/// Configuration for the connector process.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// HTTP bind host.
    pub server_host: String,

    /// HTTP bind port.
    pub server_port: u16,

    /// Protocol variant served by this deployment.
    pub scim_version: ScimVersion,

    /// Whether the entitlements extension is enabled.
    pub entitlements_enabled: bool,

    /// Basic-auth username accepted on the resource routes.
    pub scim_username: String,

    /// Basic-auth password accepted on the resource routes.
    pub scim_password: String,

    /// Store connection and mapping configuration.
    pub store: StoreConfig,
}

impl ConnectorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// This allows tests to supply variables without mutating
    /// process-global environment state.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let server_host = reader("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = reader("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue("SERVER_PORT".into(), e.to_string()))?;

        let scim_version = reader("SCIM_VERSION")
            .unwrap_or_else(|_| "2.0".to_string())
            .parse::<ScimVersion>()
            .map_err(|e| ConfigError::InvalidValue("SCIM_VERSION".into(), e))?;

        let entitlements_enabled = reader("SCIM_ENTITLEMENTS")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        let scim_username = reader("SCIM_USERNAME").unwrap_or_else(|_| "scim_import".to_string());
        let scim_password =
            reader("SCIM_PASSWORD").map_err(|_| ConfigError::MissingVar("SCIM_PASSWORD".into()))?;

        let host = reader("DB_HOST").map_err(|_| ConfigError::MissingVar("DB_HOST".into()))?;
        let database = reader("DB_NAME").map_err(|_| ConfigError::MissingVar("DB_NAME".into()))?;
        let username =
            reader("DB_USERNAME").map_err(|_| ConfigError::MissingVar("DB_USERNAME".into()))?;
        let password =
            reader("DB_PASSWORD").map_err(|_| ConfigError::MissingVar("DB_PASSWORD".into()))?;

        let mut store = StoreConfig::new(host, database, username).with_password(password);

        if let Ok(port) = reader("DB_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue("DB_PORT".into(), e.to_string()))?;
            store = store.with_port(port);
        }
        if let Ok(mode) = reader("DB_SSLMODE") {
            let mode = SslMode::from_str(&mode)
                .map_err(|e| ConfigError::InvalidValue("DB_SSLMODE".into(), e))?;
            store = store.with_ssl_mode(mode);
        }

        if let Ok(table) = reader("SQL_TABLE") {
            store.users_table = table;
        }
        if let Ok(table) = reader("SQL_ENTITLEMENTS_TABLE") {
            store.entitlements_table = table;
        }
        if let Ok(table) = reader("SQL_USER_ENTITLEMENTS_TABLE") {
            store.user_entitlements_table = table;
        }

        if let Ok(column) = reader("DB_COLUMN_ID") {
            store.user_columns.id = column;
        }
        if let Ok(column) = reader("DB_COLUMN_USERNAME") {
            store.user_columns.username = column;
        }
        if let Ok(column) = reader("DB_COLUMN_EMAIL") {
            store.user_columns.email = column;
        }
        if let Ok(column) = reader("DB_COLUMN_FIRST_NAME") {
            store.user_columns.first_name = column;
        }
        if let Ok(column) = reader("DB_COLUMN_LAST_NAME") {
            store.user_columns.last_name = column;
        }
        if let Ok(column) = reader("DB_COLUMN_DISPLAY_NAME") {
            store.user_columns.display_name = column;
        }
        if let Ok(column) = reader("DB_COLUMN_ACTIVE") {
            store.user_columns.active = column;
        }
        if let Ok(column) = reader("DB_COLUMN_EXTERNAL_ID") {
            store.user_columns.external_id = column;
        }

        if let Ok(column) = reader("ENTITLEMENT_COLUMN_ID") {
            store.entitlement_columns.id = column;
        }
        if let Ok(column) = reader("ENTITLEMENT_COLUMN_VALUE") {
            store.entitlement_columns.value = column;
        }
        if let Ok(column) = reader("ENTITLEMENT_COLUMN_DISPLAY") {
            store.entitlement_columns.display = column;
        }
        if let Ok(column) = reader("ENTITLEMENT_COLUMN_TYPE") {
            store.entitlement_columns.entitlement_type = column;
        }

        Ok(Self {
            server_host,
            server_port,
            scim_version,
            entitlements_enabled,
            scim_username,
            scim_password,
            store,
        })
    }

    /// The HTTP bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env::VarError;

    /// Create a reader closure from a HashMap (no global env mutation).
    fn make_reader(vars: HashMap<&str, &str>) -> impl Fn(&str) -> Result<String, VarError> {
        let owned: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| owned.get(key).cloned().ok_or(VarError::NotPresent)
    }

    fn required_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DB_HOST", "db.example.com"),
            ("DB_NAME", "identity_db"),
            ("DB_USERNAME", "reader"),
            ("DB_PASSWORD", "db-secret"),
            ("SCIM_PASSWORD", "scim-secret"),
        ])
    }

    #[test]
    fn test_missing_required_vars() {
        let result = ConnectorConfig::from_reader(make_reader(HashMap::new()));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
        assert!(err.to_string().contains("SCIM_PASSWORD"));

        let mut vars = required_vars();
        vars.remove("DB_PASSWORD");
        let err = ConnectorConfig::from_reader(make_reader(vars)).unwrap_err();
        assert!(err.to_string().contains("DB_PASSWORD"));
    }

    #[test]
    fn test_defaults() {
        let config = ConnectorConfig::from_reader(make_reader(required_vars())).unwrap();

        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.scim_version, ScimVersion::V20);
        assert!(!config.entitlements_enabled);
        assert_eq!(config.scim_username, "scim_import");
        assert_eq!(config.store.users_table, "users");
        assert_eq!(config.store.entitlements_table, "entitlements");
        assert_eq!(config.store.user_columns.id, "id");
        assert_eq!(config.store.effective_port(), 5432);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_custom_values() {
        let mut vars = required_vars();
        vars.extend([
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "9443"),
            ("SCIM_VERSION", "1.1"),
            ("SCIM_ENTITLEMENTS", "true"),
            ("SCIM_USERNAME", "import_agent"),
            ("DB_PORT", "5433"),
            ("DB_SSLMODE", "require"),
            ("SQL_TABLE", "hr_users"),
            ("DB_COLUMN_ID", "employee_id"),
            ("ENTITLEMENT_COLUMN_TYPE", "kind"),
        ]);

        let config = ConnectorConfig::from_reader(make_reader(vars)).unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9443");
        assert_eq!(config.scim_version, ScimVersion::V11);
        assert!(config.entitlements_enabled);
        assert_eq!(config.scim_username, "import_agent");
        assert_eq!(config.store.effective_port(), 5433);
        assert_eq!(config.store.ssl_mode, SslMode::Require);
        assert_eq!(config.store.users_table, "hr_users");
        assert_eq!(config.store.user_columns.id, "employee_id");
        assert_eq!(config.store.entitlement_columns.entitlement_type, "kind");
    }

    #[test]
    fn test_invalid_values_are_named() {
        let mut vars = required_vars();
        vars.insert("SERVER_PORT", "not-a-port");
        let err = ConnectorConfig::from_reader(make_reader(vars)).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));

        let mut vars = required_vars();
        vars.insert("SCIM_VERSION", "3.0");
        let err = ConnectorConfig::from_reader(make_reader(vars)).unwrap_err();
        assert!(err.to_string().contains("SCIM_VERSION"));

        let mut vars = required_vars();
        vars.insert("DB_SSLMODE", "definitely");
        let err = ConnectorConfig::from_reader(make_reader(vars)).unwrap_err();
        assert!(err.to_string().contains("DB_SSLMODE"));
    }
}
