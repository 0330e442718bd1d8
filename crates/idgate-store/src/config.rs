//! Store configuration.
//!
//! Connection parameters, table names, and the logical-to-physical
//! column mappings. Everything here is resolved once at startup and is
//! immutable for the process lifetime; the mappers and the store only
//! ever borrow it.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// SSL mode for database connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    /// No SSL.
    Disable,
    /// Use SSL if available, but don't require it.
    #[default]
    Prefer,
    /// Require SSL.
    Require,
    /// Require SSL and verify CA certificate.
    VerifyCa,
    /// Require SSL and verify CA and hostname.
    VerifyFull,
}

impl SslMode {
    /// Get the string representation for connection strings.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }
}

impl std::str::FromStr for SslMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(format!("unknown ssl mode: {other}")),
        }
    }
}

/// Physical column names backing the SCIM User attributes.
///
/// These are case-sensitive lookup keys into the column list a query
/// actually returns. A configured column that is absent from the
/// result set makes the corresponding attribute degrade to its
/// documented default instead of failing the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserColumns {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub active: String,
    pub external_id: String,
}

impl Default for UserColumns {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            username: "username".to_string(),
            email: "email".to_string(),
            first_name: "first_name".to_string(),
            last_name: "last_name".to_string(),
            display_name: "display_name".to_string(),
            active: "active".to_string(),
            external_id: "external_id".to_string(),
        }
    }
}

/// Physical column names backing the SCIM Entitlement attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementColumns {
    pub id: String,
    pub value: String,
    pub display: String,
    #[serde(rename = "type")]
    pub entitlement_type: String,
}

impl Default for EntitlementColumns {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            value: "value".to_string(),
            display: "display".to_string(),
            entitlement_type: "type".to_string(),
        }
    }
}

/// Configuration for the relational identity store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database server hostname or IP address.
    pub host: String,

    /// Database server port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Database name.
    pub database: String,

    /// Username for authentication.
    pub username: String,

    /// Password for authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// SSL mode.
    #[serde(default)]
    pub ssl_mode: SslMode,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Connection acquire timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Table containing user records.
    #[serde(default = "default_users_table")]
    pub users_table: String,

    /// Table containing entitlement records.
    #[serde(default = "default_entitlements_table")]
    pub entitlements_table: String,

    /// Many-to-many association table between users and entitlements.
    #[serde(default = "default_user_entitlements_table")]
    pub user_entitlements_table: String,

    /// User attribute column mapping.
    #[serde(default)]
    pub user_columns: UserColumns,

    /// Entitlement attribute column mapping.
    #[serde(default)]
    pub entitlement_columns: EntitlementColumns,
}

fn default_pool_size() -> u32 {
    5
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_users_table() -> String {
    "users".to_string()
}

fn default_entitlements_table() -> String {
    "entitlements".to_string()
}

fn default_user_entitlements_table() -> String {
    "user_entitlements".to_string()
}

impl StoreConfig {
    /// Create a new store config with required fields.
    pub fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: None,
            database: database.into(),
            username: username.into(),
            password: None,
            ssl_mode: SslMode::default(),
            pool_size: default_pool_size(),
            connect_timeout_secs: default_connect_timeout_secs(),
            users_table: default_users_table(),
            entitlements_table: default_entitlements_table(),
            user_entitlements_table: default_user_entitlements_table(),
            user_columns: UserColumns::default(),
            entitlement_columns: EntitlementColumns::default(),
        }
    }

    /// Set password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set SSL mode.
    #[must_use]
    pub fn with_ssl_mode(mut self, mode: SslMode) -> Self {
        self.ssl_mode = mode;
        self
    }

    /// Set users table name.
    pub fn with_users_table(mut self, table: impl Into<String>) -> Self {
        self.users_table = table.into();
        self
    }

    /// Set entitlement and association table names.
    pub fn with_entitlement_tables(
        mut self,
        entitlements: impl Into<String>,
        user_entitlements: impl Into<String>,
    ) -> Self {
        self.entitlements_table = entitlements.into();
        self.user_entitlements_table = user_entitlements.into();
        self
    }

    /// Get the effective port (default if not specified).
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(5432)
    }

    /// Validate required fields.
    pub fn validate(&self) -> StoreResult<()> {
        if self.host.is_empty() {
            return Err(StoreError::invalid_configuration("host is required"));
        }
        if self.database.is_empty() {
            return Err(StoreError::invalid_configuration("database is required"));
        }
        if self.username.is_empty() {
            return Err(StoreError::invalid_configuration("username is required"));
        }
        if self.users_table.is_empty() {
            return Err(StoreError::invalid_configuration("users_table is required"));
        }
        Ok(())
    }

    /// Build the connection URL for `sqlx`.
    #[must_use]
    pub fn connection_url(&self) -> String {
        let password = self.password.as_deref().unwrap_or("");
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.username,
            password,
            self.host,
            self.effective_port(),
            self.database,
            self.ssl_mode.as_str()
        )
    }

    /// A copy safe for logging: the password is masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.password.is_some() {
            config.password = Some("***REDACTED***".to_string());
        }
        config
    }
}
