//! Relational access for SCIM resources.
//!
//! [`IdentityStore`] is the contract the SCIM layer depends on; the
//! `PostgreSQL` implementation issues parameterized queries against the
//! configured tables. Identifiers (table and column names) are resolved
//! only from trusted startup configuration and quoted; every value that
//! originates from a request is a bound parameter, never interpolated.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Row};
use tracing::{debug, info, instrument};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::row::{RowSet, SqlValue};

/// Read-only access to the user and entitlement tables.
///
/// Every method is a fresh round trip; the store performs no caching
/// and no background work. The count and page queries are not
/// transactionally linked, so totals and pages may diverge under
/// concurrent writes.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Cheap connectivity probe for the health endpoint.
    async fn ping(&self) -> StoreResult<()>;

    /// Total row count of the users table.
    async fn count_users(&self) -> StoreResult<i64>;

    /// One page of user rows, ordered by the mapped id column.
    async fn fetch_user_page(&self, offset: i64, limit: i64) -> StoreResult<RowSet>;

    /// The user row with the given id, if any (0 or 1 rows).
    async fn fetch_user_by_id(&self, id: &str) -> StoreResult<RowSet>;

    /// Total row count of the entitlements table.
    async fn count_entitlements(&self) -> StoreResult<i64>;

    /// One page of entitlement rows, ordered by the mapped id column.
    async fn fetch_entitlement_page(&self, offset: i64, limit: i64) -> StoreResult<RowSet>;

    /// The entitlement row with the given id, if any (0 or 1 rows).
    async fn fetch_entitlement_by_id(&self, id: &str) -> StoreResult<RowSet>;

    /// Entitlements granted to a user, joined through the association
    /// table, in (id, value, display, type) column order.
    ///
    /// One additional round trip per user resource; a list page with
    /// the extension enabled costs O(n) extra queries.
    async fn fetch_user_entitlements(&self, user_id: &str) -> StoreResult<RowSet>;
}

/// `PostgreSQL`-backed [`IdentityStore`].
pub struct PgIdentityStore {
    config: StoreConfig,
    pool: PgPool,
}

impl std::fmt::Debug for PgIdentityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgIdentityStore")
            .field("config", &self.config.redacted())
            .finish()
    }
}

impl PgIdentityStore {
    /// Validate the configuration and establish the connection pool.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let url = config.connection_url();

        debug!(
            host = %config.host,
            database = %config.database,
            "creating database connection pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&url)
            .await
            .map_err(|e| {
                StoreError::connection_failed(
                    format!(
                        "failed to connect to database at {}:{}",
                        config.host,
                        config.effective_port()
                    ),
                    e,
                )
            })?;

        info!(
            host = %config.host,
            database = %config.database,
            "database connection pool established"
        );

        Ok(Self { config, pool })
    }

    /// Close the pool, waiting for in-flight connections to drain.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("database connection pool closed");
    }

    async fn count(&self, table: &str) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>(&count_query(table))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::query_failed(format!("count query failed for {table}"), e))
    }

    async fn fetch_page(&self, table: &str, id_column: &str, offset: i64, limit: i64) -> StoreResult<RowSet> {
        let rows = sqlx::query(&page_query(table, id_column))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::query_failed(format!("page query failed for {table}"), e))?;
        Ok(rowset_from_pg(&rows))
    }

    async fn fetch_by_id(&self, table: &str, id_column: &str, id: &str) -> StoreResult<RowSet> {
        let rows = sqlx::query(&by_id_query(table, id_column))
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::query_failed(format!("lookup query failed for {table}"), e))?;
        Ok(rowset_from_pg(&rows))
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    #[instrument(skip(self))]
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::query_failed("connectivity probe failed", e))?;
        Ok(())
    }

    async fn count_users(&self) -> StoreResult<i64> {
        self.count(&self.config.users_table).await
    }

    #[instrument(skip(self))]
    async fn fetch_user_page(&self, offset: i64, limit: i64) -> StoreResult<RowSet> {
        self.fetch_page(
            &self.config.users_table,
            &self.config.user_columns.id,
            offset,
            limit,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_user_by_id(&self, id: &str) -> StoreResult<RowSet> {
        self.fetch_by_id(&self.config.users_table, &self.config.user_columns.id, id)
            .await
    }

    async fn count_entitlements(&self) -> StoreResult<i64> {
        self.count(&self.config.entitlements_table).await
    }

    #[instrument(skip(self))]
    async fn fetch_entitlement_page(&self, offset: i64, limit: i64) -> StoreResult<RowSet> {
        self.fetch_page(
            &self.config.entitlements_table,
            &self.config.entitlement_columns.id,
            offset,
            limit,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_entitlement_by_id(&self, id: &str) -> StoreResult<RowSet> {
        self.fetch_by_id(
            &self.config.entitlements_table,
            &self.config.entitlement_columns.id,
            id,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_user_entitlements(&self, user_id: &str) -> StoreResult<RowSet> {
        let rows = sqlx::query(&user_entitlements_query(&self.config))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::query_failed("user entitlements query failed", e))?;
        Ok(rowset_from_pg(&rows))
    }
}

/// Escape a SQL identifier for double-quoted interpolation.
fn escape_identifier(identifier: &str) -> String {
    identifier.replace('"', "\"\"")
}

fn count_query(table: &str) -> String {
    format!("SELECT COUNT(*) FROM \"{}\"", escape_identifier(table))
}

fn page_query(table: &str, id_column: &str) -> String {
    format!(
        "SELECT * FROM \"{}\" ORDER BY \"{}\" ASC LIMIT $1 OFFSET $2",
        escape_identifier(table),
        escape_identifier(id_column)
    )
}

/// The id column is cast to text so string path parameters match
/// numeric primary keys.
fn by_id_query(table: &str, id_column: &str) -> String {
    format!(
        "SELECT * FROM \"{}\" WHERE \"{}\"::text = $1",
        escape_identifier(table),
        escape_identifier(id_column)
    )
}

fn user_entitlements_query(config: &StoreConfig) -> String {
    let cols = &config.entitlement_columns;
    format!(
        "SELECT e.\"{id}\", e.\"{value}\", e.\"{display}\", e.\"{ty}\" \
         FROM \"{entitlements}\" e \
         INNER JOIN \"{associations}\" ue ON e.\"{id}\" = ue.\"entitlement_id\" \
         WHERE ue.\"user_id\"::text = $1",
        id = escape_identifier(&cols.id),
        value = escape_identifier(&cols.value),
        display = escape_identifier(&cols.display),
        ty = escape_identifier(&cols.entitlement_type),
        entitlements = escape_identifier(&config.entitlements_table),
        associations = escape_identifier(&config.user_entitlements_table),
    )
}

/// Convert driver rows into the shared [`RowSet`] model.
///
/// Column names come from the first row's metadata; an empty result
/// carries no columns, which is fine because nothing is mapped from it.
fn rowset_from_pg(rows: &[PgRow]) -> RowSet {
    let columns: Vec<String> = rows.first().map_or_else(Vec::new, |row| {
        row.columns().iter().map(|c| c.name().to_string()).collect()
    });

    let decoded = rows
        .iter()
        .map(|row| (0..columns.len()).map(|idx| decode_value(row, idx)).collect())
        .collect();

    RowSet::new(columns, decoded)
}

/// Decode one column position by trying the common wire types in turn.
/// Anything undecodable is treated as NULL.
fn decode_value(row: &PgRow, idx: usize) -> SqlValue {
    if let Ok(value) = row.try_get::<Option<String>, _>(idx) {
        return value.map_or(SqlValue::Null, SqlValue::Text);
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(idx) {
        return value.map_or(SqlValue::Null, SqlValue::Int);
    }
    if let Ok(value) = row.try_get::<Option<i32>, _>(idx) {
        return value.map_or(SqlValue::Null, |v| SqlValue::Int(i64::from(v)));
    }
    if let Ok(value) = row.try_get::<Option<i16>, _>(idx) {
        return value.map_or(SqlValue::Null, |v| SqlValue::Int(i64::from(v)));
    }
    if let Ok(value) = row.try_get::<Option<bool>, _>(idx) {
        return value.map_or(SqlValue::Null, SqlValue::Bool);
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(idx) {
        return value.map_or(SqlValue::Null, SqlValue::Float);
    }
    if let Ok(value) = row.try_get::<Option<uuid::Uuid>, _>(idx) {
        return value.map_or(SqlValue::Null, SqlValue::Uuid);
    }
    if let Ok(value) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx) {
        return value.map_or(SqlValue::Null, SqlValue::Timestamp);
    }
    if let Ok(value) = row.try_get::<Option<chrono::NaiveDateTime>, _>(idx) {
        return value.map_or(SqlValue::Null, |v| SqlValue::Timestamp(v.and_utc()));
    }
    SqlValue::Null
}
