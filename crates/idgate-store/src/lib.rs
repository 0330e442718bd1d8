//! # idgate store
//!
//! Relational access layer for the idgate SCIM gateway.
//!
//! This crate owns the database side of the gateway: connection
//! configuration, the loosely-typed row model the SCIM mappers consume,
//! and the [`IdentityStore`] contract with its `PostgreSQL`
//! implementation.
//!
//! The SCIM layer never sees `sqlx` types. Every query returns a
//! [`RowSet`]: the ordered rows plus the column names the query
//! actually returned, which is what drives attribute presence in the
//! mapped resources.

pub mod config;
pub mod error;
pub mod row;
pub mod store;

// Re-exports
pub use config::{EntitlementColumns, SslMode, StoreConfig, UserColumns};
pub use error::{StoreError, StoreResult};
pub use row::{RowSet, SqlValue};
pub use store::{IdentityStore, PgIdentityStore};
