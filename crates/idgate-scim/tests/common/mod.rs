//! Shared fixtures for router tests: an in-memory store and request
//! helpers driving the router without a network or a database.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use base64::Engine;
use http_body_util::BodyExt;
use tower::ServiceExt;

use idgate_scim::{scim_router, ScimGatewayConfig, ScimVersion};
use idgate_store::{
    EntitlementColumns, IdentityStore, RowSet, SqlValue, StoreError, StoreResult, UserColumns,
};

pub const USERNAME: &str = "scim_import";
pub const PASSWORD: &str = "s3cret";

/// In-memory store over fixed row sets.
pub struct MockStore {
    pub users: RowSet,
    pub entitlements: RowSet,
    /// user id → association join rows in (id, value, display, type) order.
    pub user_entitlements: Vec<(String, Vec<Vec<SqlValue>>)>,
    pub fail_ping: bool,
    pub fail_user_entitlements: bool,
}

impl Default for MockStore {
    fn default() -> Self {
        Self {
            users: three_users(),
            entitlements: two_entitlements(),
            user_entitlements: Vec::new(),
            fail_ping: false,
            fail_user_entitlements: false,
        }
    }
}

/// Users table fixture: three rows with ids 1, 2, 3.
pub fn three_users() -> RowSet {
    let columns = [
        "id",
        "username",
        "email",
        "first_name",
        "last_name",
        "display_name",
        "active",
        "external_id",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    let user = |id: i64, name: &str, first: &str, last: &str| {
        vec![
            SqlValue::Int(id),
            SqlValue::Text(name.to_string()),
            SqlValue::Text(format!("{name}@example.com")),
            SqlValue::Text(first.to_string()),
            SqlValue::Text(last.to_string()),
            SqlValue::Text(format!("{first} {last}")),
            SqlValue::Bool(true),
            SqlValue::Text(format!("ext-{id}")),
        ]
    };

    RowSet::new(
        columns,
        vec![
            user(1, "adavis", "Anna", "Davis"),
            user(2, "bkhan", "Bilal", "Khan"),
            user(3, "cwright", "Cleo", "Wright"),
        ],
    )
}

/// Entitlements table fixture: two rows with ids 10, 11.
pub fn two_entitlements() -> RowSet {
    let columns = ["id", "value", "display", "type"]
        .iter()
        .map(ToString::to_string)
        .collect();

    RowSet::new(
        columns,
        vec![
            vec![
                SqlValue::Int(10),
                SqlValue::Text("admin".to_string()),
                SqlValue::Text("Administrator".to_string()),
                SqlValue::Text("role".to_string()),
            ],
            vec![
                SqlValue::Int(11),
                SqlValue::Text("reporting".to_string()),
                SqlValue::Null,
                SqlValue::Null,
            ],
        ],
    )
}

fn page_of(set: &RowSet, offset: i64, limit: i64) -> RowSet {
    let rows = set
        .rows
        .iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect();
    RowSet::new(set.columns.clone(), rows)
}

fn row_by_id(set: &RowSet, id: &str) -> RowSet {
    let rows = set
        .rows
        .iter()
        .filter(|row| row.first().is_some_and(|v| v.to_text() == id))
        .cloned()
        .collect();
    RowSet::new(set.columns.clone(), rows)
}

#[async_trait]
impl IdentityStore for MockStore {
    async fn ping(&self) -> StoreResult<()> {
        if self.fail_ping {
            return Err(StoreError::query_failed(
                "connectivity probe failed",
                sqlx::Error::PoolClosed,
            ));
        }
        Ok(())
    }

    async fn count_users(&self) -> StoreResult<i64> {
        Ok(self.users.len() as i64)
    }

    async fn fetch_user_page(&self, offset: i64, limit: i64) -> StoreResult<RowSet> {
        Ok(page_of(&self.users, offset, limit))
    }

    async fn fetch_user_by_id(&self, id: &str) -> StoreResult<RowSet> {
        Ok(row_by_id(&self.users, id))
    }

    async fn count_entitlements(&self) -> StoreResult<i64> {
        Ok(self.entitlements.len() as i64)
    }

    async fn fetch_entitlement_page(&self, offset: i64, limit: i64) -> StoreResult<RowSet> {
        Ok(page_of(&self.entitlements, offset, limit))
    }

    async fn fetch_entitlement_by_id(&self, id: &str) -> StoreResult<RowSet> {
        Ok(row_by_id(&self.entitlements, id))
    }

    async fn fetch_user_entitlements(&self, user_id: &str) -> StoreResult<RowSet> {
        if self.fail_user_entitlements {
            return Err(StoreError::query_failed(
                "relation \"user_entitlements\" does not exist",
                sqlx::Error::PoolClosed,
            ));
        }

        let rows = self
            .user_entitlements
            .iter()
            .find(|(id, _)| id == user_id)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default();

        Ok(RowSet::new(
            ["id", "value", "display", "type"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            rows,
        ))
    }
}

/// Build a router over the mock store.
pub fn router_with(store: MockStore, version: ScimVersion, entitlements: bool) -> Router {
    scim_router(ScimGatewayConfig {
        store: Arc::new(store),
        version,
        entitlements_enabled: entitlements,
        user_columns: UserColumns::default(),
        entitlement_columns: EntitlementColumns::default(),
        scim_username: USERNAME.to_string(),
        scim_password: PASSWORD.to_string(),
    })
}

/// Authorization header value for the fixture credentials.
pub fn valid_auth() -> String {
    encode_auth(USERNAME, PASSWORD)
}

/// Authorization header value for arbitrary credentials.
pub fn encode_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"))
    )
}

/// Drive one GET request through the router and parse the JSON body.
pub async fn get(
    router: &Router,
    uri: &str,
    auth: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}
