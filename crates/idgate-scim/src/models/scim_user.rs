//! SCIM User resource schema (RFC 7643 Section 4.1, plus the 1.1
//! shape without a `schemas` array).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::scim_entitlement::EntitlementSummary;

/// SCIM User name component.
///
/// `givenName`/`familyName` default to the empty string when their
/// columns are missing; `formatted` is emitted by the 2.0 mapper only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScimName {
    pub given_name: String,

    pub family_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

/// SCIM Email value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScimEmail {
    /// Email address.
    pub value: String,

    /// Email type (e.g., "work", "home").
    #[serde(rename = "type")]
    pub email_type: String,

    /// Whether this is the primary email.
    pub primary: bool,
}

impl ScimEmail {
    /// A single primary work email, the only shape the source table
    /// can express.
    pub fn work(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            email_type: "work".to_string(),
            primary: true,
        }
    }
}

/// SCIM Resource metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScimMeta {
    /// Resource type (User or Entitlement).
    pub resource_type: String,

    /// When the resource was created.
    pub created: DateTime<Utc>,

    /// When the resource was last modified.
    pub last_modified: DateTime<Utc>,

    /// Resource location URI.
    pub location: String,
}

impl ScimMeta {
    /// Metadata stamped with the response-time clock.
    ///
    /// The source tables carry no audit columns, so `created` and
    /// `lastModified` are the current UTC timestamp at response time.
    /// This is a documented limitation of the gateway, not persisted
    /// data.
    pub fn now(resource_type: impl Into<String>, location: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            resource_type: resource_type.into(),
            created: now,
            last_modified: now,
            location: location.into(),
        }
    }
}

/// SCIM User resource.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScimUser {
    /// Schema URNs; present on 2.0 resources, absent on 1.1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,

    /// String form of the mapped identifier column. Empty when the
    /// column is absent from the result set — never null.
    pub id: String,

    pub user_name: String,

    pub name: ScimName,

    /// Exactly one entry, type "work", primary.
    pub emails: Vec<ScimEmail>,

    /// Defaults to `true` when the active column is unmapped.
    pub active: bool,

    /// Emitted only when the column is present and non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Emitted only when the column is present and non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Entitlement summaries (extension variant); absent when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entitlements: Option<Vec<EntitlementSummary>>,

    /// Resource metadata.
    pub meta: ScimMeta,
}

impl ScimUser {
    /// SCIM Core User schema URI.
    pub const SCHEMA: &'static str = "urn:ietf:params:scim:schemas:core:2.0:User";

    /// SCIM Enterprise User extension schema URI.
    pub const ENTERPRISE_SCHEMA: &'static str =
        "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User";
}
