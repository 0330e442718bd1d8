//! SCIM Entitlement resource schema (extension variant).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::scim_user::ScimMeta;

/// Compact entitlement grant embedded in a user resource.
///
/// Carries value/type/display only — no id, schemas, or meta envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementSummary {
    pub value: String,

    /// Defaults to "default" when the type column is unmapped or NULL.
    #[serde(rename = "type")]
    pub entitlement_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// SCIM Entitlement resource.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScimEntitlement {
    /// Schema URNs; present on 2.0 resources, absent on 1.1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,

    /// String form of the mapped identifier column; empty when the
    /// column is absent.
    pub id: String,

    pub value: String,

    #[serde(rename = "type")]
    pub entitlement_type: String,

    /// Emitted only when the column is present and non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    pub meta: ScimMeta,
}

impl ScimEntitlement {
    /// SCIM Core Entitlement schema URI.
    pub const SCHEMA: &'static str = "urn:ietf:params:scim:schemas:core:2.0:Entitlement";

    /// Type used when the entitlement type column is unmapped or NULL.
    pub const DEFAULT_TYPE: &'static str = "default";
}
