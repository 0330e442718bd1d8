//! SCIM resource and message models.

pub mod scim_entitlement;
pub mod scim_response;
pub mod scim_user;

pub use scim_entitlement::{EntitlementSummary, ScimEntitlement};
pub use scim_response::{ScimListResponse, ScimPagination};
pub use scim_user::{ScimEmail, ScimMeta, ScimName, ScimUser};

/// Supported SCIM protocol variants.
///
/// The two variants share one mapper and differ only structurally:
/// 2.0 resources carry a `schemas` array (and the computed `formatted`
/// name), 1.1 resources omit both, and the error/list envelopes take
/// the matching shape. The variant is fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScimVersion {
    /// SCIM 1.1 — the legacy agent protocol.
    V11,
    /// SCIM 2.0 (RFC 7643/7644).
    V20,
}

impl ScimVersion {
    /// Short version tag, e.g. `"2.0"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ScimVersion::V11 => "1.1",
            ScimVersion::V20 => "2.0",
        }
    }

    /// Human-readable label used by the health endpoint.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            ScimVersion::V11 => "SCIM 1.1",
            ScimVersion::V20 => "SCIM 2.0",
        }
    }
}

impl std::fmt::Display for ScimVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScimVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.1" | "v1.1" | "scim1.1" => Ok(ScimVersion::V11),
            "2.0" | "v2.0" | "scim2.0" => Ok(ScimVersion::V20),
            other => Err(format!("unknown SCIM version: {other}")),
        }
    }
}
