//! SCIM list envelope and pagination parameters.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ScimError, ScimResult};
use crate::models::ScimVersion;

/// SCIM List Response schema URI (2.0 envelopes only).
pub const LIST_RESPONSE_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

/// SCIM List Response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScimListResponse<T> {
    /// Present on 2.0 envelopes, absent on 1.1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,

    /// Full unpaginated row count of the underlying table.
    pub total_results: i64,

    /// The caller's requested 1-based start, echoed unmodified even
    /// when out of range.
    pub start_index: i64,

    /// Actual number of resources in this page.
    pub items_per_page: i64,

    /// The resources in this page.
    #[serde(rename = "Resources")]
    pub resources: Vec<T>,
}

impl<T> ScimListResponse<T> {
    /// Assemble the envelope; `itemsPerPage` always equals the number
    /// of resources actually returned.
    #[must_use]
    pub fn new(
        version: ScimVersion,
        resources: Vec<T>,
        total_results: i64,
        start_index: i64,
    ) -> Self {
        let items_per_page = resources.len() as i64;
        Self {
            schemas: match version {
                ScimVersion::V20 => Some(vec![LIST_RESPONSE_SCHEMA.to_string()]),
                ScimVersion::V11 => None,
            },
            total_results,
            start_index,
            items_per_page,
            resources,
        }
    }
}

/// Pagination parameters parsed strictly from the query string.
///
/// `startIndex` is 1-based per the SCIM specification. Non-numeric
/// input is a client error rather than a silent default, and a
/// negative `count` is rejected; `count=0` is a valid empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScimPagination {
    pub start_index: i64,
    pub count: i64,
}

impl ScimPagination {
    /// Default 1-based start.
    pub const DEFAULT_START_INDEX: i64 = 1;

    /// Default page size.
    pub const DEFAULT_COUNT: i64 = 100;

    /// Parse pagination from raw query values.
    pub fn from_query(start_index: Option<&str>, count: Option<&str>) -> ScimResult<Self> {
        let start_index = match start_index {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                ScimError::Validation("startIndex must be an integer".to_string())
            })?,
            None => Self::DEFAULT_START_INDEX,
        };

        let count = match count {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ScimError::Validation("count must be an integer".to_string()))?,
            None => Self::DEFAULT_COUNT,
        };

        if count < 0 {
            return Err(ScimError::Validation(
                "count must not be negative".to_string(),
            ));
        }

        Ok(Self { start_index, count })
    }

    /// 0-based SQL offset; an out-of-range `startIndex` below 1 clamps
    /// to the first row while the echoed `startIndex` stays untouched.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.start_index - 1).max(0)
    }

    /// SQL limit.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.count
    }
}
