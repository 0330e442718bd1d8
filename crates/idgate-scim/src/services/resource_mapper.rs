//! Row-to-resource mapping.
//!
//! One mapper serves both protocol variants; the version drives a
//! structural switch (presence of the `schemas` array, the computed
//! `formatted` name), never a second implementation, so the 1.1 and
//! 2.0 paths cannot drift apart.
//!
//! Attribute presence is decided by the column list the query actually
//! returned, not by the static mapping: a configured column that the
//! result set lacks degrades to the attribute's documented default.
//! Mapping fails only on an empty row or empty column metadata, which
//! signals an internal fault upstream.

use std::collections::HashMap;

use idgate_store::{EntitlementColumns, RowSet, SqlValue, UserColumns};

use crate::error::{ScimError, ScimResult};
use crate::models::{
    EntitlementSummary, ScimEmail, ScimEntitlement, ScimMeta, ScimName, ScimUser, ScimVersion,
};

/// Base path for user resource locations.
///
/// Both variants point here; the 1.1 deployment deliberately keeps the
/// v2 path in `meta.location`.
const USERS_PATH: &str = "/scim/v2/Users";

/// Base path for entitlement resource locations.
const ENTITLEMENTS_PATH: &str = "/scim/v2/Entitlements";

/// Case-sensitive column-name to ordinal index over one result set.
///
/// Built once per result set and shared across its rows.
#[derive(Debug)]
pub struct ColumnIndex<'a> {
    ordinals: HashMap<&'a str, usize>,
}

impl<'a> ColumnIndex<'a> {
    /// Index the returned column names.
    #[must_use]
    pub fn new(columns: &'a [String]) -> Self {
        Self {
            ordinals: columns
                .iter()
                .enumerate()
                .map(|(idx, name)| (name.as_str(), idx))
                .collect(),
        }
    }

    /// Whether the query returned no column metadata at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// The value for a physical column, if the result set returned it.
    fn get<'r>(&self, row: &'r [SqlValue], column: &str) -> Option<&'r SqlValue> {
        self.ordinals.get(column).and_then(|&idx| row.get(idx))
    }
}

/// Maps relational rows onto SCIM resources.
///
/// The mapper is pure: it sees only the row, the returned column
/// names, and the immutable column mappings resolved at startup.
#[derive(Debug, Clone)]
pub struct ResourceMapper {
    version: ScimVersion,
    user_columns: UserColumns,
    entitlement_columns: EntitlementColumns,
}

impl ResourceMapper {
    /// Create a mapper for one protocol variant and column mapping.
    #[must_use]
    pub fn new(
        version: ScimVersion,
        user_columns: UserColumns,
        entitlement_columns: EntitlementColumns,
    ) -> Self {
        Self {
            version,
            user_columns,
            entitlement_columns,
        }
    }

    /// The protocol variant this mapper renders.
    #[must_use]
    pub fn version(&self) -> ScimVersion {
        self.version
    }

    /// Map one user row onto a User resource.
    pub fn map_user(&self, row: &[SqlValue], index: &ColumnIndex<'_>) -> ScimResult<ScimUser> {
        if row.is_empty() || index.is_empty() {
            return Err(ScimError::Internal(
                "cannot map user from empty row or column metadata".to_string(),
            ));
        }

        let cols = &self.user_columns;

        let id_value = index.get(row, &cols.id);
        let id = id_value.map(SqlValue::to_text).unwrap_or_default();
        let location = if id_value.is_some() {
            format!("{USERS_PATH}/{id}")
        } else {
            String::new()
        };

        let first = index.get(row, &cols.first_name);
        let last = index.get(row, &cols.last_name);
        let given_name = first.map(SqlValue::to_text).unwrap_or_default();
        let family_name = last.map(SqlValue::to_text).unwrap_or_default();

        // formatted is a 2.0-only concatenation, rendered empty unless
        // both constituent columns came back with the row.
        let formatted = match self.version {
            ScimVersion::V20 => Some(if first.is_some() && last.is_some() {
                format!("{given_name} {family_name}")
            } else {
                String::new()
            }),
            ScimVersion::V11 => None,
        };

        Ok(ScimUser {
            schemas: self.user_schemas(),
            id,
            user_name: index
                .get(row, &cols.username)
                .map(SqlValue::to_text)
                .unwrap_or_default(),
            name: ScimName {
                given_name,
                family_name,
                formatted,
            },
            emails: vec![ScimEmail::work(
                index
                    .get(row, &cols.email)
                    .map(SqlValue::to_text)
                    .unwrap_or_default(),
            )],
            active: index.get(row, &cols.active).map_or(true, SqlValue::truthy),
            display_name: index
                .get(row, &cols.display_name)
                .and_then(SqlValue::non_empty_text),
            external_id: index
                .get(row, &cols.external_id)
                .and_then(SqlValue::non_empty_text),
            entitlements: None,
            meta: ScimMeta::now("User", location),
        })
    }

    /// Map one entitlement row onto an Entitlement resource.
    pub fn map_entitlement(
        &self,
        row: &[SqlValue],
        index: &ColumnIndex<'_>,
    ) -> ScimResult<ScimEntitlement> {
        if row.is_empty() || index.is_empty() {
            return Err(ScimError::Internal(
                "cannot map entitlement from empty row or column metadata".to_string(),
            ));
        }

        let cols = &self.entitlement_columns;

        let id_value = index.get(row, &cols.id);
        let id = id_value.map(SqlValue::to_text).unwrap_or_default();
        let location = if id_value.is_some() {
            format!("{ENTITLEMENTS_PATH}/{id}")
        } else {
            String::new()
        };

        Ok(ScimEntitlement {
            schemas: match self.version {
                ScimVersion::V20 => Some(vec![ScimEntitlement::SCHEMA.to_string()]),
                ScimVersion::V11 => None,
            },
            id,
            value: index
                .get(row, &cols.value)
                .map(SqlValue::to_text)
                .unwrap_or_default(),
            entitlement_type: index
                .get(row, &cols.entitlement_type)
                .and_then(SqlValue::non_empty_text)
                .unwrap_or_else(|| ScimEntitlement::DEFAULT_TYPE.to_string()),
            display: index
                .get(row, &cols.display)
                .and_then(SqlValue::non_empty_text),
            meta: ScimMeta::now("Entitlement", location),
        })
    }

    /// Build summaries from the association join rows, which arrive in
    /// fixed (id, value, display, type) column order.
    #[must_use]
    pub fn entitlement_summaries(&self, rows: &RowSet) -> Vec<EntitlementSummary> {
        rows.rows
            .iter()
            .filter_map(|row| {
                let value = row.get(1)?.to_text();
                Some(EntitlementSummary {
                    value,
                    entitlement_type: row
                        .get(3)
                        .and_then(SqlValue::non_empty_text)
                        .unwrap_or_else(|| ScimEntitlement::DEFAULT_TYPE.to_string()),
                    display: row.get(2).and_then(SqlValue::non_empty_text),
                })
            })
            .collect()
    }

    fn user_schemas(&self) -> Option<Vec<String>> {
        match self.version {
            ScimVersion::V20 => Some(vec![
                ScimUser::SCHEMA.to_string(),
                ScimUser::ENTERPRISE_SCHEMA.to_string(),
            ]),
            ScimVersion::V11 => None,
        }
    }
}
