//! Row model shared between the store and the SCIM mappers.
//!
//! A query result is a [`RowSet`]: the ordered column names the query
//! actually returned plus the rows as ordered value tuples. The
//! mappers address values through a name-to-ordinal index built from
//! the returned columns, so a mapped attribute whose column is absent
//! from the result set degrades to its default instead of failing.
//!
//! Rows live for a single request; nothing here is cached.

use chrono::{DateTime, Utc};

/// A single relational value, decoded loosely.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Uuid(uuid::Uuid),
    Timestamp(DateTime<Utc>),
    Null,
}

impl SqlValue {
    /// Whether this value is SQL NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// String form of the value. NULL renders as the empty string.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            SqlValue::Text(s) => s.clone(),
            SqlValue::Int(i) => i.to_string(),
            SqlValue::Float(f) => f.to_string(),
            SqlValue::Bool(b) => b.to_string(),
            SqlValue::Uuid(u) => u.to_string(),
            SqlValue::Timestamp(t) => t.to_rfc3339(),
            SqlValue::Null => String::new(),
        }
    }

    /// String form, or `None` when NULL or empty.
    #[must_use]
    pub fn non_empty_text(&self) -> Option<String> {
        let text = self.to_text();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Boolean coercion mirroring loose relational encodings: integers
    /// are non-zero, text is non-empty, NULL is false.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            SqlValue::Bool(b) => *b,
            SqlValue::Int(i) => *i != 0,
            SqlValue::Float(f) => *f != 0.0,
            SqlValue::Text(s) => !s.is_empty(),
            SqlValue::Uuid(_) | SqlValue::Timestamp(_) => true,
            SqlValue::Null => false,
        }
    }
}

/// An ordered result set: returned column names plus value rows.
///
/// `columns` is the metadata of the executed query, not the static
/// schema mapping. With `SELECT *` the two can diverge in either
/// direction, and attribute presence follows `columns`.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl RowSet {
    /// Create a row set from columns and rows.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the result set has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
