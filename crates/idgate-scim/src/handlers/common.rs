//! Shared helpers for SCIM handlers.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

/// SCIM content type header.
pub const SCIM_CONTENT_TYPE: &str = "application/scim+json";

/// Wrap a serializable body with the SCIM content type.
pub fn scim_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(SCIM_CONTENT_TYPE),
    );
    response
}

/// Raw pagination query parameters.
///
/// Kept as strings so malformed input becomes a SCIM-shaped 400 from
/// the pagination parser instead of an unstructured framework
/// rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub start_index: Option<String>,
    pub count: Option<String>,
}
