//! SCIM error types and the version-shaped error envelopes.
//!
//! The 1.1 protocol wraps failures as `{"Errors":[{description,code}]}`;
//! 2.0 uses `{"schemas":[...],"status","detail"}`. Every failure path
//! renders one of these two envelopes, never an unstructured message.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use idgate_store::StoreError;

use crate::models::ScimVersion;

/// SCIM 2.0 Error schema URN.
pub const ERROR_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:Error";

/// SCIM API errors.
#[derive(Debug, Error)]
pub enum ScimError {
    /// Missing or invalid Basic credentials.
    #[error("Unauthorized")]
    Unauthorized,

    /// Requested id has no matching row.
    #[error("{0}")]
    NotFound(String),

    /// Malformed request parameters (e.g. non-numeric pagination).
    #[error("{0}")]
    Validation(String),

    /// Internal fault, e.g. a row with no column metadata.
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Store failure; the underlying message is echoed to the caller
    /// since this is an internal admin-facing connector.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ScimError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScimError::Unauthorized => StatusCode::UNAUTHORIZED,
            ScimError::NotFound(_) => StatusCode::NOT_FOUND,
            ScimError::Validation(_) => StatusCode::BAD_REQUEST,
            ScimError::Internal(_) | ScimError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error envelope for the given protocol version.
    #[must_use]
    pub fn to_envelope(&self, version: ScimVersion) -> serde_json::Value {
        let status = self.status_code();
        match version {
            ScimVersion::V20 => serde_json::json!({
                "schemas": [ERROR_SCHEMA],
                "status": status.as_u16().to_string(),
                "detail": self.to_string(),
            }),
            ScimVersion::V11 => serde_json::json!({
                "Errors": [{
                    "description": self.to_string(),
                    "code": status.as_u16().to_string(),
                }]
            }),
        }
    }

    /// Attach the protocol version so the error can become a response.
    #[must_use]
    pub fn versioned(self, version: ScimVersion) -> VersionedScimError {
        VersionedScimError {
            version,
            error: self,
        }
    }
}

/// A [`ScimError`] paired with the protocol version that shapes its
/// envelope.
#[derive(Debug)]
pub struct VersionedScimError {
    pub version: ScimVersion,
    pub error: ScimError,
}

impl IntoResponse for VersionedScimError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = self.error.to_envelope(self.version);

        let mut response = (status, Json(body)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/scim+json"),
        );
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"SCIM\""),
            );
        }
        response
    }
}

/// Result type alias for SCIM operations.
pub type ScimResult<T> = Result<T, ScimError>;
