//! HTTP Basic authentication for the SCIM resource routes.
//!
//! Discovery, health, and the info document stay open; everything
//! under the resource routes is rejected before any handler or store
//! access runs. Credential comparison is constant-time on both
//! components.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use subtle::ConstantTimeEq;

use crate::error::ScimError;
use crate::models::ScimVersion;

/// The credential pair the gateway accepts.
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
    version: ScimVersion,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl BasicAuth {
    /// Create the auth state from configured secrets.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        version: ScimVersion,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            version,
        }
    }

    /// Constant-time comparison of both credential components.
    fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

/// Middleware rejecting requests without valid Basic credentials.
pub async fn basic_auth_middleware(
    State(auth): State<Arc<BasicAuth>>,
    req: Request,
    next: Next,
) -> Response {
    match decode_basic(req.headers().get(header::AUTHORIZATION)) {
        Some((username, password)) if auth.verify(&username, &password) => next.run(req).await,
        _ => ScimError::Unauthorized
            .versioned(auth.version)
            .into_response(),
    }
}

/// Decode `Authorization: Basic <base64(user:pass)>`.
fn decode_basic(value: Option<&axum::http::HeaderValue>) -> Option<(String, String)> {
    let value = value?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
