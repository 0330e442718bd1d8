//! HTTP handlers for the SCIM surface.

pub mod common;
pub mod discovery;
pub mod entitlements;
pub mod health;
pub mod users;
