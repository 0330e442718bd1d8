//! SCIM read surface for the idgate gateway.
//!
//! This crate implements the SCIM 1.1 and 2.0 read protocol over an
//! arbitrary relational user table:
//!
//! - Version-parameterized row-to-resource mapping (one mapper, a
//!   structural switch between the 1.1 and 2.0 shapes)
//! - 1-based `startIndex`/`count` pagination with strict parameter
//!   validation
//! - An optional entitlements extension whose lookups degrade instead
//!   of failing the enclosing user operation
//! - Discovery documents, a health probe, and HTTP Basic
//!   authentication on the resource routes
//!
//! # Usage
//!
//! ```rust,ignore
//! use idgate_scim::{scim_router, ScimGatewayConfig};
//!
//! let app = scim_router(config);
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

pub use error::{ScimError, ScimResult, VersionedScimError};
pub use models::ScimVersion;
pub use router::{scim_router, EntitlementsEnabled, ScimGatewayConfig};
