//! SCIM services: mapping, listing, and retrieval.

pub mod entitlement_service;
pub mod resource_mapper;
pub mod user_service;

pub use entitlement_service::EntitlementService;
pub use resource_mapper::{ColumnIndex, ResourceMapper};
pub use user_service::UserService;
