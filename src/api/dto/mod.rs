//! Data Transfer Objects for REST request/response serialization.
//!
//! All monetary amounts are serialized as JSON strings to prevent
//! precision loss on decimal values.

pub mod analytics_dto;

pub use analytics_dto::*;
