//! Data Transfer Objects for REST request/response serialization.
//!
//! Top-level response keys are camelCase to match the wire format the
//! existing clients consume.

pub mod bookmark_dto;

pub use bookmark_dto::*;
