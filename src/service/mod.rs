//! Service layer: business logic orchestration.
//!
//! [`BookmarkService`] coordinates the open-bookmarks and archive views:
//! classification, pagination, and per-bookmark reconciliation against
//! the track store.

pub mod bookmark_service;

pub use bookmark_service::BookmarkService;
