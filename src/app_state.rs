//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::postgres::PostgresStore;
use crate::service::BookmarkService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Bookmark service for both view operations.
    pub bookmark_service: Arc<BookmarkService<PostgresStore>>,
}
