//! Persistence layer: storage contract and its backends.
//!
//! Provides the [`BookmarkStore`] trait the service layer calls into,
//! a PostgreSQL implementation backed by `sqlx::PgPool`, and an
//! in-memory implementation used by the test suite and as a standalone
//! demo backend. Saves are best effort; no transaction contract is
//! assumed across calls.

pub mod memory;
pub mod postgres;

use std::future::Future;

use crate::domain::classify::TrackMap;
use crate::domain::{Bookmark, Track, TrackId, User, UserId};
use crate::error::GatewayError;

/// A user joined with the tracks its bookmarks reference.
///
/// The track map is the snapshot classification runs against; it is
/// fetched once per request and intentionally not refreshed before
/// filtering.
#[derive(Debug, Clone)]
pub struct UserSnapshot {
    /// The user record with its embedded bookmarks.
    pub user: User,
    /// Referenced tracks keyed by identifier.
    pub tracks: TrackMap,
}

/// Storage contract required by the bookmark service.
///
/// Methods return `impl Future + Send` so the service stays generic over
/// the backend while remaining usable from multi-threaded handlers.
pub trait BookmarkStore: Send + Sync {
    /// Loads a user with bookmarks and a joined track snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    fn find_user_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<UserSnapshot>, GatewayError>> + Send;

    /// Looks up a track by exact tracking-number match, with resolved
    /// status labels.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    fn find_track_by_number(
        &self,
        tracking_number: &str,
    ) -> impl Future<Output = Result<Option<Track>, GatewayError>> + Send;

    /// Fetches a track by identifier, with resolved status labels.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    fn find_track_by_id(
        &self,
        id: TrackId,
    ) -> impl Future<Output = Result<Option<Track>, GatewayError>> + Send;

    /// Persists a mutated bookmark belonging to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    fn save_bookmark(
        &self,
        user_id: UserId,
        bookmark: &Bookmark,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Persists a mutated track.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    fn save_track(&self, track: &Track) -> impl Future<Output = Result<(), GatewayError>> + Send;
}
