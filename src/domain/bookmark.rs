//! User-owned saved reference to a track.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::track::TrackId;

/// Unique identifier for a [`Bookmark`] within the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkId(uuid::Uuid);

impl BookmarkId {
    /// Creates a new random `BookmarkId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `BookmarkId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for BookmarkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's saved reference to a track.
///
/// The tracking number is stored as the user entered it and may predate
/// the track itself. `track_id` is `None` until reconciliation resolves
/// the reference; `current_status` is a denormalized copy of the track's
/// latest status label, refreshed on resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    /// Bookmark identifier.
    pub id: BookmarkId,
    /// Tracking number as entered by the user.
    pub tracking_number: String,
    /// Resolved track reference; `None` means unresolved.
    pub track_id: Option<TrackId>,
    /// Whether the user has paid for this shipment.
    pub is_paid: bool,
    /// Cached copy of the track's latest status label.
    pub current_status: Option<String>,
    /// When the user added the bookmark.
    pub created_at: DateTime<Utc>,
    /// Free-text description entered by the user.
    pub description: String,
}

impl Bookmark {
    /// Records a successful resolution against `track_id` and refreshes
    /// the cached status label.
    pub fn resolve(&mut self, track_id: TrackId, current_status: Option<String>) {
        self.track_id = Some(track_id);
        self.current_status = current_status;
    }
}
