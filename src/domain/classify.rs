//! Active vs. archived bookmark classification.
//!
//! Classification runs against the track snapshot bulk-fetched at the start
//! of a request; it never re-fetches per bookmark. The later enrichment step
//! re-fetches each track, so a track mutated mid-request may be classified
//! on slightly stale data — tolerated skew, not a correctness bug.

use std::collections::HashMap;

use super::bookmark::Bookmark;
use super::track::{Track, TrackId};

/// Track snapshot keyed by identifier, as joined by the store.
pub type TrackMap = HashMap<TrackId, Track>;

/// Returns `true` if the bookmark belongs to the archive view.
///
/// A bookmark archives once it is paid or its track carries a delivered
/// status entry. Unresolved bookmarks never archive; a bookmark whose
/// track reference is missing from the snapshot counts as unresolved.
#[must_use]
pub fn is_archived(bookmark: &Bookmark, tracks: &TrackMap) -> bool {
    match bookmark.track_id.and_then(|id| tracks.get(&id)) {
        Some(track) => bookmark.is_paid || track.is_delivered(),
        None => false,
    }
}

/// Selects the bookmarks shown in the open-bookmarks view.
///
/// Keeps unresolved bookmarks unconditionally and resolved bookmarks whose
/// track is neither paid nor delivered.
#[must_use]
pub fn classify_active<'a>(bookmarks: &'a [Bookmark], tracks: &TrackMap) -> Vec<&'a Bookmark> {
    bookmarks
        .iter()
        .filter(|b| !is_archived(b, tracks))
        .collect()
}

/// Selects the bookmarks shown in the archive view.
///
/// Keeps resolved bookmarks that are paid or delivered; unresolved
/// bookmarks are always excluded.
#[must_use]
pub fn classify_archived<'a>(bookmarks: &'a [Bookmark], tracks: &TrackMap) -> Vec<&'a Bookmark> {
    bookmarks
        .iter()
        .filter(|b| is_archived(b, tracks))
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::bookmark::BookmarkId;
    use crate::domain::track::StatusEvent;
    use chrono::Utc;

    fn bookmark(track_id: Option<TrackId>, is_paid: bool) -> Bookmark {
        Bookmark {
            id: BookmarkId::new(),
            tracking_number: "RB000000001CN".to_string(),
            track_id,
            is_paid,
            current_status: None,
            created_at: Utc::now(),
            description: String::new(),
        }
    }

    fn track(id: TrackId, delivered: bool) -> Track {
        let history = if delivered {
            vec![StatusEvent::new(
                uuid::Uuid::new_v4(),
                "Получено".to_string(),
                Utc::now(),
            )]
        } else {
            vec![StatusEvent::new(
                uuid::Uuid::new_v4(),
                "В пути".to_string(),
                Utc::now(),
            )]
        };
        Track {
            id,
            tracking_number: "RB000000001CN".to_string(),
            weight: None,
            price: None,
            place: None,
            owner_phone: None,
            history,
        }
    }

    #[test]
    fn unresolved_bookmarks_are_always_active() {
        let tracks = TrackMap::new();
        let bookmarks = vec![bookmark(None, false), bookmark(None, true)];

        assert_eq!(classify_active(&bookmarks, &tracks).len(), 2);
        assert!(classify_archived(&bookmarks, &tracks).is_empty());
    }

    #[test]
    fn paid_bookmark_is_archived() {
        let id = TrackId::new();
        let mut tracks = TrackMap::new();
        tracks.insert(id, track(id, false));
        let bookmarks = vec![bookmark(Some(id), true)];

        assert!(classify_active(&bookmarks, &tracks).is_empty());
        assert_eq!(classify_archived(&bookmarks, &tracks).len(), 1);
    }

    #[test]
    fn delivered_bookmark_is_archived() {
        let id = TrackId::new();
        let mut tracks = TrackMap::new();
        tracks.insert(id, track(id, true));
        let bookmarks = vec![bookmark(Some(id), false)];

        assert!(classify_active(&bookmarks, &tracks).is_empty());
        assert_eq!(classify_archived(&bookmarks, &tracks).len(), 1);
    }

    #[test]
    fn resolved_unpaid_undelivered_is_active() {
        let id = TrackId::new();
        let mut tracks = TrackMap::new();
        tracks.insert(id, track(id, false));
        let bookmarks = vec![bookmark(Some(id), false)];

        assert_eq!(classify_active(&bookmarks, &tracks).len(), 1);
        assert!(classify_archived(&bookmarks, &tracks).is_empty());
    }

    #[test]
    fn reference_missing_from_snapshot_counts_as_unresolved() {
        let tracks = TrackMap::new();
        let bookmarks = vec![bookmark(Some(TrackId::new()), true)];

        assert_eq!(classify_active(&bookmarks, &tracks).len(), 1);
        assert!(classify_archived(&bookmarks, &tracks).is_empty());
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let delivered_id = TrackId::new();
        let open_id = TrackId::new();
        let mut tracks = TrackMap::new();
        tracks.insert(delivered_id, track(delivered_id, true));
        tracks.insert(open_id, track(open_id, false));

        let bookmarks = vec![
            bookmark(None, false),
            bookmark(Some(delivered_id), false),
            bookmark(Some(open_id), false),
            bookmark(Some(open_id), true),
        ];

        let active = classify_active(&bookmarks, &tracks);
        let archived = classify_archived(&bookmarks, &tracks);
        assert_eq!(active.len() + archived.len(), bookmarks.len());
        for b in &bookmarks {
            let in_active = active.iter().any(|a| a.id == b.id);
            let in_archived = archived.iter().any(|a| a.id == b.id);
            assert!(in_active != in_archived);
        }
    }
}
