//! In-memory implementation of the persistence layer.
//!
//! Backs the test suite and the standalone demo mode. Data lives in
//! `RwLock<HashMap>` maps, so concurrent reconciliations see the same
//! last-write-wins behavior as a real backend.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{BookmarkStore, UserSnapshot};
use crate::domain::classify::TrackMap;
use crate::domain::{Bookmark, Track, TrackId, User, UserId};
use crate::error::GatewayError;

/// Map-backed bookmark store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    tracks: RwLock<HashMap<TrackId, Track>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user record.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Inserts or replaces a track record.
    pub async fn insert_track(&self, track: Track) {
        self.tracks.write().await.insert(track.id, track);
    }

    /// Returns a copy of the stored track, if present.
    pub async fn track(&self, id: TrackId) -> Option<Track> {
        self.tracks.read().await.get(&id).cloned()
    }

    /// Returns a copy of the stored user, if present.
    pub async fn user(&self, id: UserId) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// Removes a track, simulating external deletion.
    pub async fn remove_track(&self, id: TrackId) -> Option<Track> {
        self.tracks.write().await.remove(&id)
    }
}

impl BookmarkStore for MemoryStore {
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserSnapshot>, GatewayError> {
        let users = self.users.read().await;
        let Some(user) = users.get(&id).cloned() else {
            return Ok(None);
        };
        drop(users);

        let tracks = self.tracks.read().await;
        let mut joined = TrackMap::new();
        for bookmark in &user.bookmarks {
            if let Some(track_id) = bookmark.track_id
                && let Some(track) = tracks.get(&track_id)
            {
                joined.insert(track_id, track.clone());
            }
        }

        Ok(Some(UserSnapshot {
            user,
            tracks: joined,
        }))
    }

    async fn find_track_by_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<Track>, GatewayError> {
        let tracks = self.tracks.read().await;
        Ok(tracks
            .values()
            .find(|t| t.tracking_number == tracking_number)
            .cloned())
    }

    async fn find_track_by_id(&self, id: TrackId) -> Result<Option<Track>, GatewayError> {
        Ok(self.tracks.read().await.get(&id).cloned())
    }

    async fn save_bookmark(
        &self,
        user_id: UserId,
        bookmark: &Bookmark,
    ) -> Result<(), GatewayError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&user_id) else {
            return Err(GatewayError::PersistenceError(format!(
                "user {user_id} not in store"
            )));
        };
        match user.bookmarks.iter_mut().find(|b| b.id == bookmark.id) {
            Some(stored) => *stored = bookmark.clone(),
            None => user.bookmarks.push(bookmark.clone()),
        }
        Ok(())
    }

    async fn save_track(&self, track: &Track) -> Result<(), GatewayError> {
        self.tracks.write().await.insert(track.id, track.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BookmarkId;
    use chrono::Utc;

    fn user_with_bookmark(track_id: Option<TrackId>) -> User {
        User {
            id: UserId::new(),
            phone: "+79990001122".to_string(),
            personal_rate: None,
            bookmarks: vec![Bookmark {
                id: BookmarkId::new(),
                tracking_number: "RB000000001CN".to_string(),
                track_id,
                is_paid: false,
                current_status: None,
                created_at: Utc::now(),
                description: String::new(),
            }],
        }
    }

    fn track() -> Track {
        Track {
            id: TrackId::new(),
            tracking_number: "RB000000001CN".to_string(),
            weight: None,
            price: None,
            place: None,
            owner_phone: None,
            history: vec![],
        }
    }

    #[tokio::test]
    async fn snapshot_joins_referenced_tracks() {
        let store = MemoryStore::new();
        let t = track();
        let track_id = t.id;
        store.insert_track(t).await;
        let user = user_with_bookmark(Some(track_id));
        let user_id = user.id;
        store.insert_user(user).await;

        let Ok(Some(snapshot)) = store.find_user_by_id(user_id).await else {
            panic!("expected snapshot");
        };
        assert!(snapshot.tracks.contains_key(&track_id));
    }

    #[tokio::test]
    async fn missing_user_yields_none() {
        let store = MemoryStore::new();
        let Ok(result) = store.find_user_by_id(UserId::new()).await else {
            panic!("lookup failed");
        };
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn lookup_by_tracking_number() {
        let store = MemoryStore::new();
        store.insert_track(track()).await;

        let Ok(found) = store.find_track_by_number("RB000000001CN").await else {
            panic!("lookup failed");
        };
        assert!(found.is_some());

        let Ok(missing) = store.find_track_by_number("ZZ999").await else {
            panic!("lookup failed");
        };
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn save_bookmark_updates_in_place() {
        let store = MemoryStore::new();
        let user = user_with_bookmark(None);
        let user_id = user.id;
        let Some(mut bookmark) = user.bookmarks.first().cloned() else {
            panic!("expected a bookmark");
        };
        store.insert_user(user).await;

        let track_id = TrackId::new();
        bookmark.resolve(track_id, Some("В пути".to_string()));
        let Ok(()) = store.save_bookmark(user_id, &bookmark).await else {
            panic!("save failed");
        };

        let Some(stored) = store.user(user_id).await else {
            panic!("user vanished");
        };
        let Some(first) = stored.bookmarks.first() else {
            panic!("expected a bookmark");
        };
        assert_eq!(first.track_id, Some(track_id));
    }
}
