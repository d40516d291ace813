//! PostgreSQL implementation of the persistence layer.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{BookmarkStore, UserSnapshot};
use crate::domain::classify::TrackMap;
use crate::domain::{Bookmark, BookmarkId, StatusEvent, Track, TrackId, User, UserId};
use crate::error::GatewayError;

/// Raw track row before history is attached.
type TrackRow = (
    Uuid,
    String,
    Option<Decimal>,
    Option<Decimal>,
    Option<String>,
    Option<String>,
);

/// Raw history row: track id, status id, status label, recorded at.
type HistoryRow = (Uuid, Uuid, String, DateTime<Utc>);

/// PostgreSQL-backed bookmark store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_tracks(&self, ids: &[Uuid]) -> Result<TrackMap, GatewayError> {
        if ids.is_empty() {
            return Ok(TrackMap::new());
        }

        let rows = sqlx::query_as::<_, TrackRow>(
            "SELECT id, tracking_number, weight, price, place, owner_phone \
             FROM tracks WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        let history_rows = sqlx::query_as::<_, HistoryRow>(
            "SELECT th.track_id, s.id, s.status_text, th.recorded_at \
             FROM track_history th JOIN statuses s ON s.id = th.status_id \
             WHERE th.track_id = ANY($1) ORDER BY th.id ASC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        let mut histories: HashMap<Uuid, Vec<StatusEvent>> = HashMap::new();
        for (track_id, status_id, status_text, recorded_at) in history_rows {
            histories
                .entry(track_id)
                .or_default()
                .push(StatusEvent::new(status_id, status_text, recorded_at));
        }

        let mut tracks = TrackMap::new();
        for row in rows {
            let history = histories.remove(&row.0).unwrap_or_default();
            let track = build_track(row, history);
            tracks.insert(track.id, track);
        }
        Ok(tracks)
    }

    async fn load_single_track(&self, row: Option<TrackRow>) -> Result<Option<Track>, GatewayError> {
        let Some(row) = row else {
            return Ok(None);
        };

        let history_rows = sqlx::query_as::<_, HistoryRow>(
            "SELECT th.track_id, s.id, s.status_text, th.recorded_at \
             FROM track_history th JOIN statuses s ON s.id = th.status_id \
             WHERE th.track_id = $1 ORDER BY th.id ASC",
        )
        .bind(row.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        let history = history_rows
            .into_iter()
            .map(|(_, status_id, status_text, recorded_at)| {
                StatusEvent::new(status_id, status_text, recorded_at)
            })
            .collect();

        Ok(Some(build_track(row, history)))
    }
}

fn build_track(row: TrackRow, history: Vec<StatusEvent>) -> Track {
    let (id, tracking_number, weight, price, place, owner_phone) = row;
    Track {
        id: TrackId::from_uuid(id),
        tracking_number,
        weight,
        price,
        place,
        owner_phone,
        history,
    }
}

impl BookmarkStore for PostgresStore {
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserSnapshot>, GatewayError> {
        let user_row = sqlx::query_as::<_, (Uuid, String, Option<Decimal>)>(
            "SELECT id, phone, personal_rate FROM users WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        let Some((user_id, phone, personal_rate)) = user_row else {
            return Ok(None);
        };

        let bookmark_rows = sqlx::query_as::<_, (
            Uuid,
            String,
            Option<Uuid>,
            bool,
            Option<String>,
            DateTime<Utc>,
            String,
        )>(
            "SELECT id, tracking_number, track_id, is_paid, current_status, created_at, description \
             FROM bookmarks WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        let bookmarks: Vec<Bookmark> = bookmark_rows
            .into_iter()
            .map(
                |(bid, tracking_number, track_id, is_paid, current_status, created_at, description)| {
                    Bookmark {
                        id: BookmarkId::from_uuid(bid),
                        tracking_number,
                        track_id: track_id.map(TrackId::from_uuid),
                        is_paid,
                        current_status,
                        created_at,
                        description,
                    }
                },
            )
            .collect();

        let referenced: Vec<Uuid> = bookmarks
            .iter()
            .filter_map(|b| b.track_id.map(|t| *t.as_uuid()))
            .collect();
        let tracks = self.load_tracks(&referenced).await?;

        Ok(Some(UserSnapshot {
            user: User {
                id: UserId::from_uuid(user_id),
                phone,
                personal_rate,
                bookmarks,
            },
            tracks,
        }))
    }

    async fn find_track_by_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<Track>, GatewayError> {
        let row = sqlx::query_as::<_, TrackRow>(
            "SELECT id, tracking_number, weight, price, place, owner_phone \
             FROM tracks WHERE tracking_number = $1",
        )
        .bind(tracking_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        self.load_single_track(row).await
    }

    async fn find_track_by_id(&self, id: TrackId) -> Result<Option<Track>, GatewayError> {
        let row = sqlx::query_as::<_, TrackRow>(
            "SELECT id, tracking_number, weight, price, place, owner_phone \
             FROM tracks WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        self.load_single_track(row).await
    }

    async fn save_bookmark(
        &self,
        user_id: UserId,
        bookmark: &Bookmark,
    ) -> Result<(), GatewayError> {
        sqlx::query(
            "UPDATE bookmarks SET track_id = $3, current_status = $4 \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(bookmark.id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(bookmark.track_id.map(|t| *t.as_uuid()))
        .bind(bookmark.current_status.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(())
    }

    async fn save_track(&self, track: &Track) -> Result<(), GatewayError> {
        sqlx::query(
            "UPDATE tracks SET owner_phone = $2, weight = $3, price = $4, place = $5 \
             WHERE id = $1",
        )
        .bind(track.id.as_uuid())
        .bind(track.owner_phone.as_deref())
        .bind(track.weight)
        .bind(track.price)
        .bind(track.place.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(())
    }
}
