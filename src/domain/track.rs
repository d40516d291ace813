//! Canonical shipment record and its status history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status label that marks a shipment as handed over to the customer.
pub const DELIVERED_LABEL: &str = "Получено";

/// Unique identifier for a [`Track`].
///
/// Wraps a UUID v4. Assigned when a shipment is first observed by the
/// ingestion side and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(uuid::Uuid);

impl TrackId {
    /// Creates a new random `TrackId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `TrackId` from an existing [`uuid::Uuid`].
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

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Domain meaning of a status label, resolved once at ingestion.
///
/// Classification and reconciliation branch on this enum rather than
/// re-comparing the raw label in multiple code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Shipment was handed over to the customer.
    Delivered,
    /// Any other carrier status (in transit, at warehouse, etc.).
    Other,
}

impl StatusKind {
    /// Resolves the kind from a human-readable status label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == DELIVERED_LABEL {
            Self::Delivered
        } else {
            Self::Other
        }
    }
}

/// One entry in a track's status history.
///
/// History entries are read-only from this service's perspective; they are
/// written by the status-update ingestion side. Insertion order is
/// chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEvent {
    /// Identifier of the status catalog entry.
    pub status_id: uuid::Uuid,
    /// Human-readable status label (e.g. `"Получено"`).
    pub status_text: String,
    /// Domain meaning of the label.
    pub kind: StatusKind,
    /// When the carrier reported this status.
    pub recorded_at: DateTime<Utc>,
}

impl StatusEvent {
    /// Builds a status event, resolving [`StatusKind`] from the label.
    #[must_use]
    pub fn new(status_id: uuid::Uuid, status_text: String, recorded_at: DateTime<Utc>) -> Self {
        let kind = StatusKind::from_label(&status_text);
        Self {
            status_id,
            status_text,
            kind,
            recorded_at,
        }
    }
}

/// Canonical shipment record.
///
/// Created externally when a shipment is first observed. This service
/// mutates a track only to bind it to the requesting user; it never
/// deletes tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier.
    pub id: TrackId,
    /// External carrier tracking number.
    pub tracking_number: String,
    /// Shipment weight in kilograms, when known.
    pub weight: Option<Decimal>,
    /// Declared price, when known.
    pub price: Option<Decimal>,
    /// Current storage place, when known.
    pub place: Option<String>,
    /// Contact identifier (phone) of the owning user, once bound.
    pub owner_phone: Option<String>,
    /// Ordered status history, oldest first.
    pub history: Vec<StatusEvent>,
}

impl Track {
    /// Returns the most recent status event, if any.
    #[must_use]
    pub fn current_status(&self) -> Option<&StatusEvent> {
        self.history.last()
    }

    /// Returns `true` if any history entry marks the shipment as delivered.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.history.iter().any(|e| e.kind == StatusKind::Delivered)
    }

    /// Returns `true` if the track is not yet bound to `phone`.
    ///
    /// Binding is idempotent: once the owner matches, repeated calls
    /// report no work to do.
    #[must_use]
    pub fn needs_owner_binding(&self, phone: &str) -> bool {
        self.owner_phone.as_deref() != Some(phone)
    }

    /// Binds the track to the given contact identifier.
    pub fn bind_owner(&mut self, phone: &str) {
        self.owner_phone = Some(phone.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn event(label: &str) -> StatusEvent {
        StatusEvent::new(uuid::Uuid::new_v4(), label.to_string(), Utc::now())
    }

    #[test]
    fn status_kind_resolves_delivered_label() {
        assert_eq!(StatusKind::from_label("Получено"), StatusKind::Delivered);
        assert_eq!(StatusKind::from_label("В пути"), StatusKind::Other);
        assert_eq!(StatusKind::from_label(""), StatusKind::Other);
    }

    #[test]
    fn delivered_detection_scans_full_history() {
        let track = Track {
            id: TrackId::new(),
            tracking_number: "RB123456789CN".to_string(),
            weight: None,
            price: None,
            place: None,
            owner_phone: None,
            history: vec![event("Принято"), event("Получено"), event("Возврат")],
        };
        assert!(track.is_delivered());
    }

    #[test]
    fn not_delivered_without_delivered_entry() {
        let track = Track {
            id: TrackId::new(),
            tracking_number: "RB123456789CN".to_string(),
            weight: None,
            price: None,
            place: None,
            owner_phone: None,
            history: vec![event("Принято"), event("В пути")],
        };
        assert!(!track.is_delivered());
    }

    #[test]
    fn current_status_is_last_entry() {
        let track = Track {
            id: TrackId::new(),
            tracking_number: "RB123456789CN".to_string(),
            weight: None,
            price: None,
            place: None,
            owner_phone: None,
            history: vec![event("Принято"), event("В пути")],
        };
        let Some(current) = track.current_status() else {
            panic!("expected a current status");
        };
        assert_eq!(current.status_text, "В пути");
    }

    #[test]
    fn owner_binding_is_idempotent() {
        let mut track = Track {
            id: TrackId::new(),
            tracking_number: "RB123456789CN".to_string(),
            weight: None,
            price: None,
            place: None,
            owner_phone: None,
            history: vec![],
        };
        assert!(track.needs_owner_binding("+79990001122"));
        track.bind_owner("+79990001122");
        assert!(!track.needs_owner_binding("+79990001122"));
        assert!(track.needs_owner_binding("+79990003344"));
    }
}
