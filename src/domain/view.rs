//! Enriched and not-found bookmark views returned to the transport layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

use super::bookmark::Bookmark;
use super::track::{StatusEvent, Track, TrackId};

/// A display field that may be absent in two distinct ways.
///
/// `Missing` means the value was never there (user-entry side, rendered
/// `"-"`); `Unknown` means the value should exist but the backing data has
/// drifted (rendered `"Неизвестно"`). Keeping the distinction in one tagged
/// type stops sentinel strings from leaking into the domain logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A present value, already rendered for display.
    Known(String),
    /// Value never existed; displayed as `"-"`.
    Missing,
    /// Value lost to data drift; displayed as `"Неизвестно"`.
    Unknown,
}

impl FieldValue {
    /// Wraps a present value.
    #[must_use]
    pub fn known(value: impl Into<String>) -> Self {
        Self::Known(value.into())
    }

    /// Renders the value, falling back to `Unknown` when absent.
    #[must_use]
    pub fn or_unknown<T: fmt::Display>(value: Option<T>) -> Self {
        value.map_or(Self::Unknown, |v| Self::Known(v.to_string()))
    }

    /// Renders the value, falling back to `Missing` when absent.
    #[must_use]
    pub fn or_missing<T: fmt::Display>(value: Option<T>) -> Self {
        value.map_or(Self::Missing, |v| Self::Known(v.to_string()))
    }

    /// Returns the display string for this field.
    #[must_use]
    pub fn as_display(&self) -> &str {
        match self {
            Self::Known(v) => v,
            Self::Missing => "-",
            Self::Unknown => "Неизвестно",
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_display())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_display())
    }
}

/// Track fields embedded in an enriched bookmark.
#[derive(Debug, Clone, Serialize)]
pub struct TrackDetails {
    /// Track identifier.
    pub id: TrackId,
    /// External carrier tracking number.
    pub tracking_number: String,
    /// Shipment weight, when known.
    pub weight: Option<Decimal>,
    /// Declared price, when known.
    pub price: Option<Decimal>,
    /// Current storage place, when known.
    pub place: Option<String>,
    /// Owning user's contact identifier, once bound.
    pub owner_phone: Option<String>,
}

impl From<&Track> for TrackDetails {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id,
            tracking_number: track.tracking_number.clone(),
            weight: track.weight,
            price: track.price,
            place: track.place.clone(),
            owner_phone: track.owner_phone.clone(),
        }
    }
}

/// A bookmark successfully resolved to its track, with display fields.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedBookmark {
    /// The bookmark's own fields, spread into the view.
    #[serde(flatten)]
    pub bookmark: Bookmark,
    /// Resolved track record.
    pub track_details: TrackDetails,
    /// Status history with resolved labels, oldest first.
    pub history: Vec<StatusEvent>,
    /// Computed price for the requesting user.
    pub price: FieldValue,
    /// Display weight.
    pub weight: FieldValue,
    /// Display place.
    pub place: FieldValue,
}

impl EnrichedBookmark {
    /// Assembles the view from a resolved bookmark, its track, and the
    /// price already computed for the requesting user.
    #[must_use]
    pub fn new(bookmark: Bookmark, track: &Track, price: FieldValue) -> Self {
        Self {
            bookmark,
            track_details: TrackDetails::from(track),
            history: track.history.clone(),
            price,
            weight: FieldValue::or_unknown(track.weight),
            place: FieldValue::or_missing(track.place.as_deref()),
        }
    }
}

/// A bookmark whose track could not be resolved.
#[derive(Debug, Clone, Serialize)]
pub struct NotFoundBookmark {
    /// Tracking number as entered by the user.
    pub tracking_number: String,
    /// When the user added the bookmark.
    pub created_at: DateTime<Utc>,
    /// Free-text description entered by the user.
    pub description: String,
    /// Price placeholder.
    pub price: FieldValue,
    /// Weight placeholder.
    pub weight: FieldValue,
    /// Place placeholder.
    pub place: FieldValue,
}

impl NotFoundBookmark {
    /// View for a bookmark whose tracking number matched no track:
    /// a user-entry miss, all fields `Missing`.
    #[must_use]
    pub fn unmatched(bookmark: &Bookmark) -> Self {
        Self {
            tracking_number: bookmark.tracking_number.clone(),
            created_at: bookmark.created_at,
            description: bookmark.description.clone(),
            price: FieldValue::Missing,
            weight: FieldValue::Missing,
            place: FieldValue::Missing,
        }
    }

    /// View for a bookmark whose previously resolved track no longer
    /// exists: data drift, price and weight `Unknown`.
    #[must_use]
    pub fn vanished(bookmark: &Bookmark) -> Self {
        Self {
            tracking_number: bookmark.tracking_number.clone(),
            created_at: bookmark.created_at,
            description: bookmark.description.clone(),
            price: FieldValue::Unknown,
            weight: FieldValue::Unknown,
            place: FieldValue::Missing,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::bookmark::BookmarkId;

    fn bookmark() -> Bookmark {
        Bookmark {
            id: BookmarkId::new(),
            tracking_number: "RB000000001CN".to_string(),
            track_id: None,
            is_paid: false,
            current_status: None,
            created_at: Utc::now(),
            description: "куртка".to_string(),
        }
    }

    #[test]
    fn sentinels_serialize_to_display_strings() {
        let Ok(missing) = serde_json::to_string(&FieldValue::Missing) else {
            panic!("serialization failed");
        };
        let Ok(unknown) = serde_json::to_string(&FieldValue::Unknown) else {
            panic!("serialization failed");
        };
        let Ok(known) = serde_json::to_string(&FieldValue::known("25.00")) else {
            panic!("serialization failed");
        };
        assert_eq!(missing, "\"-\"");
        assert_eq!(unknown, "\"Неизвестно\"");
        assert_eq!(known, "\"25.00\"");
    }

    #[test]
    fn unmatched_view_uses_dash_sentinels() {
        let view = NotFoundBookmark::unmatched(&bookmark());
        assert_eq!(view.price, FieldValue::Missing);
        assert_eq!(view.weight, FieldValue::Missing);
        assert_eq!(view.place, FieldValue::Missing);
        assert_eq!(view.tracking_number, "RB000000001CN");
    }

    #[test]
    fn vanished_view_marks_price_and_weight_unknown() {
        let view = NotFoundBookmark::vanished(&bookmark());
        assert_eq!(view.price, FieldValue::Unknown);
        assert_eq!(view.weight, FieldValue::Unknown);
        assert_eq!(view.place, FieldValue::Missing);
    }
}
