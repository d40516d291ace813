//! Domain layer: tracks, bookmarks, users, classification, and views.
//!
//! This module contains the service-side domain model: canonical track
//! records with status history, user-owned bookmarks, the active/archived
//! classifier, page slicing, pricing, and the enriched view types
//! returned to the transport layer.

pub mod bookmark;
pub mod classify;
pub mod page;
pub mod pricing;
pub mod track;
pub mod user;
pub mod view;

pub use bookmark::{Bookmark, BookmarkId};
pub use track::{StatusEvent, StatusKind, Track, TrackId};
pub use user::{User, UserId};
pub use view::{EnrichedBookmark, FieldValue, NotFoundBookmark};
