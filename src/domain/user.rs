//! User record with its embedded bookmark collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::bookmark::Bookmark;

/// Unique identifier for a [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(uuid::Uuid);

impl UserId {
    /// Creates a new random `UserId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `UserId` from an existing [`uuid::Uuid`].
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

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account record as seen by this service.
///
/// Account management lives elsewhere; only the fields reconciliation and
/// pricing need are modeled. The bookmark collection is embedded and
/// ordered; no bookmark is shared across users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Contact identifier used for track ownership binding.
    pub phone: String,
    /// Per-unit rate overriding declared prices, when negotiated.
    pub personal_rate: Option<Decimal>,
    /// Ordered bookmark collection, oldest first.
    pub bookmarks: Vec<Bookmark>,
}
