//! Bookmark view DTOs and pagination query parameters.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::view::{EnrichedBookmark, NotFoundBookmark};
use crate::service::bookmark_service::{ArchivePage, OpenBookmarksPage};

/// Lenient page query parameter for both views.
///
/// Absent or non-numeric values fall back to page 1 rather than a 400,
/// so the parameter is taken as a raw string and parsed by hand.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (1-indexed). Defaults to 1 on absent or invalid input.
    #[serde(default)]
    pub page: Option<String>,
}

impl PageQuery {
    /// Returns the effective page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1)
    }
}

/// Response body for `GET /users/{userId}/bookmarks`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenBookmarksResponse {
    /// Enriched bookmarks on the requested page, in input order.
    #[schema(value_type = Vec<Object>)]
    pub updated_bookmarks: Vec<EnrichedBookmark>,
    /// Unresolvable bookmarks on the requested page.
    #[schema(value_type = Vec<Object>)]
    pub not_found_bookmarks: Vec<NotFoundBookmark>,
    /// Pages needed for the full active set.
    pub total_pages: u32,
    /// Size of the full active set.
    pub total_bookmarks: u32,
}

impl From<OpenBookmarksPage> for OpenBookmarksResponse {
    fn from(page: OpenBookmarksPage) -> Self {
        Self {
            updated_bookmarks: page.updated_bookmarks,
            not_found_bookmarks: page.not_found_bookmarks,
            total_pages: page.total_pages,
            total_bookmarks: page.total_bookmarks,
        }
    }
}

/// Response body for `GET /users/{userId}/archive`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveResponse {
    /// Enriched archived bookmarks on the requested page, in input order.
    #[schema(value_type = Vec<Object>)]
    pub updated_bookmarks: Vec<EnrichedBookmark>,
    /// Pages needed for the full archived set.
    pub total_pages: u32,
    /// Size of the full archived set.
    pub total_bookmarks: u32,
}

impl From<ArchivePage> for ArchiveResponse {
    fn from(page: ArchivePage) -> Self {
        Self {
            updated_bookmarks: page.updated_bookmarks,
            total_pages: page.total_pages,
            total_bookmarks: page.total_bookmarks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_page_defaults_to_one() {
        let query = PageQuery { page: None };
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn numeric_page_is_parsed() {
        let query = PageQuery {
            page: Some("3".to_string()),
        };
        assert_eq!(query.page(), 3);
    }

    #[test]
    fn garbage_page_defaults_to_one() {
        let query = PageQuery {
            page: Some("abc".to_string()),
        };
        assert_eq!(query.page(), 1);

        let query = PageQuery {
            page: Some("-2".to_string()),
        };
        assert_eq!(query.page(), 1);
    }
}
