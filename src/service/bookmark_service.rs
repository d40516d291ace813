//! Bookmark service: reconciliation, classification, and paging.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::classify::{classify_active, classify_archived};
use crate::domain::page::{page_slice, total_pages};
use crate::domain::pricing::bookmark_price;
use crate::domain::view::{EnrichedBookmark, NotFoundBookmark};
use crate::domain::{Bookmark, Track, User, UserId};
use crate::error::GatewayError;
use crate::persistence::BookmarkStore;

/// Open-bookmarks view: one page of enriched bookmarks plus the page's
/// unresolvable entries, with totals over the full filtered set.
#[derive(Debug)]
pub struct OpenBookmarksPage {
    /// Successfully reconciled bookmarks, in input order.
    pub updated_bookmarks: Vec<EnrichedBookmark>,
    /// Bookmarks whose track could not be resolved, in input order.
    pub not_found_bookmarks: Vec<NotFoundBookmark>,
    /// Pages needed for the full active set.
    pub total_pages: u32,
    /// Size of the full active set, before pagination.
    pub total_bookmarks: u32,
}

/// Archive view: one page of enriched paid-or-delivered bookmarks.
#[derive(Debug)]
pub struct ArchivePage {
    /// Successfully reconciled bookmarks, in input order.
    pub updated_bookmarks: Vec<EnrichedBookmark>,
    /// Pages needed for the full archived set.
    pub total_pages: u32,
    /// Size of the full archived set, before pagination.
    pub total_bookmarks: u32,
}

/// Outcome of reconciling one bookmark.
#[derive(Debug)]
enum Reconciled {
    Enriched(Box<EnrichedBookmark>),
    NotFound(NotFoundBookmark),
}

/// Orchestration layer for the two bookmark views.
///
/// Stateless coordinator over a [`BookmarkStore`]. Each view follows the
/// pattern: load user snapshot → classify → slice the page → reconcile
/// the page concurrently → assemble totals.
#[derive(Debug, Clone)]
pub struct BookmarkService<S> {
    store: Arc<S>,
}

impl<S: BookmarkStore> BookmarkService<S> {
    /// Creates a new `BookmarkService`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Builds the open-bookmarks view for `page` (1-indexed).
    ///
    /// Keeps unresolved bookmarks and bookmarks that are neither paid nor
    /// delivered. Totals cover the full filtered set, not just the page.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UserNotFound`] if the user does not exist,
    /// or [`GatewayError::PersistenceError`] on storage failure.
    pub async fn open_bookmarks(
        &self,
        user_id: UserId,
        page: u32,
    ) -> Result<OpenBookmarksPage, GatewayError> {
        let snapshot = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or(GatewayError::UserNotFound(user_id))?;

        let active = classify_active(&snapshot.user.bookmarks, &snapshot.tracks);
        let total = active.len();
        let current = page_slice(&active, page);

        tracing::debug!(
            %user_id,
            page,
            active = total,
            on_page = current.len(),
            "building open bookmarks view"
        );

        let mut updated_bookmarks = Vec::with_capacity(current.len());
        let mut not_found_bookmarks = Vec::new();
        let outcomes = join_all(
            current
                .iter()
                .map(|b| self.reconcile((*b).clone(), &snapshot.user)),
        )
        .await;
        for outcome in outcomes {
            match outcome? {
                Reconciled::Enriched(enriched) => updated_bookmarks.push(*enriched),
                Reconciled::NotFound(not_found) => not_found_bookmarks.push(not_found),
            }
        }

        Ok(OpenBookmarksPage {
            updated_bookmarks,
            not_found_bookmarks,
            total_pages: total_pages(total),
            total_bookmarks: u32::try_from(total).unwrap_or(u32::MAX),
        })
    }

    /// Builds the archive view for `page` (1-indexed).
    ///
    /// Keeps resolved bookmarks that are paid or delivered. A track that
    /// vanishes between classification and enrichment is dropped from the
    /// page with a warning; the archive view carries no not-found list.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UserNotFound`] if the user does not exist,
    /// or [`GatewayError::PersistenceError`] on storage failure.
    pub async fn archive(&self, user_id: UserId, page: u32) -> Result<ArchivePage, GatewayError> {
        let snapshot = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or(GatewayError::UserNotFound(user_id))?;

        let archived = classify_archived(&snapshot.user.bookmarks, &snapshot.tracks);
        let total = archived.len();
        let current = page_slice(&archived, page);

        tracing::debug!(
            %user_id,
            page,
            archived = total,
            on_page = current.len(),
            "building archive view"
        );

        let mut updated_bookmarks = Vec::with_capacity(current.len());
        let outcomes = join_all(
            current
                .iter()
                .map(|b| self.reconcile((*b).clone(), &snapshot.user)),
        )
        .await;
        for outcome in outcomes {
            match outcome? {
                Reconciled::Enriched(enriched) => updated_bookmarks.push(*enriched),
                Reconciled::NotFound(not_found) => {
                    tracing::warn!(
                        %user_id,
                        tracking_number = %not_found.tracking_number,
                        "archived bookmark lost its track mid-request"
                    );
                }
            }
        }

        Ok(ArchivePage {
            updated_bookmarks,
            total_pages: total_pages(total),
            total_bookmarks: u32::try_from(total).unwrap_or(u32::MAX),
        })
    }

    /// Resolves one bookmark to its track and computes display fields.
    ///
    /// Unresolved bookmarks are looked up by tracking number and bound on
    /// a hit; resolved bookmarks are re-fetched by id. The two miss paths
    /// produce distinct sentinel sets: a number that never matched is a
    /// user-entry miss, a reference that stopped resolving is data drift.
    async fn reconcile(
        &self,
        mut bookmark: Bookmark,
        user: &User,
    ) -> Result<Reconciled, GatewayError> {
        let track = match bookmark.track_id {
            None => {
                let Some(track) = self
                    .store
                    .find_track_by_number(&bookmark.tracking_number)
                    .await?
                else {
                    return Ok(Reconciled::NotFound(NotFoundBookmark::unmatched(&bookmark)));
                };
                bookmark.resolve(
                    track.id,
                    track.current_status().map(|e| e.status_text.clone()),
                );
                self.store.save_bookmark(user.id, &bookmark).await?;
                track
            }
            Some(track_id) => {
                let Some(track) = self.store.find_track_by_id(track_id).await? else {
                    tracing::warn!(
                        %track_id,
                        tracking_number = %bookmark.tracking_number,
                        "bookmark references a track that no longer exists"
                    );
                    return Ok(Reconciled::NotFound(NotFoundBookmark::vanished(&bookmark)));
                };
                track
            }
        };

        let track = self.bind_owner(track, user).await?;
        let price = bookmark_price(&track, user.personal_rate);
        Ok(Reconciled::Enriched(Box::new(EnrichedBookmark::new(
            bookmark, &track, price,
        ))))
    }

    /// Binds the track to the requesting user when unbound or bound to a
    /// different contact. A no-op once the owner matches, so repeated
    /// reconciliations do not rewrite the track.
    async fn bind_owner(&self, mut track: Track, user: &User) -> Result<Track, GatewayError> {
        if track.needs_owner_binding(&user.phone) {
            track.bind_owner(&user.phone);
            self.store.save_track(&track).await?;
        }
        Ok(track)
    }
}
