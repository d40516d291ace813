//! Bookmark view handlers: open bookmarks and archive.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ArchiveResponse, OpenBookmarksResponse, PageQuery};
use crate::app_state::AppState;
use crate::domain::UserId;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /users/{userId}/bookmarks` — One page of the user's open bookmarks.
///
/// # Errors
///
/// Returns [`GatewayError::UserNotFound`] if the user does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/bookmarks",
    tag = "Bookmarks",
    summary = "List open bookmarks",
    description = "Returns one page of the user's bookmarks that are neither paid nor delivered, each resolved against its track, plus the page's unresolvable entries.",
    params(
        ("user_id" = uuid::Uuid, Path, description = "User UUID"),
        PageQuery,
    ),
    responses(
        (status = 200, description = "Open bookmarks page", body = OpenBookmarksResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user_bookmarks(
    State(state): State<AppState>,
    Path(user_id): Path<uuid::Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let page = state
        .bookmark_service
        .open_bookmarks(UserId::from_uuid(user_id), query.page())
        .await?;

    Ok(Json(OpenBookmarksResponse::from(page)))
}

/// `GET /users/{userId}/archive` — One page of the user's archived bookmarks.
///
/// # Errors
///
/// Returns [`GatewayError::UserNotFound`] if the user does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/archive",
    tag = "Bookmarks",
    summary = "List archived bookmarks",
    description = "Returns one page of the user's bookmarks that are paid or delivered, each resolved against its track.",
    params(
        ("user_id" = uuid::Uuid, Path, description = "User UUID"),
        PageQuery,
    ),
    responses(
        (status = 200, description = "Archive page", body = ArchiveResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user_archive(
    State(state): State<AppState>,
    Path(user_id): Path<uuid::Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let page = state
        .bookmark_service
        .archive(UserId::from_uuid(user_id), query.page())
        .await?;

    Ok(Json(ArchiveResponse::from(page)))
}

/// Bookmark view routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}/bookmarks", get(get_user_bookmarks))
        .route("/users/{user_id}/archive", get(get_user_archive))
}
