//! Book marketplace handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use campus_core::enums::BookStatus;
use campus_db::repos::NewBook;
use campus_db::updates::BookUpdate;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::SharedState;
use crate::utils::PageQuery;

#[derive(Deserialize)]
pub struct BookFilter {
    status: Option<BookStatus>,
}

pub async fn list_books_handler(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Query(query): Query<PageQuery>,
    Query(filter): Query<BookFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let books = state
        .service
        .list_books(filter.status, state.page(&query))
        .await?;
    Ok(Json(books))
}

pub async fn create_book_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(new): Json<NewBook>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.service.create_book_listing(user.id(), &new).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn get_book_handler(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Path(book_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.get_book_listing(&book_id).await?))
}

/// Seller-only edit, including status moves along the listing lifecycle.
///
/// When the image list is replaced, dropped images are removed from object
/// storage if the seller uploaded them and no other row still uses them.
pub async fn update_book_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(book_id): Path<String>,
    Json(update): Json<BookUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let previous_images = if update.images.is_some() {
        state.service.get_book(&book_id).await?.images
    } else {
        Vec::new()
    };

    let book = state.service.update_book(user.id(), &book_id, update).await?;

    let owned_prefix = format!("{}/", user.id());
    for url in previous_images.iter().filter(|url| !book.images.contains(url)) {
        let Some((bucket, path)) = state.storage.locate(url) else {
            continue;
        };
        if !path.starts_with(&owned_prefix) || path.split('/').any(|part| part == "..") {
            continue;
        }
        match state.service.is_url_referenced(url).await {
            Ok(false) => {}
            Ok(true) => continue,
            Err(error) => {
                tracing::warn!(%error, %url, "skipping image cleanup, reference check failed");
                continue;
            }
        }
        if let Err(error) = state.storage.delete(bucket, &path).await {
            tracing::warn!(%error, %url, "failed to delete replaced book image");
        }
    }

    Ok(Json(book))
}
