//! HTTP handlers for the books collection.
//!
//! Each handler performs its own store calls and turns every store failure
//! into a 500 carrying a fixed message; nothing is retried.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use catalog_db::{Store, StoreError};
use catalog_http::{ApiJson, AppError};

use super::models::{
    Book, BookPayload, CreatedResponse, MessageResponse, BOOK_ADDED, BOOK_DELETED,
    BOOK_NOT_FOUND, BOOK_UPDATED,
};

/// Shared handler state: the store and the collection books live in.
#[derive(Clone)]
pub struct BooksState {
    store: Store,
    collection: Arc<str>,
}

impl BooksState {
    pub fn new(store: Store, collection: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }
}

pub fn router(state: BooksState) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(state)
}

fn store_error(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |e| AppError::internal(message, e)
}

#[tracing::instrument(name = "list_books", skip_all)]
async fn list_books(State(state): State<BooksState>) -> Result<Json<Vec<Book>>, AppError> {
    const FAILED: &str = "Error fetching books";

    let documents = state
        .store
        .list(&state.collection)
        .await
        .map_err(store_error(FAILED))?;

    let books = documents
        .into_iter()
        .map(Book::from_document)
        .collect::<Result<Vec<_>, _>>()
        .map_err(store_error(FAILED))?;

    tracing::debug!(count = books.len(), "books listed");
    Ok(Json(books))
}

#[tracing::instrument(name = "get_book", skip(state))]
async fn get_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    const FAILED: &str = "Error fetching book";

    let document = state
        .store
        .get(&state.collection, &id)
        .await
        .map_err(store_error(FAILED))?
        .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;

    let book = Book::from_document(document).map_err(store_error(FAILED))?;
    Ok(Json(book))
}

#[tracing::instrument(name = "create_book", skip_all)]
async fn create_book(
    State(state): State<BooksState>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;

    let id = state
        .store
        .insert(&state.collection, fields.into_store_fields())
        .await
        .map_err(store_error("Error adding book"))?;

    tracing::info!(%id, "book created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/books/{id}"))],
        Json(CreatedResponse {
            message: BOOK_ADDED.to_string(),
            id,
        }),
    ))
}

#[tracing::instrument(name = "update_book", skip(state, payload))]
async fn update_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    const FAILED: &str = "Error updating book";

    let fields = payload.into_fields()?;

    // Existence check and write are two separate store calls.
    state
        .store
        .get(&state.collection, &id)
        .await
        .map_err(store_error(FAILED))?
        .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;

    match state
        .store
        .update(&state.collection, &id, fields.into_store_fields())
        .await
    {
        Ok(()) => {
            tracing::info!("book updated");
            Ok(Json(MessageResponse::new(BOOK_UPDATED)))
        }
        Err(StoreError::NotFound { .. }) => Err(AppError::not_found(BOOK_NOT_FOUND)),
        Err(e) => Err(AppError::internal(FAILED, e)),
    }
}

#[tracing::instrument(name = "delete_book", skip(state))]
async fn delete_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<&'static str, AppError> {
    const FAILED: &str = "Error deleting book";

    state
        .store
        .get(&state.collection, &id)
        .await
        .map_err(store_error(FAILED))?
        .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;

    match state.store.delete(&state.collection, &id).await {
        Ok(()) => {
            tracing::info!("book deleted");
            Ok(BOOK_DELETED)
        }
        Err(StoreError::NotFound { .. }) => Err(AppError::not_found(BOOK_NOT_FOUND)),
        Err(e) => Err(AppError::internal(FAILED, e)),
    }
}
