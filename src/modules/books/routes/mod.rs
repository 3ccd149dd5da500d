//! HTTP handlers for `/books`.

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use libris_http::error::AppError;
use serde_json::Value;

use super::models::{Book, BookEnvelope, BookFilter, BookList, BookPatch, DeleteConfirmation};
use super::repository::BookRepository;
use super::schema::{NEW_BOOK_SCHEMA, UPDATE_BOOK_SCHEMA};

const ISBN_IN_UPDATE: &str = "ISBN cannot be sent within body of update request!";

pub fn router(repository: BookRepository) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/{isbn}", get(get_book).put(update_book).delete(delete_book))
        .with_state(repository)
}

/// GET / => {books: [book, ...]}
async fn list_books(
    State(repository): State<BookRepository>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<BookList>, AppError> {
    let books = repository.find_all(&BookFilter::from(params)).await?;
    Ok(Json(BookList { books }))
}

/// GET /{isbn} => {book: book}
async fn get_book(
    State(repository): State<BookRepository>,
    Path(isbn): Path<String>,
) -> Result<Json<BookEnvelope>, AppError> {
    let book = repository.find_one(&isbn).await?;
    Ok(Json(BookEnvelope { book }))
}

/// POST / bookData => {book: newBook}
async fn create_book(
    State(repository): State<BookRepository>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<BookEnvelope>), AppError> {
    let Json(body) = body?;
    let new_book: Book = NEW_BOOK_SCHEMA.parse(body).map_err(AppError::validation)?;

    let book = repository.create(&new_book).await?;
    tracing::info!(isbn = %book.isbn, "book created");

    Ok((StatusCode::CREATED, Json(BookEnvelope { book })))
}

/// PUT /{isbn} bookData => {book: updatedBook}
async fn update_book(
    State(repository): State<BookRepository>,
    Path(isbn): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BookEnvelope>, AppError> {
    let Json(body) = body?;

    if body.get("isbn").is_some() {
        return Err(AppError::validation(vec![ISBN_IN_UPDATE.to_string()]));
    }

    let patch: BookPatch = UPDATE_BOOK_SCHEMA.parse(body).map_err(AppError::validation)?;

    let book = repository.update(&isbn, &patch).await?;
    tracing::info!(isbn = %book.isbn, "book updated");

    Ok(Json(BookEnvelope { book }))
}

/// DELETE /{isbn} => {message: "Book deleted"}
async fn delete_book(
    State(repository): State<BookRepository>,
    Path(isbn): Path<String>,
) -> Result<Json<DeleteConfirmation>, AppError> {
    repository.remove(&isbn).await?;
    tracing::info!(isbn = %isbn, "book deleted");

    Ok(Json(DeleteConfirmation {
        message: "Book deleted".to_string(),
    }))
}
