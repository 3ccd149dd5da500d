//! Storage access for books. Every operation is a single SQL statement.

use libris_db::Database;
use libris_http::error::AppError;
use thiserror::Error;

use super::models::{Book, BookFilter, BookPatch};

macro_rules! book_columns {
    () => {
        "isbn, amazon_url, author, language, pages, publisher, title, year"
    };
}

const SELECT_ALL: &str = concat!("SELECT ", book_columns!(), " FROM books ORDER BY title, isbn");

const SELECT_ONE: &str = concat!("SELECT ", book_columns!(), " FROM books WHERE isbn = ?");

const INSERT: &str = concat!(
    "INSERT INTO books (",
    book_columns!(),
    ") VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING ",
    book_columns!()
);

// NULL binds leave the column untouched.
const UPDATE: &str = concat!(
    "UPDATE books SET ",
    "amazon_url = COALESCE(?, amazon_url), ",
    "author = COALESCE(?, author), ",
    "language = COALESCE(?, language), ",
    "pages = COALESCE(?, pages), ",
    "publisher = COALESCE(?, publisher), ",
    "title = COALESCE(?, title), ",
    "year = COALESCE(?, year) ",
    "WHERE isbn = ? RETURNING ",
    book_columns!()
);

const DELETE: &str = "DELETE FROM books WHERE isbn = ? RETURNING isbn";

#[derive(Debug, Error)]
pub enum BookError {
    #[error("There is no book with an isbn '{0}'")]
    NotFound(String),

    #[error("A book with isbn '{0}' already exists")]
    DuplicateKey(String),

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(_) => AppError::not_found(err.to_string()),
            BookError::DuplicateKey(_) => AppError::conflict(err.to_string()),
            BookError::Storage(e) => AppError::Internal(anyhow::Error::new(e)),
        }
    }
}

/// Reads and writes `books` rows.
#[derive(Clone, Debug)]
pub struct BookRepository {
    db: Database,
}

impl BookRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All books ordered by title.
    pub async fn find_all(&self, filter: &BookFilter) -> Result<Vec<Book>, BookError> {
        tracing::debug!(params = ?filter.params, "listing books");

        let books = sqlx::query_as::<_, Book>(SELECT_ALL)
            .fetch_all(self.db.pool())
            .await?;

        Ok(books)
    }

    pub async fn find_one(&self, isbn: &str) -> Result<Book, BookError> {
        tracing::debug!(isbn, "fetching book");

        sqlx::query_as::<_, Book>(SELECT_ONE)
            .bind(isbn)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| BookError::NotFound(isbn.to_string()))
    }

    /// Insert `book` and return the stored row.
    pub async fn create(&self, book: &Book) -> Result<Book, BookError> {
        tracing::debug!(isbn = %book.isbn, "creating book");

        sqlx::query_as::<_, Book>(INSERT)
            .bind(&book.isbn)
            .bind(&book.amazon_url)
            .bind(&book.author)
            .bind(&book.language)
            .bind(book.pages)
            .bind(&book.publisher)
            .bind(&book.title)
            .bind(book.year)
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    BookError::DuplicateKey(book.isbn.clone())
                } else {
                    BookError::Storage(e)
                }
            })
    }

    /// Apply `patch` to the book and return the updated row.
    pub async fn update(&self, isbn: &str, patch: &BookPatch) -> Result<Book, BookError> {
        tracing::debug!(isbn, "updating book");

        sqlx::query_as::<_, Book>(UPDATE)
            .bind(&patch.amazon_url)
            .bind(&patch.author)
            .bind(&patch.language)
            .bind(patch.pages)
            .bind(&patch.publisher)
            .bind(&patch.title)
            .bind(patch.year)
            .bind(isbn)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| BookError::NotFound(isbn.to_string()))
    }

    pub async fn remove(&self, isbn: &str) -> Result<(), BookError> {
        tracing::debug!(isbn, "removing book");

        sqlx::query_scalar::<_, String>(DELETE)
            .bind(isbn)
            .fetch_optional(self.db.pool())
            .await?
            .map(|_| ())
            .ok_or_else(|| BookError::NotFound(isbn.to_string()))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
