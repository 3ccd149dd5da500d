use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A catalogued book, keyed by its client-supplied ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Primary identifier; never changes after creation
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    /// Page count, never negative
    pub pages: i64,
    pub publisher: String,
    pub title: String,
    pub year: i64,
}

/// Replacement values for an existing book. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    pub amazon_url: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub pages: Option<i64>,
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub year: Option<i64>,
}

/// Query-string parameters of a listing request.
///
/// Accepted and logged, but they do not narrow the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub params: BTreeMap<String, String>,
}

impl From<BTreeMap<String, String>> for BookFilter {
    fn from(params: BTreeMap<String, String>) -> Self {
        Self { params }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookEnvelope {
    pub book: Book,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookList {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}
