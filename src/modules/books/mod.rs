pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;

use async_trait::async_trait;
use axum::Router;
use libris_db::Database;
use libris_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use repository::BookRepository;

/// Book catalogue: CRUD over the `books` table
pub struct BooksModule {
    repository: BookRepository,
}

impl BooksModule {
    pub fn new(db: Database) -> Self {
        Self {
            repository: BookRepository::new(db),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book_response = json!({
            "description": "A single book",
            "content": {
                "application/json": {
                    "schema": {
                        "type": "object",
                        "properties": { "book": { "$ref": "#/components/schemas/Book" } },
                        "required": ["book"]
                    }
                }
            }
        });
        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let isbn_parameter = json!({
            "name": "isbn",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });

        let collection = json!({
            "get": {
                "summary": "List books",
                "tags": ["Books"],
                "responses": {
                    "200": {
                        "description": "Every stored book, ordered by title",
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "books": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    },
                                    "required": ["books"]
                                }
                            }
                        }
                    },
                    "500": error_response("Internal server error")
                }
            },
            "post": {
                "summary": "Create a book",
                "tags": ["Books"],
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/Book" }
                        }
                    }
                },
                "responses": {
                    "201": book_response.clone(),
                    "400": error_response("Validation error"),
                    "409": error_response("ISBN already exists"),
                    "500": error_response("Internal server error")
                }
            }
        });

        let deleted = json!({
            "description": "Book deleted",
            "content": {
                "application/json": {
                    "schema": {
                        "type": "object",
                        "properties": { "message": { "type": "string" } },
                        "required": ["message"]
                    }
                }
            }
        });

        let item = json!({
            "get": {
                "summary": "Get a book by ISBN",
                "tags": ["Books"],
                "parameters": [isbn_parameter.clone()],
                "responses": {
                    "200": book_response.clone(),
                    "404": error_response("Book not found"),
                    "500": error_response("Internal server error")
                }
            },
            "put": {
                "summary": "Update a book",
                "tags": ["Books"],
                "parameters": [isbn_parameter.clone()],
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/BookPatch" }
                        }
                    }
                },
                "responses": {
                    "200": book_response,
                    "400": error_response("Validation error or isbn in body"),
                    "404": error_response("Book not found"),
                    "500": error_response("Internal server error")
                }
            },
            "delete": {
                "summary": "Delete a book",
                "tags": ["Books"],
                "parameters": [isbn_parameter],
                "responses": {
                    "200": deleted,
                    "404": error_response("Book not found"),
                    "500": error_response("Internal server error")
                }
            }
        });

        let book_schema = json!({
            "type": "object",
            "properties": {
                "isbn": { "type": "string" },
                "amazon_url": { "type": "string" },
                "author": { "type": "string" },
                "language": { "type": "string" },
                "pages": { "type": "integer", "minimum": 0 },
                "publisher": { "type": "string" },
                "title": { "type": "string" },
                "year": { "type": "integer" }
            },
            "required": [
                "isbn", "amazon_url", "author", "language",
                "pages", "publisher", "title", "year"
            ]
        });

        let patch_schema = json!({
            "type": "object",
            "properties": {
                "amazon_url": { "type": "string" },
                "author": { "type": "string" },
                "language": { "type": "string" },
                "pages": { "type": "integer", "minimum": 0 },
                "publisher": { "type": "string" },
                "title": { "type": "string" },
                "year": { "type": "integer" }
            }
        });

        Some(json!({
            "paths": {
                "/": collection,
                "/{isbn}": item
            },
            "components": {
                "schemas": {
                    "Book": book_schema,
                    "BookPatch": patch_schema
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS books (
                    isbn       TEXT PRIMARY KEY,
                    amazon_url TEXT NOT NULL,
                    author     TEXT NOT NULL,
                    language   TEXT NOT NULL,
                    pages      INTEGER NOT NULL CHECK (pages >= 0),
                    publisher  TEXT NOT NULL,
                    title      TEXT NOT NULL,
                    year       INTEGER NOT NULL
                );
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module backed by `db`
pub fn create_module(db: Database) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(db))
}
