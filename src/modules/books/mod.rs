pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use catalog_db::Store;
use catalog_kernel::{InitCtx, Module};

use routes::BooksState;

/// Books module: the five catalog routes over one store collection
pub struct BooksModule {
    state: BooksState,
    collection: String,
}

impl BooksModule {
    pub fn new(store: Store, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        Self {
            state: BooksState::new(store, collection.as_str()),
            collection,
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
            backend = ctx.store.backend(),
            collection = %self.collection,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "$ref": "#/components/schemas/ErrorResponse"
                }
            }
        }
    })
}

fn json_response(description: &str, schema: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": schema
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let book_ref = serde_json::json!({ "$ref": "#/components/schemas/Book" });
    let payload_body = serde_json::json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookPayload" }
            }
        }
    });
    let id_param = serde_json::json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    }]);
    let text_field = |description: &str| {
        serde_json::json!({
            "type": "string",
            "description": description
        })
    };

    serde_json::json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": json_response(
                            "Every book, in store order",
                            serde_json::json!({ "type": "array", "items": book_ref }),
                        ),
                        "500": error_response("Store failure")
                    }
                },
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": payload_body,
                    "responses": {
                        "201": json_response(
                            "Book added",
                            serde_json::json!({ "$ref": "#/components/schemas/CreatedResponse" }),
                        ),
                        "400": error_response("Missing required fields"),
                        "500": error_response("Store failure")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "responses": {
                        "200": json_response("The book", book_ref.clone()),
                        "404": error_response("Book not found"),
                        "500": error_response("Store failure")
                    }
                },
                "put": {
                    "summary": "Replace the four fields of a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "requestBody": payload_body,
                    "responses": {
                        "200": json_response(
                            "Book updated",
                            serde_json::json!({ "$ref": "#/components/schemas/MessageResponse" }),
                        ),
                        "400": error_response("Missing required fields"),
                        "404": error_response("Book not found"),
                        "500": error_response("Store failure")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "responses": {
                        "200": {
                            "description": "Book deleted",
                            "content": {
                                "text/plain": {
                                    "schema": { "type": "string" }
                                }
                            }
                        },
                        "404": error_response("Book not found"),
                        "500": error_response("Store failure")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": text_field("Store-assigned identifier"),
                        "title": text_field("Title of the book"),
                        "author": text_field("Author of the book"),
                        "genre": text_field("Genre of the book"),
                        "language": text_field("Language the book is written in")
                    },
                    "required": ["id", "title", "author", "genre", "language"]
                },
                "BookPayload": {
                    "type": "object",
                    "properties": {
                        "title": text_field("Title of the book"),
                        "author": text_field("Author of the book"),
                        "genre": text_field("Genre of the book"),
                        "language": text_field("Language the book is written in")
                    },
                    "required": ["title", "author", "genre", "language"]
                },
                "MessageResponse": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" }
                    },
                    "required": ["message"]
                },
                "CreatedResponse": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "id": { "type": "string" }
                    },
                    "required": ["message", "id"]
                }
            }
        }
    })
}

/// Create a new instance of the books module
pub fn create_module(store: Store, collection: impl Into<String>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store, collection))
}
