//! Product catalog resource: list, create, show, update, destroy.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod validation;

use async_trait::async_trait;
use axum::Router;
use pantry_kernel::{InitCtx, Module, Schema};
use serde_json::json;
use std::sync::Arc;

pub use error::{ProductError, ProductResult};
pub use handlers::SharedRepository;
pub use models::{DeleteProductResponse, NewProduct, Product, UpdateProduct};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};

/// Products module: mounts the product resource over a repository
pub struct ProductsModule {
    repository: SharedRepository,
}

impl ProductsModule {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for ProductsModule {
    fn name(&self) -> &'static str {
        "products"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            driver = ?ctx.settings.database.driver,
            "products module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        handlers::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    fn schema(&self) -> Vec<Schema> {
        vec![Schema {
            id: "001_products",
            ddl: postgres::PRODUCTS_TABLE,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "products module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "products module stopped");
        Ok(())
    }
}

/// Create a products module backed by `repository`
pub fn create_module(repository: SharedRepository) -> Arc<dyn Module> {
    Arc::new(ProductsModule::new(repository))
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn product_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Product" }
            }
        }
    })
}

fn id_parameter() -> serde_json::Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Product ID",
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn openapi_fragment() -> serde_json::Value {
    json!({
        "paths": {
            "": {
                "get": {
                    "summary": "List products",
                    "tags": ["Products"],
                    "responses": {
                        "200": {
                            "description": "All products",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Product" }
                                    }
                                }
                            }
                        },
                        "500": error_response("Internal server error")
                    }
                },
                "post": {
                    "summary": "Create product",
                    "tags": ["Products"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CreateProduct" }
                            }
                        }
                    },
                    "responses": {
                        "201": product_response("Product created"),
                        "400": error_response("Body is not JSON"),
                        "422": error_response("Validation error"),
                        "500": error_response("Internal server error")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Show product",
                    "tags": ["Products"],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": product_response("Product found"),
                        "404": error_response("Product not found")
                    }
                },
                "put": {
                    "summary": "Update product",
                    "tags": ["Products"],
                    "parameters": [id_parameter()],
                    "requestBody": {
                        "required": false,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/UpdateProduct" }
                            }
                        }
                    },
                    "responses": {
                        "200": product_response("Product updated"),
                        "404": error_response("Product not found"),
                        "422": error_response("Field has the wrong JSON type")
                    }
                },
                "delete": {
                    "summary": "Delete product",
                    "tags": ["Products"],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": {
                            "description": "Product deleted",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/DeleteProductResponse" }
                                }
                            }
                        },
                        "404": error_response("Product not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Product": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "price": { "type": "number", "format": "double" },
                        "stock": { "type": "integer", "format": "int32" },
                        "created_at": { "type": "string", "format": "date-time" },
                        "updated_at": { "type": "string", "format": "date-time" }
                    },
                    "required": ["id", "name", "description", "price", "stock", "created_at", "updated_at"]
                },
                "CreateProduct": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "example": "Tofu" },
                        "description": { "type": "string", "example": "Fresh tofu" },
                        "price": { "type": "number", "example": 5000 },
                        "stock": { "type": "integer", "example": 20 }
                    },
                    "required": ["name", "description", "price", "stock"]
                },
                "UpdateProduct": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "price": { "type": "number" },
                        "stock": { "type": "integer" }
                    }
                },
                "DeleteProductResponse": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string", "example": "Product deleted" }
                    },
                    "required": ["message"]
                }
            }
        }
    })
}
