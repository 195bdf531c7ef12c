use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

use super::error::{ProductError, ProductResult};
use super::models::{DeleteProductResponse, Product};
use super::repository::ProductRepository;
use super::validation::{parse_update, validate_new_product};

pub type SharedRepository = Arc<dyn ProductRepository>;

/// Create the product router with all HTTP endpoints
pub fn router(repository: SharedRepository) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(show_product).put(update_product).delete(destroy_product),
        )
        .with_state(repository)
}

/// A non-integer id cannot name a stored product, so it reads as not found.
fn product_id(raw: &str) -> ProductResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ProductError::UnknownId(raw.to_string()))
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> ProductResult<Value> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ProductError::MalformedBody(rejection.body_text()))
}

/// An update may carry no body at all, which supplies no fields.
fn update_body(body: &Bytes) -> ProductResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    json_body(Json::<Value>::from_bytes(body))
}

/// List every product
async fn list_products(State(repository): State<SharedRepository>) -> ProductResult<Json<Vec<Product>>> {
    let products = repository.list().await?;
    Ok(Json(products))
}

/// Validate and store a new product
async fn create_product(
    State(repository): State<SharedRepository>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ProductResult<(StatusCode, Json<Product>)> {
    let body = json_body(payload)?;
    let input = validate_new_product(&body).map_err(ProductError::Validation)?;

    let product = repository.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Fetch one product
async fn show_product(
    State(repository): State<SharedRepository>,
    Path(raw_id): Path<String>,
) -> ProductResult<Json<Product>> {
    let id = product_id(&raw_id)?;
    let product = repository
        .get_by_id(id)
        .await?
        .ok_or(ProductError::NotFound(id))?;
    Ok(Json(product))
}

/// Overwrite the supplied fields of a product
async fn update_product(
    State(repository): State<SharedRepository>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ProductResult<Json<Product>> {
    let id = product_id(&raw_id)?;

    // A missing product is reported before the body is looked at
    if repository.get_by_id(id).await?.is_none() {
        return Err(ProductError::NotFound(id));
    }

    let input = parse_update(&update_body(&body)?).map_err(ProductError::Validation)?;

    let product = repository.update(id, input).await?;
    Ok(Json(product))
}

/// Remove a product permanently
async fn destroy_product(
    State(repository): State<SharedRepository>,
    Path(raw_id): Path<String>,
) -> ProductResult<Json<DeleteProductResponse>> {
    let id = product_id(&raw_id)?;

    if !repository.delete(id).await? {
        return Err(ProductError::NotFound(id));
    }

    Ok(Json(DeleteProductResponse::deleted()))
}
