use axum::response::{IntoResponse, Response};
use pantry_http::AppError;
use thiserror::Error;

use super::validation::FieldError;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(i64),

    #[error("Product {0} not found")]
    UnknownId(String),

    #[error("The given data was invalid.")]
    Validation(Vec<FieldError>),

    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) | ProductError::UnknownId(_) => {
                AppError::not_found(err.to_string())
            }
            ProductError::Validation(ref errors) => {
                let details = errors
                    .iter()
                    .map(|e| serde_json::json!({"field": e.field, "error": e.error}))
                    .collect();
                AppError::validation(details, err.to_string())
            }
            ProductError::MalformedBody(message) => AppError::bad_request(message),
            ProductError::Store(e) => AppError::Internal(anyhow::Error::new(e).context("product store failure")),
            ProductError::Internal(message) => AppError::Internal(anyhow::anyhow!(message)),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
