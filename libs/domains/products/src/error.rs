use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ObjectId),

    #[error("No product categories matched the request")]
    NoCategoryResults,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Maps onto the shared envelope for everything that renders a body.
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::NoCategoryResults => {
                AppError::NotFound("No product categories matched the request".to_string())
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(err) => AppError::Database(err),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            // Not-found responses on this API carry no body
            ProductError::NotFound(_) | ProductError::NoCategoryResults => {
                StatusCode::NOT_FOUND.into_response()
            }
            other => {
                let app_error: AppError = other.into();
                app_error.into_response()
            }
        }
    }
}
