//! Path extractor for MongoDB ObjectId parameters.

use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;

/// Parses the 24-character hex ObjectId out of a path parameter.
///
/// A malformed id is answered with a 400 envelope naming the offending
/// value, before the handler runs; the storage layer never sees it.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_product(ObjectIdPath(id): ObjectIdPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match ObjectId::parse_str(&id) {
            Ok(object_id) => Ok(ObjectIdPath(object_id)),
            Err(_) => Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid ID format: {}", id),
                ErrorCode::InvalidObjectId,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    async fn show_id(ObjectIdPath(id): ObjectIdPath) -> String {
        id.to_hex()
    }

    fn app() -> Router {
        Router::new().route("/products/{id}", get(show_id))
    }

    #[tokio::test]
    async fn test_valid_object_id_is_extracted() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/products/507f1f77bcf86cd799439011")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"507f1f77bcf86cd799439011");
    }

    #[tokio::test]
    async fn test_malformed_object_id_is_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/products/not-a-hex-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
