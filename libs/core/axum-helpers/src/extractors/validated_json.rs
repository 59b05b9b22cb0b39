//! JSON extractor that validates the payload before the handler sees it.

use crate::errors::{AppError, ErrorCode, ErrorResponse};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Deserializes the body as JSON, then runs the payload's `Validate` rules.
///
/// Handlers taking `ValidatedJson<T>` never see an invalid `T`: both parse
/// and validation failures are answered before the handler runs, the latter
/// as a 400 whose `details` lists every failing field.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 1, max = 200))]
///     name: String,
/// }
///
/// async fn create_product(ValidatedJson(payload): ValidatedJson<CreateProduct>) -> String {
///     format!("Creating product: {}", payload.name)
/// }
///
/// let app = Router::new().route("/products", post(create_product));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::JsonExtractorRejection(e).into_response())?;

        if let Err(errors) = data.validate() {
            let body = ErrorResponse {
                code: ErrorCode::ValidationError.code(),
                error: ErrorCode::ValidationError.as_str().to_string(),
                message: ErrorCode::ValidationError.default_message().to_string(),
                details: Some(validation_details(&errors)),
            };
            return Err((StatusCode::BAD_REQUEST, axum::Json(body)).into_response());
        }

        Ok(ValidatedJson(data))
    }
}

/// Flattens validator's per-field errors into a JSON object keyed by field.
fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let fields: serde_json::Map<String, serde_json::Value> = errors
        .field_errors()
        .iter()
        .map(|(field, failures)| {
            let entries: Vec<serde_json::Value> = failures
                .iter()
                .map(|failure| {
                    serde_json::json!({
                        "code": failure.code,
                        "message": failure.message,
                        "params": failure.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::json!(entries))
        })
        .collect();

    serde_json::Value::Object(fields)
}
