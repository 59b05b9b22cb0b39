pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::error::{Error as MongoError, ErrorKind};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// JSON body sent with every error response.
///
/// Clients can branch on `error` (stable string identifier) or `code`
/// (stable integer); `message` is for humans and may change wording between
/// releases. `details` carries structured context where one exists, such as
/// per-field validation failures.
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "details": null
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable integer code, also attached to log events
    pub code: i32,
    /// Stable machine-readable identifier
    pub error: String,
    /// Human-readable description of what went wrong
    pub message: String,
    /// Structured context, omitted from the JSON when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// The error type handlers return; rendering picks the status and envelope.
///
/// Library errors convert in with `?` through the `#[from]` variants; the
/// string variants are for handler-authored failures where the message is
/// written at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] MongoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid ObjectId: {0}")]
    ObjectIdError(#[from] mongodb::bson::oid::Error),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable Entity: {0}")]
    UnprocessableEntity(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::SerdeJson(e) => {
                tracing::error!(
                    error_code = ErrorCode::SerdeJsonError.code(),
                    "JSON handling failed: {:?}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::SerdeJsonError,
                    ErrorCode::SerdeJsonError.default_message().to_string(),
                    None,
                )
            }
            AppError::Database(e) => map_mongo_error(&e),
            AppError::Io(e) => {
                tracing::error!(
                    error_code = ErrorCode::IoError.code(),
                    "I/O failure: {:?}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::IoError,
                    ErrorCode::IoError.default_message().to_string(),
                    None,
                )
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "Request body rejected: {:?}",
                    e
                );
                // The rejection already knows the right status (400/415/422)
                (e.status(), ErrorCode::JsonExtraction, e.body_text(), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Payload failed validation: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(serde_json::to_value(&e).unwrap_or(serde_json::json!(null))),
                )
            }
            AppError::ObjectIdError(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidObjectId.code(),
                    "ObjectId did not parse: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidObjectId,
                    format!("Invalid ObjectId: {}", e),
                    None,
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError,
                    msg,
                    None,
                )
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg, None)
            }
            AppError::Forbidden(msg) => {
                tracing::info!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, ErrorCode::Forbidden, msg, None)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg, None)
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorCode::Conflict, msg, None)
            }
            AppError::UnprocessableEntity(msg) => {
                tracing::info!("Unprocessable entity: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorCode::UnprocessableEntity,
                    msg,
                    None,
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    msg,
                    None,
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::ServiceUnavailable,
                    msg,
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Decides status and code for a MongoDB driver error.
///
/// Connectivity failures (no reachable server, cleared connection pool) are
/// the only 503s; a load balancer can take the instance out of rotation on
/// those. Everything else is a server-side 500, logged with a code that
/// identifies the `ErrorKind` so the failure class is visible in metrics.
/// Clients always get the code's default message; driver detail stays in
/// the logs.
fn map_mongo_error(
    error: &MongoError,
) -> (StatusCode, ErrorCode, String, Option<serde_json::Value>) {
    let (status, code) = match error.kind.as_ref() {
        ErrorKind::ServerSelection { message, .. } => {
            tracing::warn!(
                error_code = ErrorCode::DatabaseConnection.code(),
                "No reachable database server: {}",
                message
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::DatabaseConnection,
            )
        }
        ErrorKind::ConnectionPoolCleared { message, .. } => {
            tracing::warn!(
                error_code = ErrorCode::DatabaseConnection.code(),
                "Database connection pool cleared: {}",
                message
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::DatabaseConnection,
            )
        }
        ErrorKind::Authentication { message, .. } => {
            tracing::error!(
                error_code = ErrorCode::DatabaseAuth.code(),
                "Database authentication failed: {}",
                message
            );
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseAuth)
        }
        ErrorKind::InvalidTlsConfig { message, .. } => {
            tracing::error!(
                error_code = ErrorCode::DatabaseAuth.code(),
                "Database TLS configuration rejected: {}",
                message
            );
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseAuth)
        }
        ErrorKind::Command(e) => {
            tracing::error!(
                error_code = ErrorCode::DatabaseCommand.code(),
                "Server rejected a command: {} (code {})",
                e.code_name,
                e.code
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseCommand,
            )
        }
        ErrorKind::Write(e) => {
            tracing::error!(
                error_code = ErrorCode::DatabaseWrite.code(),
                "Write did not apply: {:?}",
                e
            );
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseWrite)
        }
        ErrorKind::Io(e) => {
            tracing::error!(
                error_code = ErrorCode::DatabaseIo.code(),
                "I/O failure talking to the database: {:?}",
                e
            );
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseIo)
        }
        ErrorKind::DnsResolve { message, .. } => {
            tracing::error!(
                error_code = ErrorCode::DatabaseIo.code(),
                "Database host did not resolve: {}",
                message
            );
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseIo)
        }
        ErrorKind::BsonSerialization(e) => {
            tracing::error!(
                error_code = ErrorCode::DatabaseBson.code(),
                "Document did not encode: {:?}",
                e
            );
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseBson)
        }
        ErrorKind::BsonDeserialization(e) => {
            tracing::error!(
                error_code = ErrorCode::DatabaseBson.code(),
                "Document did not decode: {:?}",
                e
            );
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseBson)
        }
        ErrorKind::InvalidResponse { message, .. } => {
            tracing::error!(
                error_code = ErrorCode::DatabaseBson.code(),
                "Malformed response from the database: {}",
                message
            );
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseBson)
        }
        ErrorKind::Transaction { message, .. } => {
            tracing::error!(
                error_code = ErrorCode::DatabaseTransaction.code(),
                "Transaction failed: {}",
                message
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseTransaction,
            )
        }
        _ => {
            tracing::error!(
                error_code = ErrorCode::DatabaseUnhandled.code(),
                "Unhandled database error: {:?}",
                error
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseUnhandled,
            )
        }
    };

    (status, code, code.default_message().to_string(), None)
}

/// Builds an error envelope response outside the `AppError` path, for
/// callers like fallback handlers and extractors that produce a `Response`
/// directly.
///
/// ```rust
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::BAD_REQUEST,
///     "Invalid input".to_string(),
///     ErrorCode::ValidationError,
/// );
/// assert_eq!(response.status(), StatusCode::BAD_REQUEST);
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_maps_to_400() {
        let response = AppError::BadRequest("bad input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let response = AppError::Conflict("already exists".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_server_error_maps_to_500() {
        let response = AppError::InternalServerError("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_service_unavailable_maps_to_503() {
        let response = AppError::ServiceUnavailable("down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_object_id_error_maps_to_400() {
        let parse_error = mongodb::bson::oid::ObjectId::parse_str("not-a-hex-id").unwrap_err();
        let response = AppError::ObjectIdError(parse_error).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1))]
            name: String,
        }

        let errors = Probe {
            name: String::new(),
        }
        .validate()
        .unwrap_err();
        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_response_serialization_skips_empty_details() {
        let body = ErrorResponse {
            code: ErrorCode::NotFound.code(),
            error: ErrorCode::NotFound.as_str().to_string(),
            message: "Resource not found".to_string(),
            details: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 1004);
        assert_eq!(json["error"], "NOT_FOUND");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_response_helper() {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            "Invalid input".to_string(),
            ErrorCode::ValidationError,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
