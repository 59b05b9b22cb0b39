//! Catalog of stable error codes.
//!
//! Every error envelope the API emits references one of these codes, so the
//! set here is the single place to look when adding a new failure mode. A
//! code carries three views of the same fact: a SCREAMING_SNAKE_CASE string
//! for clients, an integer for log queries and dashboards, and a default
//! message for when the handler has nothing more specific to say.
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifies a failure class independently of HTTP status.
///
/// Several codes can share a status (most database codes render as 500), so
/// clients and alerts key off the code rather than the status line. Codes
/// are append-only; renumbering an existing one breaks consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Path or query parameter is not a valid ObjectId
    InvalidObjectId,

    /// Request body could not be read as JSON
    JsonExtraction,

    /// Requested resource does not exist
    NotFound,

    /// Unexpected server-side failure
    InternalError,

    /// Request lacks valid authentication
    Unauthorized,

    /// Authenticated but not allowed to perform the operation
    Forbidden,

    /// Request conflicts with the current resource state
    Conflict,

    /// Request was well-formed but semantically invalid
    UnprocessableEntity,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Database errors (2000-2999)
    /// No database server could be reached
    DatabaseConnection,

    /// Database authentication or TLS failure
    DatabaseAuth,

    /// Server rejected a database command
    DatabaseCommand,

    /// I/O or DNS failure on the database connection
    DatabaseIo,

    /// Document failed to encode or decode
    DatabaseBson,

    /// Write was not applied
    DatabaseWrite,

    /// Transaction failed
    DatabaseTransaction,

    /// Database error with no more specific code
    DatabaseUnhandled,

    // I/O errors (4000s)
    /// Local I/O failure
    IoError,

    // JSON parsing errors (5000s)
    /// JSON encode or decode failure outside the extractor path
    SerdeJsonError,
}

impl ErrorCode {
    /// String identifier as it appears in the `error` field of responses.
    ///
    /// # Example
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
    /// assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidObjectId => "INVALID_OBJECT_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseConnection => "DATABASE_CONNECTION",
            Self::DatabaseAuth => "DATABASE_AUTH",
            Self::DatabaseCommand => "DATABASE_COMMAND",
            Self::DatabaseIo => "DATABASE_IO",
            Self::DatabaseBson => "DATABASE_BSON",
            Self::DatabaseWrite => "DATABASE_WRITE",
            Self::DatabaseTransaction => "DATABASE_TRANSACTION",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
            Self::IoError => "IO_ERROR",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Numeric form used in the `code` field and in structured log events.
    ///
    /// Ranges group related failures so log queries can match a whole class
    /// at once: 1000-1999 client, 2000-2999 database, 4000s I/O, 5000s
    /// serialization.
    ///
    /// # Example
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ValidationError.code(), 1001);
    /// assert_eq!(ErrorCode::DatabaseCommand.code(), 2003);
    /// ```
    pub fn code(&self) -> i32 {
        match self {
            // Client errors (1000-1999)
            Self::ValidationError => 1001,
            Self::InvalidObjectId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
            Self::Conflict => 1008,
            Self::UnprocessableEntity => 1009,
            Self::ServiceUnavailable => 1010,

            // Database errors (2000-2999)
            Self::DatabaseConnection => 2001,
            Self::DatabaseAuth => 2002,
            Self::DatabaseCommand => 2003,
            Self::DatabaseIo => 2004,
            Self::DatabaseBson => 2005,
            Self::DatabaseWrite => 2006,
            Self::DatabaseTransaction => 2007,
            Self::DatabaseUnhandled => 2099,

            // I/O errors (4000s)
            Self::IoError => 4001,

            // JSON parsing errors (5000s)
            Self::SerdeJsonError => 5001,
        }
    }

    /// Fallback message shown when no handler-specific wording applies.
    ///
    /// Database codes always use these; their driver detail is logged rather
    /// than sent to clients.
    ///
    /// # Example
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(
    ///     ErrorCode::ValidationError.default_message(),
    ///     "Request validation failed"
    /// );
    /// ```
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidObjectId => "Invalid ObjectId format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Insufficient permissions",
            Self::Conflict => "Resource conflict",
            Self::UnprocessableEntity => "Request could not be processed",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseConnection => "Database is unreachable",
            Self::DatabaseAuth => "Database authentication failed",
            Self::DatabaseCommand => "Database command failed",
            Self::DatabaseIo => "Database I/O error",
            Self::DatabaseBson => "Failed to decode database document",
            Self::DatabaseWrite => "Database write failed",
            Self::DatabaseTransaction => "Database transaction error",
            Self::DatabaseUnhandled => "Unhandled database error",
            Self::IoError => "I/O error occurred",
            Self::SerdeJsonError => "JSON serialization error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_identifiers() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::InvalidObjectId.as_str(), "INVALID_OBJECT_ID");
        assert_eq!(ErrorCode::DatabaseCommand.as_str(), "DATABASE_COMMAND");
    }

    #[test]
    fn test_numeric_codes_stay_in_their_ranges() {
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::Conflict.code(), 1008);
        assert_eq!(ErrorCode::ServiceUnavailable.code(), 1010);
        assert_eq!(ErrorCode::DatabaseConnection.code(), 2001);
        assert_eq!(ErrorCode::DatabaseUnhandled.code(), 2099);
        assert_eq!(ErrorCode::SerdeJsonError.code(), 5001);
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(
            ErrorCode::ValidationError.default_message(),
            "Request validation failed"
        );
        assert_eq!(ErrorCode::NotFound.default_message(), "Resource not found");
        assert_eq!(
            ErrorCode::InvalidObjectId.default_message(),
            "Invalid ObjectId format"
        );
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::ServiceUnavailable).unwrap();
        assert_eq!(json, "\"SERVICE_UNAVAILABLE\"");
    }

    #[test]
    fn test_round_trips_through_serde() {
        let code: ErrorCode = serde_json::from_str("\"VALIDATION_ERROR\"").unwrap();
        assert_eq!(code, ErrorCode::ValidationError);
    }
}
