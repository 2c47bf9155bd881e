//! Handler outcomes that are not a success
//!
//! The handler vocabulary is deliberately small: *not found* for absent data,
//! *bad request* for a rejected write, and the faults that bubble up from the
//! repository. Each maps to an HTTP status through `IntoResponse`.
//!
//! # Example
//!
//! ```rust
//! use crud_scaffold::handlers::{ApiError, ApiErrorKind, ApiOperation};
//!
//! let error = ApiError::not_found(ApiOperation::Get, "No entity exists with that id")
//!     .with_entity("Registrant", "42");
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.entity_id.as_deref(), Some("42"));
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};

/// Handler operation during which the error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Listing every entity
    List,
    /// Getting a single entity by id
    Get,
    /// Creating a new entity
    Create,
    /// Replacing an existing entity
    Update,
    /// Deleting an entity by id
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of handler error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Requested data is absent
    NotFound,
    /// Write was rejected: no id assigned or zero rows affected
    BadRequest,
    /// Store constraint rejected a write outside of create
    Conflict,
    /// The repository does not back this operation
    NotImplemented,
    /// Store fault that is not transient
    InternalError,
    /// Store could not be reached in time
    ServiceUnavailable,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::Conflict => write!(f, "conflict"),
            Self::NotImplemented => write!(f, "not_implemented"),
            Self::InternalError => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
        }
    }
}

impl ApiErrorKind {
    /// HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Machine-readable error code (`NOT_FOUND`, `BAD_REQUEST`, ...)
    #[must_use]
    pub fn error_code(&self) -> String {
        self.to_string().to_uppercase()
    }

    /// Whether this kind is a server-side fault rather than a domain outcome
    pub const fn is_fault(&self) -> bool {
        matches!(
            self,
            Self::NotImplemented | Self::InternalError | Self::ServiceUnavailable
        )
    }
}

/// Structured handler error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed when the error occurred
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Message returned to the caller
    pub message: String,
    /// The type of entity involved (e.g., "Registrant")
    pub entity_type: Option<String>,
    /// The id of the entity involved
    pub entity_id: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Absent entity or empty collection
    pub fn not_found(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::NotFound, message)
    }

    /// Rejected write
    ///
    /// # Example
    ///
    /// ```rust
    /// use crud_scaffold::handlers::{ApiError, ApiOperation};
    ///
    /// let error = ApiError::bad_request(ApiOperation::Delete, "Failed to delete entity");
    /// assert_eq!(error.kind.status_code().as_u16(), 400);
    /// ```
    pub fn bad_request(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::BadRequest, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Add the entity type without an id
    #[must_use]
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::ServiceUnavailable)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        match (&self.entity_type, &self.entity_id) {
            (Some(entity_type), Some(entity_id)) => write!(f, " [{}: {}]", entity_type, entity_id),
            (Some(entity_type), None) => write!(f, " [{}]", entity_type),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for ApiError {}

/// Response body for API errors
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub(crate) error: String,
    pub(crate) code: String,
    pub(crate) status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) entity_id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        // Domain outcomes were already logged by the handler
        if self.kind.is_fault() {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                retriable = self.is_retriable(),
                "API error: {}", self.message
            );
        } else {
            tracing::debug!(
                operation = %self.operation,
                kind = %self.kind,
                status = status.as_u16(),
                "Responding with {}", self.message
            );
        }

        let response = ApiErrorResponse {
            error: self.message,
            code: self.kind.error_code(),
            status: status.as_u16(),
            operation: Some(self.operation.to_string()),
            entity_type: self.entity_type,
            entity_id: self.entity_id,
        };

        (status, Json(response)).into_response()
    }
}

impl From<RepositoryOperation> for ApiOperation {
    fn from(operation: RepositoryOperation) -> Self {
        match operation {
            RepositoryOperation::FindById | RepositoryOperation::Exists => Self::Get,
            RepositoryOperation::FindAll | RepositoryOperation::Count => Self::List,
            RepositoryOperation::Create => Self::Create,
            RepositoryOperation::Update => Self::Update,
            RepositoryOperation::Delete => Self::Delete,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let kind = match err.kind {
            RepositoryErrorKind::ConstraintViolation => ApiErrorKind::Conflict,
            RepositoryErrorKind::Unimplemented => ApiErrorKind::NotImplemented,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout => {
                ApiErrorKind::ServiceUnavailable
            }
            RepositoryErrorKind::DatabaseError
            | RepositoryErrorKind::SerializationError
            | RepositoryErrorKind::Other => ApiErrorKind::InternalError,
        };

        // Store details never reach the caller
        let message = match kind {
            ApiErrorKind::ServiceUnavailable => "Service temporarily unavailable".to_string(),
            ApiErrorKind::InternalError => "An internal error occurred".to_string(),
            ApiErrorKind::Conflict => "Entity conflicts with an existing entity".to_string(),
            _ => err.message,
        };

        Self {
            operation: err.operation.into(),
            kind,
            message,
            entity_type: err.entity_type,
            entity_id: err.entity_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_kind_status_codes() {
        assert_eq!(ApiErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiErrorKind::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorKind::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiErrorKind::NotImplemented.status_code(),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            ApiErrorKind::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiErrorKind::ServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_api_error_kind_error_codes() {
        assert_eq!(ApiErrorKind::NotFound.error_code(), "NOT_FOUND");
        assert_eq!(ApiErrorKind::BadRequest.error_code(), "BAD_REQUEST");
        assert_eq!(ApiErrorKind::NotImplemented.error_code(), "NOT_IMPLEMENTED");
        assert_eq!(ApiErrorKind::ServiceUnavailable.error_code(), "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn test_domain_outcomes_are_not_faults() {
        assert!(!ApiErrorKind::NotFound.is_fault());
        assert!(!ApiErrorKind::BadRequest.is_fault());
        assert!(ApiErrorKind::NotImplemented.is_fault());
        assert!(ApiErrorKind::InternalError.is_fault());
    }

    #[test]
    fn test_display() {
        let error = ApiError::bad_request(ApiOperation::Update, "Failed to update entity")
            .with_entity("Registrant", "9");
        assert_eq!(
            error.to_string(),
            "API bad_request error during update: Failed to update entity [Registrant: 9]"
        );
    }

    #[test]
    fn test_from_unimplemented_keeps_message() {
        let err = RepositoryError::unimplemented(RepositoryOperation::Exists)
            .with_entity_type("Registrant");
        let api: ApiError = err.into();
        assert_eq!(api.kind, ApiErrorKind::NotImplemented);
        assert_eq!(api.operation, ApiOperation::Get);
        assert!(api.message.contains("not implemented"));
        assert_eq!(api.entity_type.as_deref(), Some("Registrant"));
    }

    #[test]
    fn test_from_connection_failure_hides_details() {
        let err = RepositoryError::connection_failed(
            RepositoryOperation::FindAll,
            "could not reach db.internal:5432",
        );
        let api: ApiError = err.into();
        assert_eq!(api.kind, ApiErrorKind::ServiceUnavailable);
        assert_eq!(api.operation, ApiOperation::List);
        assert_eq!(api.message, "Service temporarily unavailable");
        assert!(api.is_retriable());
    }

    #[test]
    fn test_from_database_error_hides_details() {
        let err = RepositoryError::database_error(
            RepositoryOperation::Delete,
            "relation \"registrants\" does not exist",
        );
        let api: ApiError = err.into();
        assert_eq!(api.kind, ApiErrorKind::InternalError);
        assert_eq!(api.message, "An internal error occurred");
    }

    #[test]
    fn test_from_constraint_violation_is_conflict() {
        let err = RepositoryError::new(
            RepositoryOperation::Update,
            RepositoryErrorKind::ConstraintViolation,
            "duplicate key value violates unique constraint \"registrants_osu_id_key\"",
        )
        .with_entity("Registrant", "4");
        let api: ApiError = err.into();
        assert_eq!(api.kind, ApiErrorKind::Conflict);
        assert_eq!(api.operation, ApiOperation::Update);
        assert_eq!(api.message, "Entity conflicts with an existing entity");
        assert_eq!(api.entity_id.as_deref(), Some("4"));
        assert!(!api.to_string().contains("registrants_osu_id_key"));
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = ApiError::not_found(ApiOperation::List, "No entities exist")
            .with_entity_type("Registrant")
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ApiErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "No entities exist");
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.status, 404);
        assert_eq!(body.operation.as_deref(), Some("list"));
        assert_eq!(body.entity_type.as_deref(), Some("Registrant"));
        assert!(body.entity_id.is_none());
    }
}
