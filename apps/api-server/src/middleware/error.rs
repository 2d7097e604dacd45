//! Error handling - maps failures onto HTTP responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use scribe_core::error::{DomainError, RepoError, ValidationErrors};
use scribe_shared::{ErrorResponse, FieldViolation};
use std::fmt;

/// Application-level error type.
///
/// Rejected ids and pages and missing posts answer with an empty body;
/// everything else carries RFC 7807 problem details.
#[derive(Debug)]
pub enum AppError {
    InvalidPage(String),
    InvalidId(String),
    NotFound(String),
    BadRequest(String),
    Validation(ValidationErrors),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidPage(raw) => write!(f, "Invalid page: {}", raw),
            AppError::InvalidId(raw) => write!(f, "Invalid id: {}", raw),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {}", errors),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPage(_)
            | AppError::InvalidId(_)
            | AppError::BadRequest(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::InvalidPage(_) | AppError::InvalidId(_) | AppError::NotFound(_) => {
                return HttpResponse::build(self.status_code()).finish();
            }
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(errors) => ErrorResponse::validation(
                errors
                    .errors()
                    .iter()
                    .map(|e| FieldViolation {
                        field: e.field.clone(),
                        reason: e.reason.clone(),
                    })
                    .collect(),
            )
            .with_detail(errors.to_string()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error(detail)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidPage(raw) => AppError::InvalidPage(raw),
            DomainError::InvalidId(raw) => AppError::InvalidId(raw),
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match &err {
            RepoError::Connection(msg) => tracing::error!("Database connection error: {}", msg),
            RepoError::Query(msg) => tracing::error!("Database query error: {}", msg),
            RepoError::Serialization(msg) => tracing::error!("Document mapping error: {}", msg),
        }
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body;

    async fn body_bytes(err: AppError) -> (StatusCode, actix_web::web::Bytes) {
        let response = err.error_response();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body()).await.unwrap();
        (status, bytes)
    }

    #[actix_web::test]
    async fn test_rejections_have_empty_bodies() {
        for err in [
            AppError::InvalidPage("0".to_string()),
            AppError::InvalidId("abc".to_string()),
            AppError::NotFound("post".to_string()),
        ] {
            let (status, bytes) = body_bytes(err).await;
            assert!(matches!(status.as_u16(), 400 | 404));
            assert!(bytes.is_empty());
        }
    }

    #[actix_web::test]
    async fn test_validation_body_lists_fields() {
        let mut errors = ValidationErrors::default();
        errors.push("title", "is required");

        let (status, bytes) = body_bytes(AppError::Validation(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["errors"][0]["field"], "title");
        assert_eq!(json["errors"][0]["reason"], "is required");
    }

    #[actix_web::test]
    async fn test_repo_errors_become_500_with_detail() {
        let err = AppError::from(RepoError::Query("boom".to_string()));

        let (status, bytes) = body_bytes(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["detail"], "Query execution failed: boom");
    }
}
