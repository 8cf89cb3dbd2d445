//! Centralized mapping of domain errors onto HTTP responses.
//!
//! Every handler returns `Result<HttpResponse, ApiError>`; the status code
//! and the `{error, message}` body are decided in exactly one place.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use si_core::errors::DomainError;
use si_shared::types::ErrorBody;

/// Wrapper carrying a domain error across the actix boundary
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ApiError {
    /// Short machine-readable label for the error class
    fn label(&self) -> &'static str {
        match self.0 {
            DomainError::NotFound { .. } => "Not found",
            DomainError::Duplicate { .. } => "Conflict",
            DomainError::Validation { .. } => "Validation error",
            DomainError::Forbidden { .. } => "Forbidden",
            DomainError::Database { .. } => "Server error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Duplicate { .. } => StatusCode::CONFLICT,
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
            DomainError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let DomainError::Database { .. } = self.0 {
            // Storage details stay in the log, not in the response body
            log::error!("storage failure: {}", self.0);
            return HttpResponse::InternalServerError()
                .json(ErrorBody::new("Server error", "Internal server error"));
        }

        HttpResponse::build(self.status_code())
            .json(ErrorBody::new(self.label(), self.0.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::not_found("Item", 7), StatusCode::NOT_FOUND),
            (DomainError::duplicate("taken"), StatusCode::CONFLICT),
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::forbidden("no"), StatusCode::FORBIDDEN),
            (
                DomainError::database("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError(error).status_code(), expected);
        }
    }

    #[test]
    fn test_database_message_is_not_leaked() {
        let response = ApiError(DomainError::database("secret dsn")).error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
