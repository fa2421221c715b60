//! Mapping of domain and validation errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::collections::HashMap;
use validator::ValidationErrors;

use sg_core::errors::{DomainError, VerificationError};
use sg_shared::errors::{error_codes, ErrorResponse};

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error type returned by route handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request data")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<VerificationError> for ApiError {
    fn from(error: VerificationError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl ApiError {
    /// Body sent to the client
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Validation(errors) => validation_response(errors),
            ApiError::Domain(error) => domain_response(error),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::Validation { .. })
            | ApiError::Domain(DomainError::Verification(_)) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Internal { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }
        HttpResponse::build(status).json(self.to_error_response())
    }
}

fn validation_response(errors: &ValidationErrors) -> ErrorResponse {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }

    let message = fields
        .values()
        .flatten()
        .next()
        .cloned()
        .unwrap_or_else(|| "Invalid request data".to_string());

    ErrorResponse::new(error_codes::VALIDATION_ERROR, message).add_detail("fields", fields)
}

fn domain_response(error: &DomainError) -> ErrorResponse {
    match error {
        DomainError::Verification(VerificationError::SendFailed) => {
            ErrorResponse::new(error_codes::SEND_FAILED, error.to_string())
        }
        DomainError::Verification(_) | DomainError::Validation { .. } => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, error.to_string())
        }
        DomainError::NotFound { .. } => ErrorResponse::new(error_codes::NOT_FOUND, error.to_string()),
        DomainError::Internal { .. } => {
            ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_MESSAGE)
        }
    }
}
