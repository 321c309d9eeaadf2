//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use genre_core::{AuthError, PredictionError, ValidationError};
use serde::Serialize;

/// Request-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    Validation(ValidationError),
    Prediction(PredictionError),
    NotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(AuthError::NotConfigured) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Auth(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Prediction(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Auth(e) => e.to_string(),
            AppError::Validation(e) => e.to_string(),
            AppError::Prediction(e) => e.to_string(),
            AppError::NotFound => "Not Found".to_string(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<PredictionError> for AppError {
    fn from(e: PredictionError) -> Self {
        AppError::Prediction(e)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse { detail: self.detail() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Auth(AuthError::Missing).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Auth(AuthError::Invalid).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Auth(AuthError::NotConfigured).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(ValidationError::Length { expected: 57, actual: 1 }).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(PredictionError::EmptyOutput { stage: "encoder" }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
    }
}
