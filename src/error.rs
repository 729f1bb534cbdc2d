/*
 * Responsibility
 * - AppError shared by middleware and handlers
 * - IntoResponse: status + plain-text reason (500s always carry a message)
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::auth::AuthOutcome;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a rejecting outcome. `None` for `Authenticated`.
    pub fn from_outcome(outcome: AuthOutcome) -> Option<Self> {
        match outcome {
            AuthOutcome::Authenticated { .. } => None,
            AuthOutcome::Unauthorized(reason) => Some(AppError::Unauthorized(reason)),
            AuthOutcome::Forbidden(reason) => Some(AppError::Forbidden(reason)),
            AuthOutcome::InternalError(detail) => Some(AppError::Internal(detail)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Internal(detail) if detail.is_empty() => "internal server error".to_string(),
            other => other.to_string(),
        };

        // String bodies are sent as `text/plain; charset=utf-8`.
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Unauthorized("no token found".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("invalid signature".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Internal(String::new()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_outcome() {
        assert_eq!(
            AppError::from_outcome(AuthOutcome::Forbidden("invalid signature".into())),
            Some(AppError::Forbidden("invalid signature".into()))
        );
        assert_eq!(
            AppError::from_outcome(AuthOutcome::InternalError("x".into())),
            Some(AppError::Internal("x".into()))
        );
    }
}
