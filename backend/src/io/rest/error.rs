use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;

use crate::domain::{CalendarError, ImportError, RescheduleError};
use crate::storage::StorageError;

/// Error returned by REST handlers, rendered as a status code with a
/// plain text message
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message).into_response(),
            ApiError::Internal(e) => {
                error!("Request failed: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        if let Some(storage_error) = e.downcast_ref::<StorageError>() {
            return match storage_error {
                StorageError::NotFound { .. } => ApiError::NotFound(storage_error.to_string()),
                StorageError::Duplicate { .. } => ApiError::Conflict(storage_error.to_string()),
            };
        }
        if let Some(import_error) = e.downcast_ref::<ImportError>() {
            return ApiError::BadRequest(import_error.to_string());
        }
        ApiError::Internal(e)
    }
}

impl From<CalendarError> for ApiError {
    fn from(e: CalendarError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<RescheduleError> for ApiError {
    fn from(e: RescheduleError) -> Self {
        match e {
            RescheduleError::ItemNotFound(_) => ApiError::NotFound(e.to_string()),
            RescheduleError::Drag(_) => ApiError::Conflict(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_map_to_client_statuses() {
        let not_found = anyhow::Error::from(StorageError::NotFound {
            table: "press_releases",
            id: "x".to_string(),
        });
        assert!(matches!(ApiError::from(not_found), ApiError::NotFound(_)));

        let duplicate = anyhow::Error::from(StorageError::Duplicate {
            table: "press_releases",
            id: "x".to_string(),
        });
        assert_eq!(ApiError::from(duplicate).into_response().status(), StatusCode::CONFLICT);

        let other = anyhow::anyhow!("disk full");
        assert_eq!(
            ApiError::from(other).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
