use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::storage::StorageError;
use crate::shared::types::ApiError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, Vec<String>) {
        match self {
            AppError::Storage(err) => match err {
                StorageError::ObjectNotFound { .. } => (
                    StatusCode::NOT_FOUND,
                    "File processing error",
                    vec![err.to_string()],
                ),
                StorageError::BucketNotFound(_) => {
                    (StatusCode::NOT_FOUND, "Bucket not found", vec![err.to_string()])
                }
                StorageError::InvalidBucketName(_) => {
                    (StatusCode::BAD_REQUEST, "Validation errors", vec![err.to_string()])
                }
                StorageError::BucketAlreadyExists(_) | StorageError::BucketNotEmpty(_) => {
                    (StatusCode::CONFLICT, "Bucket conflict", vec![err.to_string()])
                }
                StorageError::Backend(msg) => {
                    tracing::error!("Storage backend error: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error",
                        vec![err.to_string()],
                    )
                }
            },
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "Validation errors",
                msg.lines().map(str::to_string).collect(),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Invalid request", vec![msg.clone()])
            }
            AppError::MissingParameter(name) => (
                StatusCode::BAD_REQUEST,
                "Missing parameters",
                vec![format!("Parameter {} is missing", name)],
            ),
            AppError::MalformedJson(msg) => (
                StatusCode::BAD_REQUEST,
                "Malformed JSON request",
                vec![msg.clone()],
            ),
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported media type",
                vec![msg.clone()],
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Payload too large",
                vec![msg.clone()],
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = self.parts();

        let body = Json(ApiError::new(status, message, details));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_storage_errors_map_to_status() {
        assert_eq!(
            status_of(StorageError::object_not_found("b", "o").into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StorageError::BucketNotFound("b".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StorageError::BucketAlreadyExists("b".to_string()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(StorageError::InvalidBucketName("B".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(StorageError::Backend("timeout".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors_map_to_status() {
        assert_eq!(
            status_of(AppError::BadRequest("empty".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::MissingParameter("bucketName".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::MalformedJson("eof".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::UnsupportedMediaType("text/plain".to_string())),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            status_of(AppError::PayloadTooLarge("3 MiB".to_string())),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_details() {
        let (_, message, details) = AppError::MissingParameter("file".to_string()).parts();
        assert_eq!(message, "Missing parameters");
        assert_eq!(details, vec!["Parameter file is missing".to_string()]);

        let (_, _, details) =
            AppError::Validation("bucket_name: too short\nother: bad".to_string()).parts();
        assert_eq!(details.len(), 2);
    }
}
