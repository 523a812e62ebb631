use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform error body returned by every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Numeric HTTP status
    pub status: u16,
    /// Status label, e.g. `NOT_FOUND`
    pub error: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub details: Vec<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: status_label(status),
            timestamp: Utc::now(),
            message: message.into(),
            details,
        }
    }
}

/// Upper snake case label for a status code (`404` -> `NOT_FOUND`)
pub fn status_label(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(StatusCode::NOT_FOUND), "NOT_FOUND");
        assert_eq!(status_label(StatusCode::BAD_REQUEST), "BAD_REQUEST");
        assert_eq!(
            status_label(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            "UNSUPPORTED_MEDIA_TYPE"
        );
        assert_eq!(
            status_label(StatusCode::INTERNAL_SERVER_ERROR),
            "INTERNAL_SERVER_ERROR"
        );
    }

    #[test]
    fn test_api_error_serializes_all_fields() {
        let err = ApiError::new(
            StatusCode::NOT_FOUND,
            "File processing error",
            vec!["missing".to_string()],
        );
        let value = serde_json::to_value(&err).unwrap();

        assert_eq!(value["status"], 404);
        assert_eq!(value["error"], "NOT_FOUND");
        assert_eq!(value["message"], "File processing error");
        assert_eq!(value["details"][0], "missing");
        assert!(value["timestamp"].is_string());
    }
}
