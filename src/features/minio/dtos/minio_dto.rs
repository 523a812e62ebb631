use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::validation::BUCKET_NAME_REGEX;

/// Response DTO returned after a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponseDto {
    /// Object name the file was stored under
    pub filename: String,
    /// Detected type, e.g. `image/png`
    pub content_type: String,
    /// Size of the file in bytes
    pub file_size: u64,
    pub created_time: DateTime<Utc>,
}

/// Bucket name taken from a path segment or form field
#[derive(Debug, Validate)]
pub struct BucketNameDto {
    #[validate(regex(
        path = *BUCKET_NAME_REGEX,
        message = "bucket name must be 3-63 characters of lowercase letters, digits, dots and hyphens, starting and ending with a letter or digit"
    ))]
    pub bucket_name: String,
}

impl BucketNameDto {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
        }
    }
}

/// Optional query parameters accepted by the upload endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub bucket_name: Option<String>,
}

/// Aggregate result of a batch delete
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchDeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

impl BatchDeleteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
