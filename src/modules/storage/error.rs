use s3::error::S3Error;
use thiserror::Error;

/// Outcome of a failed storage operation
///
/// Not-found and precondition failures are distinct variants so callers can
/// decide whether to render a placeholder, a failure message or an HTTP error.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Bucket '{0}' does not exist")]
    BucketNotFound(String),

    #[error("Object '{object}' not found in bucket '{bucket}'")]
    ObjectNotFound { bucket: String, object: String },

    #[error("Bucket '{0}' already exists")]
    BucketAlreadyExists(String),

    #[error("Bucket '{0}' is not empty")]
    BucketNotEmpty(String),

    #[error("Invalid bucket name '{0}'")]
    InvalidBucketName(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn object_not_found(bucket: &str, object: &str) -> Self {
        StorageError::ObjectNotFound {
            bucket: bucket.to_string(),
            object: object.to_string(),
        }
    }

    /// True for the variants that mean "nothing there" rather than "something broke"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::BucketNotFound(_) | StorageError::ObjectNotFound { .. }
        )
    }
}

impl From<S3Error> for StorageError {
    fn from(err: S3Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
