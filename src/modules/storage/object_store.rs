//! Object store abstraction
//!
//! The storage facade talks to the remote store only through [`ObjectStore`],
//! so the MinIO client can be swapped for an in-memory store in tests.

use async_trait::async_trait;

use super::error::StorageResult;

/// A bucket as reported by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    pub name: String,
}

/// An entry of a bucket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub name: String,
    pub size: u64,
}

/// Object metadata returned by a HEAD request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStat {
    pub size: u64,
    pub content_type: Option<String>,
}

/// Raw access to an S3-compatible object store
///
/// Implementations perform exactly one remote call per method and do not
/// check bucket existence themselves.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool>;

    async fn make_bucket(&self, bucket: &str) -> StorageResult<()>;

    /// Fails with `BucketNotEmpty` while any key remains
    async fn remove_bucket(&self, bucket: &str) -> StorageResult<()>;

    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>>;

    async fn list_objects(&self, bucket: &str) -> StorageResult<Vec<ObjectInfo>>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Returns `Ok(None)` when the object does not exist
    async fn stat_object(&self, bucket: &str, key: &str) -> StorageResult<Option<ObjectStat>>;

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

    async fn remove_object(&self, bucket: &str, key: &str) -> StorageResult<()>;

    /// Presigned GET URL valid for `expiry_secs`
    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expiry_secs: u32,
    ) -> StorageResult<String>;
}
