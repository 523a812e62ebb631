//! In-memory [`ObjectStore`] used by unit and HTTP tests

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::{StorageError, StorageResult};
use super::object_store::{BucketInfo, ObjectInfo, ObjectStat, ObjectStore};

struct StoredObject {
    data: Vec<u8>,
    content_type: String,
}

#[derive(Default)]
struct MemoryBucket {
    objects: BTreeMap<String, StoredObject>,
}

#[derive(Default)]
pub struct InMemoryStore {
    buckets: Mutex<BTreeMap<String, MemoryBucket>>,
    failing_keys: Mutex<HashSet<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every removal of `key` fail with a backend error
    pub fn fail_removal_of(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_string());
    }

    pub fn object_count(&self, bucket: &str) -> usize {
        self.buckets
            .lock()
            .unwrap()
            .get(bucket)
            .map(|b| b.objects.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool> {
        Ok(self.buckets.lock().unwrap().contains_key(bucket))
    }

    async fn make_bucket(&self, bucket: &str) -> StorageResult<()> {
        let mut buckets = self.buckets.lock().unwrap();
        if buckets.contains_key(bucket) {
            return Err(StorageError::BucketAlreadyExists(bucket.to_string()));
        }
        buckets.insert(bucket.to_string(), MemoryBucket::default());
        Ok(())
    }

    async fn remove_bucket(&self, bucket: &str) -> StorageResult<()> {
        let mut buckets = self.buckets.lock().unwrap();
        let bucket_entry = buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound(bucket.to_string()))?;

        // S3 refuses DeleteBucket while any key remains, zero-size or not
        if !bucket_entry.objects.is_empty() {
            return Err(StorageError::BucketNotEmpty(bucket.to_string()));
        }
        buckets.remove(bucket);
        Ok(())
    }

    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        Ok(self
            .buckets
            .lock()
            .unwrap()
            .keys()
            .map(|name| BucketInfo { name: name.clone() })
            .collect())
    }

    async fn list_objects(&self, bucket: &str) -> StorageResult<Vec<ObjectInfo>> {
        let buckets = self.buckets.lock().unwrap();
        let bucket_entry = buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound(bucket.to_string()))?;

        Ok(bucket_entry
            .objects
            .iter()
            .map(|(name, object)| ObjectInfo {
                name: name.clone(),
                size: object.data.len() as u64,
            })
            .collect())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        let mut buckets = self.buckets.lock().unwrap();
        let bucket_entry = buckets
            .get_mut(bucket)
            .ok_or_else(|| StorageError::BucketNotFound(bucket.to_string()))?;

        bucket_entry.objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn stat_object(&self, bucket: &str, key: &str) -> StorageResult<Option<ObjectStat>> {
        let buckets = self.buckets.lock().unwrap();
        Ok(buckets
            .get(bucket)
            .and_then(|b| b.objects.get(key))
            .map(|object| ObjectStat {
                size: object.data.len() as u64,
                content_type: Some(object.content_type.clone()),
            }))
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let buckets = self.buckets.lock().unwrap();
        buckets
            .get(bucket)
            .and_then(|b| b.objects.get(key))
            .map(|object| object.data.clone())
            .ok_or_else(|| StorageError::object_not_found(bucket, key))
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(StorageError::Backend(format!(
                "Failed to delete file '{}'",
                key
            )));
        }

        let mut buckets = self.buckets.lock().unwrap();
        // S3 reports success for missing keys
        if let Some(bucket_entry) = buckets.get_mut(bucket) {
            bucket_entry.objects.remove(key);
        }
        Ok(())
    }

    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expiry_secs: u32,
    ) -> StorageResult<String> {
        Ok(format!(
            "http://memory.local/{}/{}?X-Amz-Expires={}",
            bucket, key, expiry_secs
        ))
    }
}
