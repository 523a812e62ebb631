use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::core::config::MinIOConfig;
use crate::features::minio::dtos::{BatchDeleteReport, FileResponseDto};
use crate::modules::storage::{
    BucketInfo, ObjectInfo, ObjectStat, ObjectStore, StorageError, StorageResult,
};
use crate::shared::validation::BUCKET_NAME_REGEX;

/// Object content together with its metadata
#[derive(Debug)]
pub struct StoredObject {
    pub stat: ObjectStat,
    pub data: Vec<u8>,
}

/// Facade over the object store
///
/// Every bucket-scoped operation checks that the bucket exists first and
/// reports [`StorageError::BucketNotFound`] otherwise.
pub struct StorageService {
    store: Arc<dyn ObjectStore>,
    presigned_url_expiry_secs: u32,
    max_file_size: usize,
    download_base_url: String,
}

impl StorageService {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        config: &MinIOConfig,
        download_base_url: String,
    ) -> Self {
        Self {
            store,
            presigned_url_expiry_secs: config.presigned_url_expiry_secs,
            max_file_size: config.max_file_size,
            download_base_url,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    async fn ensure_bucket(&self, bucket: &str) -> StorageResult<()> {
        if self.bucket_exists(bucket).await? {
            Ok(())
        } else {
            info!("Bucket '{}' does not exist", bucket);
            Err(StorageError::BucketNotFound(bucket.to_string()))
        }
    }

    pub async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool> {
        let found = self.store.bucket_exists(bucket).await.inspect_err(|e| {
            warn!("Failed to check existence of bucket '{}': {}", bucket, e);
        })?;
        debug!(
            "Bucket '{}' {}",
            bucket,
            if found { "exists" } else { "does not exist" }
        );
        Ok(found)
    }

    /// Create a bucket; an existing bucket is reported as a conflict
    pub async fn make_bucket(&self, bucket: &str) -> StorageResult<()> {
        if !BUCKET_NAME_REGEX.is_match(bucket) {
            return Err(StorageError::InvalidBucketName(bucket.to_string()));
        }

        if self.bucket_exists(bucket).await? {
            info!("Bucket '{}' already exists", bucket);
            return Err(StorageError::BucketAlreadyExists(bucket.to_string()));
        }

        self.store.make_bucket(bucket).await.inspect_err(|e| {
            warn!("Failed to create bucket '{}': {}", bucket, e);
        })?;
        info!("Bucket '{}' created", bucket);
        Ok(())
    }

    pub async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        let buckets = self.store.list_buckets().await.inspect_err(|e| {
            warn!("Failed to list buckets: {}", e);
        })?;
        debug!("Found {} buckets", buckets.len());
        Ok(buckets)
    }

    pub async fn list_bucket_names(&self) -> StorageResult<Vec<String>> {
        let names: Vec<String> = self
            .list_buckets()
            .await?
            .into_iter()
            .map(|bucket| bucket.name)
            .collect();
        info!("Total buckets found: {}", names.len());
        Ok(names)
    }

    pub async fn list_objects(&self, bucket: &str) -> StorageResult<Vec<ObjectInfo>> {
        self.ensure_bucket(bucket).await?;

        self.store.list_objects(bucket).await.inspect_err(|e| {
            warn!("Failed to list objects of bucket '{}': {}", bucket, e);
        })
    }

    pub async fn list_object_names(&self, bucket: &str) -> StorageResult<Vec<String>> {
        let names: Vec<String> = self
            .list_objects(bucket)
            .await?
            .into_iter()
            .map(|object| object.name)
            .collect();
        debug!("Bucket '{}' holds {} objects", bucket, names.len());
        Ok(names)
    }

    /// Delete a bucket whose objects all have zero size
    ///
    /// The zero-size keys are removed first since the store refuses to drop
    /// a bucket that still holds any key.
    pub async fn remove_bucket(&self, bucket: &str) -> StorageResult<()> {
        let objects = self.list_objects(bucket).await?;
        if objects.iter().any(|object| object.size > 0) {
            info!("Bucket '{}' is not empty", bucket);
            return Err(StorageError::BucketNotEmpty(bucket.to_string()));
        }

        for object in &objects {
            self.store
                .remove_object(bucket, &object.name)
                .await
                .inspect_err(|e| {
                    warn!(
                        "Failed to clear '{}' from bucket '{}': {}",
                        object.name, bucket, e
                    );
                })?;
        }

        self.store.remove_bucket(bucket).await.inspect_err(|e| {
            warn!("Failed to remove bucket '{}': {}", bucket, e);
        })?;

        if self.bucket_exists(bucket).await? {
            return Err(StorageError::Backend(format!(
                "Bucket '{}' still exists after removal",
                bucket
            )));
        }

        info!("Bucket '{}' removed", bucket);
        Ok(())
    }

    /// Upload `data` under `filename` and describe the stored file
    pub async fn put_object(
        &self,
        bucket: &str,
        filename: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<FileResponseDto> {
        self.ensure_bucket(bucket).await?;

        let file_size = data.len() as u64;
        self.store
            .put_object(bucket, filename, data, content_type)
            .await
            .inspect_err(|e| {
                warn!("Failed to upload '{}' to bucket '{}': {}", filename, bucket, e);
            })?;

        info!(
            "Uploaded '{}' to bucket '{}': type={}, size={}",
            filename, bucket, content_type, file_size
        );

        Ok(FileResponseDto {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            file_size,
            created_time: Utc::now(),
        })
    }

    pub async fn remove_object(&self, bucket: &str, object: &str) -> StorageResult<()> {
        self.ensure_bucket(bucket).await?;

        self.store.remove_object(bucket, object).await.inspect_err(|e| {
            warn!("Failed to remove '{}' from bucket '{}': {}", object, bucket, e);
        })?;
        info!("Removed '{}' from bucket '{}'", object, bucket);
        Ok(())
    }

    /// Delete every name in `objects`, collecting per-object outcomes
    ///
    /// An empty list is a no-op once the bucket is known to exist.
    pub async fn remove_objects(
        &self,
        bucket: &str,
        objects: &[String],
    ) -> StorageResult<BatchDeleteReport> {
        self.ensure_bucket(bucket).await?;

        let mut report = BatchDeleteReport::default();
        for object in objects {
            match self.store.remove_object(bucket, object).await {
                Ok(()) => report.deleted.push(object.clone()),
                Err(e) => {
                    warn!("Failed to remove '{}' from bucket '{}': {}", object, bucket, e);
                    report.failed.push(object.clone());
                }
            }
        }

        info!(
            "Batch delete on bucket '{}': deleted={}, failed={}",
            bucket,
            report.deleted.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Presigned GET URL for an object
    pub async fn get_object_url(&self, bucket: &str, object: &str) -> StorageResult<String> {
        self.ensure_bucket(bucket).await?;

        let url = self
            .store
            .presigned_get_url(bucket, object, self.presigned_url_expiry_secs)
            .await
            .inspect_err(|e| {
                warn!("Failed to presign '{}' in bucket '{}': {}", object, bucket, e);
            })?;
        debug!("Presigned URL for '{}/{}': {}", bucket, object, url);
        Ok(url)
    }

    pub async fn stat_object(&self, bucket: &str, object: &str) -> StorageResult<ObjectStat> {
        self.ensure_bucket(bucket).await?;

        self.store
            .stat_object(bucket, object)
            .await
            .inspect_err(|e| {
                warn!("Failed to stat '{}' in bucket '{}': {}", object, bucket, e);
            })?
            .ok_or_else(|| StorageError::object_not_found(bucket, object))
    }

    /// Fetch an object; zero-size objects count as missing
    pub async fn get_object(&self, bucket: &str, object: &str) -> StorageResult<StoredObject> {
        let stat = self.stat_object(bucket, object).await?;
        if stat.size == 0 {
            info!("Object '{}' in bucket '{}' is empty", object, bucket);
            return Err(StorageError::object_not_found(bucket, object));
        }

        let data = self.store.get_object(bucket, object).await.inspect_err(|e| {
            warn!("Failed to fetch '{}' from bucket '{}': {}", object, bucket, e);
        })?;
        debug!("Fetched '{}' from bucket '{}' ({} bytes)", object, bucket, data.len());
        Ok(StoredObject { stat, data })
    }

    /// Download link served by this gateway for an object
    pub fn download_url(&self, bucket: &str, object: &str) -> String {
        format!(
            "{}/minio/download/{}/{}",
            self.download_base_url,
            bucket,
            urlencoding::encode(object)
        )
    }
}
