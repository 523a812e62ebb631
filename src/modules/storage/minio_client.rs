//! MinIO/S3-compatible storage client
//!
//! Implements [`ObjectStore`] on top of the rust-s3 crate. A lightweight
//! `Bucket` handle is built per call since every request may target a
//! different bucket.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info, warn};

use super::error::{StorageError, StorageResult};
use super::object_store::{BucketInfo, ObjectInfo, ObjectStat, ObjectStore};
use crate::core::config::MinIOConfig;

/// MinIO/S3-compatible storage client
pub struct MinIOClient {
    region: Region,
    credentials: Credentials,
}

impl MinIOClient {
    /// Create a new MinIO client from configuration
    pub fn new(config: &MinIOConfig) -> StorageResult<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| {
            StorageError::Backend(format!("Failed to create MinIO credentials: {}", e))
        })?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        info!("MinIO client initialized for endpoint: {}", config.endpoint);

        Ok(Self {
            region,
            credentials,
        })
    }

    /// Bucket handle using path-style URLs (http://endpoint/bucket instead of http://bucket.endpoint)
    fn bucket(&self, name: &str) -> StorageResult<Box<Bucket>> {
        let mut bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(|e| {
                StorageError::Backend(format!("Failed to create bucket handle '{}': {}", name, e))
            })?;
        bucket.set_path_style();
        Ok(bucket)
    }

    fn check_status(status: u16, action: &str, target: &str) -> StorageResult<()> {
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(StorageError::Backend(format!(
                "Failed to {} '{}': status {}",
                action, target, status
            )))
        }
    }

    /// DeleteBucket answers 409 BucketNotEmpty while any key remains
    fn check_delete_bucket_status(status: u16, bucket: &str) -> StorageResult<()> {
        match status {
            404 => Err(StorageError::BucketNotFound(bucket.to_string())),
            409 => Err(StorageError::BucketNotEmpty(bucket.to_string())),
            _ => Self::check_status(status, "delete bucket", bucket),
        }
    }

    fn is_missing(error: &s3::error::S3Error) -> bool {
        let error_str = error.to_string();
        error_str.contains("404") || error_str.contains("NoSuchKey")
    }
}

#[async_trait]
impl ObjectStore for MinIOClient {
    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool> {
        let found = self.bucket(bucket)?.exists().await?;
        debug!("Bucket '{}' exists: {}", bucket, found);
        Ok(found)
    }

    async fn make_bucket(&self, bucket: &str) -> StorageResult<()> {
        let response = Bucket::create_with_path_style(
            bucket,
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await
        .map_err(|e| StorageError::Backend(format!("Failed to create bucket '{}': {}", bucket, e)))?;

        if !response.success() {
            let error_str = response.response_text;
            if error_str.contains("BucketAlreadyOwnedByYou")
                || error_str.contains("BucketAlreadyExists")
            {
                return Err(StorageError::BucketAlreadyExists(bucket.to_string()));
            }
            return Err(StorageError::Backend(format!(
                "Failed to create bucket '{}': status {} - {}",
                bucket, response.response_code, error_str
            )));
        }

        info!("Bucket '{}' created successfully", bucket);
        Ok(())
    }

    async fn remove_bucket(&self, bucket: &str) -> StorageResult<()> {
        let status = self.bucket(bucket)?.delete().await?;
        Self::check_delete_bucket_status(status, bucket)?;

        debug!("Deleted bucket '{}'", bucket);
        Ok(())
    }

    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        let response = Bucket::list_buckets(self.region.clone(), self.credentials.clone()).await?;

        Ok(response
            .buckets
            .bucket
            .into_iter()
            .map(|b| BucketInfo { name: b.name })
            .collect())
    }

    async fn list_objects(&self, bucket: &str) -> StorageResult<Vec<ObjectInfo>> {
        let pages = self.bucket(bucket)?.list(String::new(), None).await?;

        Ok(pages
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|object| ObjectInfo {
                name: object.key,
                size: object.size,
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
        let response = self
            .bucket(bucket)?
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| StorageError::Backend(format!("Failed to upload file '{}': {}", key, e)))?;
        Self::check_status(response.status_code(), "upload file", key)?;

        debug!("Uploaded file '{}' to bucket '{}'", key, bucket);
        Ok(())
    }

    async fn stat_object(&self, bucket: &str, key: &str) -> StorageResult<Option<ObjectStat>> {
        match self.bucket(bucket)?.head_object(key).await {
            Ok((_, 404)) => Ok(None),
            Ok((head, status)) => {
                Self::check_status(status, "stat file", key)?;
                Ok(Some(ObjectStat {
                    size: head.content_length.unwrap_or(0).max(0) as u64,
                    content_type: head.content_type,
                }))
            }
            Err(e) if Self::is_missing(&e) => Ok(None),
            Err(e) => {
                warn!("Failed to stat file '{}' in bucket '{}': {}", key, bucket, e);
                Err(e.into())
            }
        }
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let response = match self.bucket(bucket)?.get_object(key).await {
            Ok(response) => response,
            Err(e) if Self::is_missing(&e) => {
                return Err(StorageError::object_not_found(bucket, key));
            }
            Err(e) => {
                return Err(StorageError::Backend(format!(
                    "Failed to download file '{}': {}",
                    key, e
                )));
            }
        };

        if response.status_code() == 404 {
            return Err(StorageError::object_not_found(bucket, key));
        }
        Self::check_status(response.status_code(), "download file", key)?;

        debug!("Downloaded file '{}' from bucket '{}'", key, bucket);
        Ok(response.to_vec())
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        let response = self
            .bucket(bucket)?
            .delete_object(key)
            .await
            .map_err(|e| StorageError::Backend(format!("Failed to delete file '{}': {}", key, e)))?;
        Self::check_status(response.status_code(), "delete file", key)?;

        debug!("Deleted file '{}' from bucket '{}'", key, bucket);
        Ok(())
    }

    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expiry_secs: u32,
    ) -> StorageResult<String> {
        let url = self
            .bucket(bucket)?
            .presign_get(key, expiry_secs, None)
            .await
            .map_err(|e| {
                StorageError::Backend(format!(
                    "Failed to generate presigned URL for '{}': {}",
                    key, e
                ))
            })?;

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MinIOConfig {
        MinIOConfig {
            endpoint: "http://localhost:9000".to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            region: "us-east-1".to_string(),
            presigned_url_expiry_secs: 120,
            max_file_size: 1024,
            default_bucket: None,
        }
    }

    #[test]
    fn test_check_status() {
        assert!(MinIOClient::check_status(200, "upload file", "a.txt").is_ok());
        assert!(MinIOClient::check_status(204, "delete file", "a.txt").is_ok());

        let err = MinIOClient::check_status(500, "upload file", "a.txt").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Storage backend error: Failed to upload file 'a.txt': status 500"
        );
    }

    #[test]
    fn test_delete_bucket_status() {
        assert!(MinIOClient::check_delete_bucket_status(204, "photos").is_ok());
        assert!(matches!(
            MinIOClient::check_delete_bucket_status(409, "photos"),
            Err(StorageError::BucketNotEmpty(name)) if name == "photos"
        ));
        assert!(matches!(
            MinIOClient::check_delete_bucket_status(404, "photos"),
            Err(StorageError::BucketNotFound(_))
        ));
        assert!(matches!(
            MinIOClient::check_delete_bucket_status(500, "photos"),
            Err(StorageError::Backend(_))
        ));
    }

    #[tokio::test]
    async fn test_presigned_url_is_signed_locally() {
        let client = MinIOClient::new(&config()).unwrap();

        let url = client
            .presigned_get_url("photos", "cat.png", 120)
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:9000/photos/cat.png?"));
        assert!(url.contains("X-Amz-Expires=120"));
        assert!(url.contains("X-Amz-Signature="));
    }
}
