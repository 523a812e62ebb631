//! Storage module for object management
//!
//! Provides the [`ObjectStore`] abstraction and its MinIO/S3-compatible
//! implementation for bucket management, uploads, downloads and presigned
//! URL generation.

mod error;
#[cfg(test)]
mod memory_store;
mod minio_client;
mod object_store;

pub use error::{StorageError, StorageResult};
#[cfg(test)]
pub use memory_store::InMemoryStore;
pub use minio_client::MinIOClient;
pub use object_store::{BucketInfo, ObjectInfo, ObjectStat, ObjectStore};
