#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum_test::TestServer;

#[cfg(test)]
use crate::core::config::MinIOConfig;
#[cfg(test)]
use crate::features::minio::{routes, StorageService};
#[cfg(test)]
use crate::modules::storage::InMemoryStore;

#[cfg(test)]
pub const TEST_DOWNLOAD_BASE_URL: &str = "localhost:3000";

#[cfg(test)]
pub fn test_minio_config() -> MinIOConfig {
    MinIOConfig {
        endpoint: "http://localhost:9000".to_string(),
        access_key: "minioadmin".to_string(),
        secret_key: "minioadmin".to_string(),
        region: "us-east-1".to_string(),
        presigned_url_expiry_secs: 120,
        max_file_size: 1024 * 1024,
        default_bucket: None,
    }
}

#[cfg(test)]
pub fn create_test_service(store: Arc<InMemoryStore>) -> Arc<StorageService> {
    Arc::new(StorageService::new(
        store,
        &test_minio_config(),
        TEST_DOWNLOAD_BASE_URL.to_string(),
    ))
}

/// Test server over the `/minio` routes backed by `store`
#[cfg(test)]
pub fn create_test_server(store: Arc<InMemoryStore>) -> TestServer {
    TestServer::new(routes(create_test_service(store))).unwrap()
}
