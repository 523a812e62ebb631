use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::features::minio::handlers;
use crate::features::minio::services::StorageService;
use crate::shared::constants::MULTIPART_OVERHEAD;

/// Create routes for the minio feature
pub fn routes(service: Arc<StorageService>) -> Router {
    let upload_limit = service.max_file_size() + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/minio/upload",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/minio/addBucket/{bucketName}", post(handlers::add_bucket))
        .route(
            "/minio/showURL/{bucketName}/{objectName}",
            get(handlers::show_object_url),
        )
        .route("/minio/show/{bucketName}", get(handlers::show))
        .route("/minio/showBucketName", get(handlers::show_bucket_name))
        .route(
            "/minio/removeBucket/{bucketName}",
            delete(handlers::remove_bucket),
        )
        .route(
            "/minio/removeObject/{bucketName}/{objectName}",
            delete(handlers::remove_object),
        )
        .route(
            "/minio/removeListObject/{bucketName}",
            delete(handlers::remove_list_object),
        )
        .route(
            "/minio/showListObjectNameAndDownloadUrl/{bucketName}",
            get(handlers::show_list_object_name_and_download_url),
        )
        .route(
            "/minio/download/{bucketName}/{objectName}",
            get(handlers::download),
        )
        .with_state(service)
}
