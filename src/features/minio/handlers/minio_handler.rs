use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppMultipart, AppQuery};
use crate::features::minio::dtos::{BucketNameDto, FileResponseDto, UploadQuery};
use crate::features::minio::services::StorageService;
use crate::modules::storage::StorageError;
use crate::shared::constants::{
    BUCKET_DELETE_FAILED, BUCKET_DELETE_SUCCESS, BUCKET_MISSING_PLACEHOLDER, DELETE_FAILED,
    OBJECT_DELETE_SUCCESS, OBJECT_LIST_DELETE_SUCCESS,
};
use crate::shared::file_type::detect_file_type;

/// Map a delete outcome to the success/failure body
///
/// Missing buckets and non-empty buckets are reported as a failure string;
/// backend failures still surface as errors.
fn delete_outcome(
    result: std::result::Result<bool, StorageError>,
    success: &'static str,
    failure: &'static str,
) -> Result<&'static str> {
    match result {
        Ok(true) => Ok(success),
        Ok(false) => Ok(failure),
        Err(e @ StorageError::Backend(_)) => Err(e.into()),
        Err(e) => {
            info!("Delete rejected: {}", e);
            Ok(failure)
        }
    }
}

/// Bodies cut off by the upload body limit are reported as 413
fn multipart_error(e: MultipartError, service: &StorageService, context: &str) -> AppError {
    debug!("{}: {}", context, e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "Request body too large. Maximum file size is {} bytes",
            service.max_file_size()
        ))
    } else {
        AppError::BadRequest(format!("{}: {}", context, e.body_text()))
    }
}

/// Upload a file
///
/// Accepts multipart/form-data with:
/// - `file`: The file to upload (required)
/// - `bucketName`: Target bucket (required, may also be passed as a query parameter)
pub async fn upload_file(
    State(service): State<Arc<StorageService>>,
    AppQuery(query): AppQuery<UploadQuery>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<FileResponseDto>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut bucket_name = query.bucket_name;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, &service, "Failed to read multipart data"))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, &service, "Failed to read file data"))?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
            }
            "bucketName" => {
                let text = field.text().await.map_err(|e| {
                    multipart_error(e, &service, "Failed to read bucketName field")
                })?;
                if !text.is_empty() {
                    bucket_name = Some(text);
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let bucket_name = bucket_name
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::MissingParameter("bucketName".to_string()))?;
    let file_data = file_data.ok_or_else(|| AppError::MissingParameter("file".to_string()))?;
    let file_name = file_name.unwrap_or_else(|| "unnamed".to_string());

    info!("Upload to bucket '{}': {}", bucket_name, file_name);

    if file_data.is_empty() {
        return Err(AppError::BadRequest("File must not be empty".to_string()));
    }

    if file_data.len() > service.max_file_size() {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} bytes",
            service.max_file_size()
        )));
    }

    let file_type = detect_file_type(&file_data)
        .ok_or_else(|| AppError::BadRequest("Unsupported file type".to_string()))?;

    let response = service
        .put_object(&bucket_name, &file_name, file_data, &file_type)
        .await?;

    Ok(Json(response))
}

/// Create a bucket
pub async fn add_bucket(
    State(service): State<Arc<StorageService>>,
    Path(bucket_name): Path<String>,
) -> Result<String> {
    info!("Create bucket '{}'", bucket_name);

    BucketNameDto::new(bucket_name.as_str())
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.make_bucket(&bucket_name).await?;

    Ok(format!("Bucket name {} created", bucket_name))
}

/// Presigned URL for an object
pub async fn show_object_url(
    State(service): State<Arc<StorageService>>,
    Path((bucket_name, object_name)): Path<(String, String)>,
) -> Result<String> {
    Ok(service.get_object_url(&bucket_name, &object_name).await?)
}

/// Object names of a bucket
///
/// A missing bucket yields a single placeholder entry instead of an error.
pub async fn show(
    State(service): State<Arc<StorageService>>,
    Path(bucket_name): Path<String>,
) -> Result<Json<Vec<String>>> {
    match service.list_object_names(&bucket_name).await {
        Ok(names) => Ok(Json(names)),
        Err(StorageError::BucketNotFound(_)) => {
            Ok(Json(vec![BUCKET_MISSING_PLACEHOLDER.to_string()]))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn show_bucket_name(
    State(service): State<Arc<StorageService>>,
) -> Result<Json<Vec<String>>> {
    Ok(Json(service.list_bucket_names().await?))
}

/// Remove an empty bucket
pub async fn remove_bucket(
    State(service): State<Arc<StorageService>>,
    Path(bucket_name): Path<String>,
) -> Result<&'static str> {
    info!("Remove bucket '{}'", bucket_name);

    let result = service.remove_bucket(&bucket_name).await.map(|()| true);
    delete_outcome(result, BUCKET_DELETE_SUCCESS, BUCKET_DELETE_FAILED)
}

/// Remove a single object
pub async fn remove_object(
    State(service): State<Arc<StorageService>>,
    Path((bucket_name, object_name)): Path<(String, String)>,
) -> Result<&'static str> {
    info!("Remove object '{}' from bucket '{}'", object_name, bucket_name);

    let result = service
        .remove_object(&bucket_name, &object_name)
        .await
        .map(|()| true);
    delete_outcome(result, OBJECT_DELETE_SUCCESS, DELETE_FAILED)
}

/// Remove a list of objects, reporting only the aggregate outcome
pub async fn remove_list_object(
    State(service): State<Arc<StorageService>>,
    Path(bucket_name): Path<String>,
    AppJson(object_names): AppJson<Vec<String>>,
) -> Result<&'static str> {
    info!(
        "Remove {} objects from bucket '{}'",
        object_names.len(),
        bucket_name
    );

    let result = service
        .remove_objects(&bucket_name, &object_names)
        .await
        .map(|report| report.is_success());
    delete_outcome(result, OBJECT_LIST_DELETE_SUCCESS, DELETE_FAILED)
}

/// Object names of a bucket mapped to their download links
pub async fn show_list_object_name_and_download_url(
    State(service): State<Arc<StorageService>>,
    Path(bucket_name): Path<String>,
) -> Result<Json<BTreeMap<String, String>>> {
    let names = service.list_object_names(&bucket_name).await?;

    let links: BTreeMap<String, String> = names
        .into_iter()
        .map(|name| {
            let url = service.download_url(&bucket_name, &name);
            (name, url)
        })
        .collect();

    debug!("Download links for bucket '{}': {}", bucket_name, links.len());
    Ok(Json(links))
}

/// Download an object as an attachment
pub async fn download(
    State(service): State<Arc<StorageService>>,
    Path((bucket_name, object_name)): Path<(String, String)>,
) -> Result<Response> {
    info!("Download '{}' from bucket '{}'", object_name, bucket_name);

    let object = service
        .get_object(&bucket_name, &object_name)
        .await
        .inspect_err(|e| {
            if !e.is_not_found() {
                warn!("Download of '{}' failed: {}", object_name, e);
            }
        })?;

    let content_type = object
        .stat
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let disposition = format!(
        "attachment;filename={}",
        urlencoding::encode(&object_name)
    );

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        object.data,
    )
        .into_response())
}
