pub mod minio_dto;

pub use minio_dto::{BatchDeleteReport, BucketNameDto, FileResponseDto, UploadQuery};
