pub mod minio_handler;

pub use minio_handler::{
    add_bucket, download, remove_bucket, remove_list_object, remove_object, show,
    show_bucket_name, show_list_object_name_and_download_url, show_object_url, upload_file,
};
