/// Body for a successful bucket removal
pub const BUCKET_DELETE_SUCCESS: &str = "Bucket deleted successfully";

/// Body for a failed bucket removal
pub const BUCKET_DELETE_FAILED: &str = "Failed to delete bucket";

pub const OBJECT_DELETE_SUCCESS: &str = "Delete Object successfully";

pub const OBJECT_LIST_DELETE_SUCCESS: &str = "Delete List Object successfully";

pub const DELETE_FAILED: &str = "Delete failed";

/// Single entry returned when listing the objects of a missing bucket
pub const BUCKET_MISSING_PLACEHOLDER: &str = "Bucket does not exist";

/// Extra body room for multipart framing on top of the max file size
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;
