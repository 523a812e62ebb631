use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating S3 bucket names
    /// 3-63 characters of lowercase letters, digits, dots and hyphens,
    /// starting and ending with a letter or digit
    /// - Valid: "test-bucket", "photos.2024", "abc"
    /// - Invalid: "ab", "-bucket", "bucket-", "Bucket", "my_bucket"
    pub static ref BUCKET_NAME_REGEX: Regex =
        Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").unwrap();
}
