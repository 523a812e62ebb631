//! Content-based file type detection
//!
//! Uploaded bytes are sniffed for a short-form type ("jpg", "mp3", ...) which
//! is then mapped through a fixed table to a coarse MIME prefix. The result is
//! the prefix followed by the short form, e.g. `image/png` or `text/txt`.

use tracing::{debug, info};

const IMAGE_TYPE: &str = "image/";
const AUDIO_TYPE: &str = "audio/";
const VIDEO_TYPE: &str = "video/";
const APPLICATION_TYPE: &str = "application/";
const TXT_TYPE: &str = "text/";

/// Short forms grouped by the MIME prefix they map to
static TYPE_MAPPINGS: &[(&[&str], &str)] = &[
    (
        &["jpg", "jpeg", "gif", "png", "bmp", "pcx", "tga", "psd", "tiff", "tif"],
        IMAGE_TYPE,
    ),
    (
        &["mp3", "ogg", "wav", "real", "ape", "module", "midi", "mid", "vqf", "cd"],
        AUDIO_TYPE,
    ),
    (
        &[
            "mp4", "avi", "mpeg-1", "rm", "asf", "wmv", "qlv", "mpeg-2", "mpeg4", "mov", "3gp",
        ],
        VIDEO_TYPE,
    ),
    (
        &["doc", "docx", "ppt", "pptx", "xls", "xlsx", "zip", "jar"],
        APPLICATION_TYPE,
    ),
    (&["txt"], TXT_TYPE),
];

/// Short-form type of `content`, from magic bytes or a printable-text check
pub fn sniff_type(content: &[u8]) -> Option<&'static str> {
    if content.is_empty() {
        return None;
    }

    if let Some(kind) = infer::get(content) {
        return Some(kind.extension());
    }

    if looks_like_text(content) {
        return Some("txt");
    }

    None
}

/// MIME prefix for a short-form type; matching ignores case
pub fn mime_prefix(short_type: &str) -> Option<&'static str> {
    TYPE_MAPPINGS
        .iter()
        .find(|(types, _)| types.iter().any(|t| t.eq_ignore_ascii_case(short_type)))
        .map(|(_, prefix)| *prefix)
}

/// Detect the file type of uploaded content
///
/// Returns `None` when the content is empty or its type is not in the
/// supported table.
pub fn detect_file_type(content: &[u8]) -> Option<String> {
    let short_type = sniff_type(content)?;
    debug!("Sniffed file type: {}", short_type);

    let detected = mime_prefix(short_type).map(|prefix| format!("{}{}", prefix, short_type));
    match &detected {
        Some(file_type) => info!("Detected file type: {}", file_type),
        None => info!("Unsupported file type: {}", short_type),
    }
    detected
}

/// Valid UTF-8 without control characters other than tab, CR and LF
fn looks_like_text(content: &[u8]) -> bool {
    match std::str::from_utf8(content) {
        Ok(text) => !text
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r')),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];
    const GIF_HEADER: &[u8] = b"GIF89a\x01\x00\x01\x00";
    const MP3_HEADER: &[u8] = b"ID3\x03\x00\x00\x00\x00\x00\x00";

    #[test]
    fn test_detect_images() {
        assert_eq!(detect_file_type(PNG_HEADER).as_deref(), Some("image/png"));
        assert_eq!(detect_file_type(JPEG_HEADER).as_deref(), Some("image/jpg"));
        assert_eq!(detect_file_type(GIF_HEADER).as_deref(), Some("image/gif"));
    }

    #[test]
    fn test_detect_audio() {
        assert_eq!(detect_file_type(MP3_HEADER).as_deref(), Some("audio/mp3"));
    }

    #[test]
    fn test_detect_text() {
        assert_eq!(
            detect_file_type(b"Test Content").as_deref(),
            Some("text/txt")
        );
        assert_eq!(
            detect_file_type("línea uno\r\nlínea dos\t!".as_bytes()).as_deref(),
            Some("text/txt")
        );
    }

    #[test]
    fn test_unsupported_content() {
        assert_eq!(detect_file_type(&[]), None);
        // Known magic, but not in the table
        assert_eq!(detect_file_type(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n"), None);
        // Not UTF-8, no magic
        assert_eq!(detect_file_type(&[0x00, 0x9F, 0x92, 0x96, 0xC3]), None);
        // UTF-8 with control bytes
        assert_eq!(detect_file_type(&[0x01, 0x02, 0x03, 0x04]), None);
    }

    #[test]
    fn test_mime_prefix_ignores_case() {
        assert_eq!(mime_prefix("JPG"), Some("image/"));
        assert_eq!(mime_prefix("Mp4"), Some("video/"));
        assert_eq!(mime_prefix("XLSX"), Some("application/"));
        assert_eq!(mime_prefix("txt"), Some("text/"));
        assert_eq!(mime_prefix("pdf"), None);
    }
}
