//! Constants for the files API (buffer sizes, status texts).

/// Write buffer for streamed downloads (10 KiB).
pub const DOWNLOAD_CHUNK_SIZE: usize = 10 * 1024;

/// Prefix of temp files created by downloads.
pub const DOWNLOAD_TEMP_PREFIX: &str = "clowder-";

/// Status reported before a download request.
pub const STATUS_DOWNLOADING: &str = "Downloading file.";

/// Status reported before a metadata upload request.
pub const STATUS_UPLOADING_METADATA: &str = "Uploading file metadata.";

/// Multipart field name Clowder expects for thumbnail uploads.
pub const THUMBNAIL_FIELD: &str = "File";
