//! Error types for the files API.
//!
//! Every variant that names a request URL carries the redacted form, so the
//! shared-secret key never reaches error messages or logs.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while talking to the Clowder files API.
#[derive(Debug, Error)]
pub enum ClowderError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error calling {url}: {source}")]
    Network {
        /// The redacted request URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout calling {url}")]
    Timeout {
        /// The redacted request URL.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// The redacted request URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The thumbnail upload response was not JSON or had no string `id`.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse {
        /// The redacted request URL.
        url: String,
        /// What was wrong with the body.
        reason: String,
    },

    /// File system error (open thumbnail, create or write the download target).
    #[error("IO error on {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Metadata document could not be serialized to JSON.
    #[error("failed to serialize metadata: {source}")]
    Serialize {
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The Clowder host is not an absolute http(s) URL.
    #[error("invalid Clowder host: {host}")]
    InvalidHost {
        /// The rejected host string.
        host: String,
    },

    /// A path segment that URL normalisation would drop (`.` or `..`).
    #[error("invalid path segment: {segment:?}")]
    InvalidSegment {
        /// The rejected segment.
        segment: String,
    },

    /// The CA bundle configured for TLS verification could not be used.
    #[error("invalid CA bundle {path}: {reason}")]
    TlsConfig {
        /// Path of the CA bundle.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// A download failed after its temp file was created.
    ///
    /// The file is not removed; `path` tells the caller what to clean up.
    #[error("download into {path} did not complete: {source}")]
    IncompleteDownload {
        /// The temp file left on disk.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: Box<ClowderError>,
    },
}

impl ClowderError {
    /// Creates a network error, promoting transport timeouts to [`ClowderError::Timeout`].
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a malformed-response error.
    pub fn malformed_response(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid host error.
    pub fn invalid_host(host: impl Into<String>) -> Self {
        Self::InvalidHost { host: host.into() }
    }

    /// Creates an invalid path segment error.
    pub fn invalid_segment(segment: impl Into<String>) -> Self {
        Self::InvalidSegment {
            segment: segment.into(),
        }
    }

    /// Creates a CA bundle error.
    pub fn tls_config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::TlsConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wraps `source` as a failed download that left `path` behind.
    pub fn incomplete_download(path: impl Into<PathBuf>, source: ClowderError) -> Self {
        Self::IncompleteDownload {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// HTTP status code of a non-success response, if that is what failed.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::IncompleteDownload { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether the remote service answered with a 4xx/5xx status.
    #[must_use]
    pub fn is_http_status(&self) -> bool {
        self.status().is_some()
    }

    /// Temp file a failed download left on disk.
    #[must_use]
    pub fn leftover_path(&self) -> Option<&Path> {
        match self {
            Self::IncompleteDownload { path, .. } => Some(path),
            _ => None,
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// redacted URL or the path, which the source errors do not carry.
