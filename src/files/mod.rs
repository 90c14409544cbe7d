//! Wrappers around the Clowder files API.
//!
//! This module provides the three files API operations a processing pipeline
//! needs, each a single request (two for thumbnails) authenticated with a
//! shared-secret `key` query parameter.
//!
//! # Operations
//!
//! - Download a file into a local temp file (streamed through a 10 KiB buffer)
//! - Upload JSON-LD metadata for a file
//! - Upload a thumbnail and associate it with a file
//!
//! # Example
//!
//! ```no_run
//! use clowder_core::files::{download_file, upload_file_metadata_jsonld};
//! use clowder_core::LogConnector;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = LogConnector::default();
//! let host = "https://clowder.example.org/";
//! let path = download_file(&connector, host, "secret", "f1", "f1", ".tif").await?;
//! upload_file_metadata_jsonld(&connector, host, "secret", "f1", &json!({"pages": 3})).await?;
//! println!("Processed {}", path.display());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod download;
mod error;
mod host;
mod metadata;
mod thumbnail;

pub use client::{ClowderClient, build_http_client};
pub use download::download_file;
pub use error::ClowderError;
pub use host::{ClowderHost, redact_key};
pub use metadata::upload_file_metadata_jsonld;
pub use thumbnail::upload_file_thumbnail;

// Note: no module-local Result alias; signatures spell out `Result<T, ClowderError>`.
