//! Clowder Core Library
//!
//! Thin client for the Clowder content-management files API: download a
//! file, upload JSON-LD metadata for it, and upload a thumbnail and link it
//! to the file.
//!
//! # Architecture
//!
//! - [`connector`] - Caller-supplied status reporting and TLS policy
//! - [`files`] - Files API operations, URL building and errors

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod connector;
pub mod files;
mod user_agent;

// Re-export commonly used types
pub use connector::{Connector, LogConnector, TlsVerify};
pub use files::{
    ClowderClient, ClowderError, ClowderHost, download_file, upload_file_metadata_jsonld,
    upload_file_thumbnail,
};
