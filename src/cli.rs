//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use clowder_core::TlsVerify;

/// Download files, upload JSON-LD metadata and thumbnails through the Clowder files API.
#[derive(Parser, Debug)]
#[command(name = "clowder")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Clowder base URL, e.g. https://clowder.example.org/
    #[arg(long, env = "CLOWDER_HOST")]
    pub host: String,

    /// Shared-secret API key
    #[arg(long, env = "CLOWDER_KEY", hide_env_values = true)]
    pub key: String,

    /// Skip TLS certificate verification
    #[arg(long, conflicts_with = "ca_bundle")]
    pub insecure: bool,

    /// Additionally trust the certificates in this PEM bundle
    #[arg(long, value_name = "PEM")]
    pub ca_bundle: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download a file into a temp file and print its path
    Download {
        /// File being processed (used for status updates)
        #[arg(long)]
        file_id: String,

        /// File whose bytes are fetched, when different from --file-id
        #[arg(long)]
        transfer_file_id: Option<String>,

        /// Suffix for the temp file name, e.g. .tif
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        extension: String,
    },

    /// Upload a JSON document as the file's JSON-LD metadata
    UploadMetadata {
        /// File the metadata belongs to
        #[arg(long)]
        file_id: String,

        /// JSON file to upload, or - for stdin
        metadata: PathBuf,
    },

    /// Upload a thumbnail image and print its id
    UploadThumbnail {
        /// File to associate the thumbnail with
        #[arg(long)]
        file_id: Option<String>,

        /// Image to upload
        thumbnail: PathBuf,
    },
}

impl Args {
    /// TLS policy selected by --insecure / --ca-bundle.
    #[must_use]
    pub fn tls_verify(&self) -> TlsVerify {
        match (&self.ca_bundle, self.insecure) {
            (Some(path), _) => TlsVerify::CaBundle(path.clone()),
            (None, true) => TlsVerify::Skip,
            (None, false) => TlsVerify::Verify,
        }
    }
}
