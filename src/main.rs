//! CLI entry point for the Clowder files client.

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use clowder_core::{ClowderClient, Connector, LogConnector};
use tracing::debug;

mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries only command results.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Args holds the key, so only the command is logged.
    debug!(command = ?args.command, "CLI arguments parsed");

    let connector = LogConnector::new(args.tls_verify());
    let client = ClowderClient::new(&args.host, args.key.as_str(), connector.tls_verify())
        .context("failed to configure Clowder client")?;

    match args.command {
        Command::Download {
            file_id,
            transfer_file_id,
            extension,
        } => {
            let transfer_file_id = transfer_file_id.as_deref().unwrap_or(&file_id);
            let path = client
                .download_file(&connector, &file_id, transfer_file_id, &extension)
                .await
                .with_context(|| format!("failed to download file {transfer_file_id}"))?;
            println!("{}", path.display());
        }
        Command::UploadMetadata { file_id, metadata } => {
            let document = read_metadata(&metadata)?;
            client
                .upload_file_metadata_jsonld(&connector, &file_id, &document)
                .await
                .with_context(|| format!("failed to upload metadata for file {file_id}"))?;
        }
        Command::UploadThumbnail { file_id, thumbnail } => {
            let thumbnail_id = client
                .upload_file_thumbnail(file_id.as_deref(), &thumbnail)
                .await
                .with_context(|| format!("failed to upload thumbnail {}", thumbnail.display()))?;
            println!("{thumbnail_id}");
        }
    }

    Ok(())
}

/// Reads a JSON document from `source`, or from stdin when `source` is `-`.
fn read_metadata(source: &Path) -> Result<serde_json::Value> {
    let raw = if source == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read metadata from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read metadata file {}", source.display()))?
    };
    serde_json::from_str(&raw).context("metadata is not valid JSON")
}
