//! Streaming download of a Clowder file into a local temp file.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::client::ClowderClient;
use super::constants::{DOWNLOAD_CHUNK_SIZE, DOWNLOAD_TEMP_PREFIX, STATUS_DOWNLOADING};
use super::error::ClowderError;
use super::host::redact_key;
use crate::connector::Connector;

impl ClowderClient {
    /// Downloads `api/files/{transfer_file_id}` into a new temp file ending in `extension`.
    ///
    /// Reports `"Downloading file."` for `file_id` before anything else. The
    /// temp file is created before the request is sent; the caller owns the
    /// returned path and deletes it when done.
    ///
    /// # Errors
    ///
    /// Returns [`ClowderError::Io`] if the temp file cannot be created. Any
    /// later failure (4xx/5xx status, transport error, write error) is wrapped
    /// in [`ClowderError::IncompleteDownload`], which names the temp file left
    /// on disk.
    #[must_use = "the returned temp file must be cleaned up by the caller"]
    #[instrument(skip(self, connector), fields(host = %self.host()))]
    pub async fn download_file(
        &self,
        connector: &dyn Connector,
        file_id: &str,
        transfer_file_id: &str,
        extension: &str,
    ) -> Result<PathBuf, ClowderError> {
        connector.status_update(file_id, STATUS_DOWNLOADING);

        let url = self.endpoint(&["api", "files", transfer_file_id])?;
        let (file, path) = create_temp_file(self.download_dir(), extension)?;
        debug!(path = %path.display(), "created download target");

        match self.fetch_into(file, &url, &path).await {
            Ok(bytes) => {
                info!(path = %path.display(), bytes, "download complete");
                Ok(path)
            }
            Err(source) => Err(ClowderError::incomplete_download(path, source)),
        }
    }

    async fn fetch_into(&self, file: File, url: &Url, path: &Path) -> Result<u64, ClowderError> {
        let response = self.send(self.http().get(url.clone()), url).await?;
        stream_to_file(file, response, url, path).await
    }
}

/// Downloads a file with a one-off client built from `connector.tls_verify()`.
///
/// `host` should end in `/`; a missing slash is added.
///
/// # Errors
///
/// Same as [`ClowderClient::download_file`], plus client construction errors.
pub async fn download_file(
    connector: &dyn Connector,
    host: &str,
    key: &str,
    file_id: &str,
    transfer_file_id: &str,
    extension: &str,
) -> Result<PathBuf, ClowderError> {
    ClowderClient::new(host, key, connector.tls_verify())?
        .download_file(connector, file_id, transfer_file_id, extension)
        .await
}

/// Creates a uniquely named file that outlives this process.
fn create_temp_file(dir: Option<&Path>, extension: &str) -> Result<(File, PathBuf), ClowderError> {
    let dir = dir.map_or_else(std::env::temp_dir, Path::to_path_buf);
    let named = tempfile::Builder::new()
        .prefix(DOWNLOAD_TEMP_PREFIX)
        .suffix(extension)
        .tempfile_in(&dir)
        .map_err(|e| ClowderError::io(&dir, e))?;
    let (file, path) = named.keep().map_err(|e| ClowderError::io(&dir, e.error))?;
    Ok((File::from_std(file), path))
}

/// Streams the response body to `file` through a 10 KiB buffer, returning bytes written.
async fn stream_to_file(
    file: File,
    response: Response,
    url: &Url,
    path: &Path,
) -> Result<u64, ClowderError> {
    let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| ClowderError::network(redact_key(url), e.without_url()))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| ClowderError::io(path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer.flush().await.map_err(|e| ClowderError::io(path, e))?;

    Ok(bytes_written)
}
