//! Thumbnail upload and association with a Clowder file.

use std::path::Path;

use reqwest::Body;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tokio::fs::File;
use tracing::{debug, instrument};

use super::client::ClowderClient;
use super::constants::THUMBNAIL_FIELD;
use super::error::ClowderError;
use super::host::redact_key;
use crate::connector::Connector;

/// Body returned by `POST api/fileThumbnail`.
#[derive(Debug, Deserialize)]
struct ThumbnailCreated {
    id: String,
}

/// Extracts the string `id` field from a thumbnail upload response body.
pub(crate) fn parse_thumbnail_id(body: &[u8]) -> Result<String, serde_json::Error> {
    serde_json::from_slice::<ThumbnailCreated>(body).map(|created| created.id)
}

impl ClowderClient {
    /// Uploads `thumbnail` and, when `file_id` is non-empty, links it to that file.
    ///
    /// The image is streamed as multipart field `File` to `api/fileThumbnail`.
    /// The file handle is owned by the request body and closed when the upload
    /// finishes or fails. No status update is reported.
    ///
    /// Returns the id Clowder assigned to the thumbnail.
    ///
    /// # Errors
    ///
    /// Returns [`ClowderError::Io`] if the image cannot be opened,
    /// [`ClowderError::MalformedResponse`] if the upload response has no
    /// string `id`, and [`ClowderError::HttpStatus`] if either request gets a
    /// 4xx/5xx. A failed association leaves the uploaded thumbnail unlinked.
    #[instrument(skip(self, thumbnail), fields(host = %self.host(), thumbnail = %thumbnail.display()))]
    pub async fn upload_file_thumbnail(
        &self,
        file_id: Option<&str>,
        thumbnail: &Path,
    ) -> Result<String, ClowderError> {
        let url = self.endpoint(&["api", "fileThumbnail"])?;
        let form = Form::new().part(THUMBNAIL_FIELD, thumbnail_part(thumbnail).await?);
        let response = self.send(self.http().post(url.clone()).multipart(form), &url).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ClowderError::network(redact_key(&url), e.without_url()))?;
        let thumbnail_id = parse_thumbnail_id(&body)
            .map_err(|e| ClowderError::malformed_response(redact_key(&url), e.to_string()))?;
        debug!(thumbnail_id = %thumbnail_id, "preview id");

        if let Some(file_id) = file_id.filter(|id| !id.is_empty()) {
            let link = self.endpoint(&["api", "files", file_id, "thumbnails", thumbnail_id.as_str()])?;
            let request = self
                .http()
                .post(link.clone())
                .header(CONTENT_TYPE, "application/json")
                .body("{}");
            self.send(request, &link).await?;
            debug!(file_id, thumbnail_id = %thumbnail_id, "thumbnail associated");
        }

        Ok(thumbnail_id)
    }
}

/// Uploads a thumbnail with a one-off client built from `connector.tls_verify()`.
///
/// # Errors
///
/// Same as [`ClowderClient::upload_file_thumbnail`], plus client construction errors.
pub async fn upload_file_thumbnail(
    connector: &dyn Connector,
    host: &str,
    key: &str,
    file_id: Option<&str>,
    thumbnail: &Path,
) -> Result<String, ClowderError> {
    ClowderClient::new(host, key, connector.tls_verify())?
        .upload_file_thumbnail(file_id, thumbnail)
        .await
}

/// Opens `thumbnail` read-only as a streamed multipart part named after the file.
async fn thumbnail_part(thumbnail: &Path) -> Result<Part, ClowderError> {
    let file = File::open(thumbnail)
        .await
        .map_err(|e| ClowderError::io(thumbnail, e))?;
    let length = file
        .metadata()
        .await
        .map_err(|e| ClowderError::io(thumbnail, e))?
        .len();
    let part = Part::stream_with_length(Body::from(file), length);
    Ok(match thumbnail.file_name().and_then(|name| name.to_str()) {
        Some(name) => part.file_name(name.to_string()),
        None => part,
    })
}
