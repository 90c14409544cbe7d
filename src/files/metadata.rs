//! JSON-LD metadata upload for a Clowder file.

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::instrument;

use super::client::ClowderClient;
use super::constants::STATUS_UPLOADING_METADATA;
use super::error::ClowderError;
use crate::connector::Connector;

impl ClowderClient {
    /// Posts `metadata` as JSON to `api/files/{file_id}/metadata.jsonld`.
    ///
    /// Reports `"Uploading file metadata."` for `file_id` before the request.
    ///
    /// # Errors
    ///
    /// Returns [`ClowderError::Serialize`] if `metadata` cannot be encoded
    /// (no request is sent), [`ClowderError::HttpStatus`] on a 4xx/5xx, or a
    /// transport error.
    #[instrument(skip(self, connector, metadata), fields(host = %self.host()))]
    pub async fn upload_file_metadata_jsonld<M>(
        &self,
        connector: &dyn Connector,
        file_id: &str,
        metadata: &M,
    ) -> Result<(), ClowderError>
    where
        M: Serialize + ?Sized,
    {
        connector.status_update(file_id, STATUS_UPLOADING_METADATA);

        let body = serde_json::to_vec(metadata).map_err(|source| ClowderError::Serialize { source })?;
        let url = self.endpoint(&["api", "files", file_id, "metadata.jsonld"])?;
        let request = self
            .http()
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send(request, &url).await?;
        Ok(())
    }
}

/// Uploads JSON-LD metadata with a one-off client built from `connector.tls_verify()`.
///
/// # Errors
///
/// Same as [`ClowderClient::upload_file_metadata_jsonld`], plus client construction errors.
pub async fn upload_file_metadata_jsonld<M>(
    connector: &dyn Connector,
    host: &str,
    key: &str,
    file_id: &str,
    metadata: &M,
) -> Result<(), ClowderError>
where
    M: Serialize + ?Sized,
{
    ClowderClient::new(host, key, connector.tls_verify())?
        .upload_file_metadata_jsonld(connector, file_id, metadata)
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use serde::ser::Error as _;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::connector::TlsVerify;

    #[derive(Default)]
    struct RecordingConnector {
        statuses: Mutex<Vec<(String, String)>>,
        tls: TlsVerify,
    }

    impl Connector for RecordingConnector {
        fn status_update(&self, file_id: &str, status: &str) {
            self.statuses
                .lock()
                .unwrap()
                .push((file_id.to_string(), status.to_string()));
        }

        fn tls_verify(&self) -> &TlsVerify {
            &self.tls
        }
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refuses to serialize"))
        }
    }

    #[tokio::test]
    async fn test_upload_metadata_posts_json_document() {
        let mock_server = MockServer::start().await;
        let metadata = json!({
            "@context": ["https://clowder.ncsa.illinois.edu/contexts/metadata.jsonld"],
            "content": {"width": 640, "height": 480},
        });
        Mock::given(method("POST"))
            .and(path("/api/files/f1/metadata.jsonld"))
            .and(query_param("key", "abc"))
            .and(header("content-type", "application/json"))
            .and(body_json(&metadata))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ClowderClient::new(&mock_server.uri(), "abc", &TlsVerify::Verify).unwrap();
        let connector = RecordingConnector::default();
        client
            .upload_file_metadata_jsonld(&connector, "f1", &metadata)
            .await
            .unwrap();

        assert_eq!(
            *connector.statuses.lock().unwrap(),
            vec![("f1".to_string(), "Uploading file metadata.".to_string())]
        );
    }

    #[tokio::test]
    async fn test_upload_metadata_accepts_any_serializable_value() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/files/f1/metadata.jsonld"))
            .and(body_json(json!({"a": 1, "b": 2})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut metadata = BTreeMap::new();
        metadata.insert("a", 1);
        metadata.insert("b", 2);

        let client = ClowderClient::new(&mock_server.uri(), "abc", &TlsVerify::Verify).unwrap();
        client
            .upload_file_metadata_jsonld(&RecordingConnector::default(), "f1", &metadata)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_metadata_serialize_failure_sends_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = ClowderClient::new(&mock_server.uri(), "abc", &TlsVerify::Verify).unwrap();
        let result = client
            .upload_file_metadata_jsonld(&RecordingConnector::default(), "f1", &Unserializable)
            .await;

        assert!(
            matches!(result, Err(ClowderError::Serialize { .. })),
            "got: {result:?}"
        );
    }

    #[tokio::test]
    async fn test_upload_metadata_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/files/f1/metadata.jsonld"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = upload_file_metadata_jsonld(
            &RecordingConnector::default(),
            &mock_server.uri(),
            "abc",
            "f1",
            &json!({}),
        )
        .await;

        assert_eq!(result.unwrap_err().status(), Some(400));
    }
}
