//! HTTP client wrapper for the Clowder files API.
//!
//! [`ClowderClient`] pairs a reqwest [`Client`] with the Clowder host and the
//! shared-secret key. The operations themselves live in sibling modules.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::{Certificate, Client, ClientBuilder, RequestBuilder, Response};
use tracing::debug;
use url::Url;

use super::error::ClowderError;
use super::host::{ClowderHost, redact_key};
use crate::connector::TlsVerify;
use crate::user_agent;

/// Client for one Clowder instance and key.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use clowder_core::{ClowderClient, LogConnector, TlsVerify};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ClowderClient::new("https://clowder.example.org/", "secret", &TlsVerify::Verify)?;
/// let connector = LogConnector::default();
/// let path = client.download_file(&connector, "f1", "f1", ".tif").await?;
/// println!("Downloaded to: {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ClowderClient {
    http: Client,
    host: ClowderHost,
    key: String,
    download_dir: Option<PathBuf>,
}

impl fmt::Debug for ClowderClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClowderClient")
            .field("host", &self.host.as_url().as_str())
            .field("key", &"<redacted>")
            .field("download_dir", &self.download_dir)
            .finish_non_exhaustive()
    }
}

impl ClowderClient {
    /// Creates a client for `host`, building the HTTP transport from `tls`.
    ///
    /// No request timeout is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ClowderError::InvalidHost`] for an unusable host,
    /// [`ClowderError::TlsConfig`] for an unreadable or empty CA bundle, and
    /// [`ClowderError::ClientBuild`] if reqwest rejects the configuration.
    pub fn new(host: &str, key: impl Into<String>, tls: &TlsVerify) -> Result<Self, ClowderError> {
        let host = ClowderHost::parse(host)?;
        let http = build_http_client(tls)?;
        Ok(Self::with_http_client(http, host, key))
    }

    /// Creates a client around an already configured reqwest client.
    #[must_use]
    pub fn with_http_client(http: Client, host: ClowderHost, key: impl Into<String>) -> Self {
        Self {
            http,
            host,
            key: key.into(),
            download_dir: None,
        }
    }

    /// Creates download temp files in `dir` instead of the system temp directory.
    #[must_use]
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// The Clowder host this client talks to.
    #[must_use]
    pub fn host(&self) -> &ClowderHost {
        &self.host
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn download_dir(&self) -> Option<&Path> {
        self.download_dir.as_deref()
    }

    /// `{host}{segments}?key={key}` for this client.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ClowderError> {
        self.host.endpoint(segments, &self.key)
    }

    /// Sends `request` and fails on any 4xx/5xx status.
    ///
    /// `url` is the request target and is only used (redacted) for errors and logs.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<Response, ClowderError> {
        let shown = redact_key(url);
        debug!(url = %shown, "sending request");

        let response = request
            .send()
            .await
            .map_err(|e| ClowderError::network(shown.clone(), e.without_url()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(ClowderError::http_status(shown, status.as_u16()));
        }
        Ok(response)
    }
}

/// Builds the reqwest client used for every files API request.
///
/// # Errors
///
/// See [`ClowderClient::new`].
pub fn build_http_client(tls: &TlsVerify) -> Result<Client, ClowderError> {
    let builder = Client::builder().user_agent(user_agent::default_user_agent());
    let builder = match tls {
        TlsVerify::Verify => builder,
        TlsVerify::Skip => builder.danger_accept_invalid_certs(true),
        TlsVerify::CaBundle(path) => {
            let pem =
                std::fs::read(path).map_err(|e| ClowderError::tls_config(path, e.to_string()))?;
            let certs = Certificate::from_pem_bundle(&pem)
                .map_err(|e| ClowderError::tls_config(path, e.to_string()))?;
            if certs.is_empty() {
                return Err(ClowderError::tls_config(path, "no certificates found"));
            }
            debug!(path = %path.display(), count = certs.len(), "trusting CA bundle");
            certs
                .into_iter()
                .fold(builder, ClientBuilder::add_root_certificate)
        }
    };
    builder
        .build()
        .map_err(|source| ClowderError::ClientBuild { source })
}
