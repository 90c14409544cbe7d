//! Caller-supplied connector capability.
//!
//! The files API never owns connector state. Each operation receives a
//! `&dyn Connector` and only uses it to report progress and to read the TLS
//! verification policy for its requests.

use std::path::PathBuf;

use tracing::info;

/// TLS certificate verification policy for requests to Clowder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerify {
    /// Verify against the transport's built-in roots.
    #[default]
    Verify,
    /// Accept any certificate.
    Skip,
    /// Additionally trust the PEM certificates in this bundle.
    CaBundle(PathBuf),
}

impl From<bool> for TlsVerify {
    fn from(verify: bool) -> Self {
        if verify { Self::Verify } else { Self::Skip }
    }
}

impl From<PathBuf> for TlsVerify {
    fn from(path: PathBuf) -> Self {
        Self::CaBundle(path)
    }
}

/// Status reporting and TLS settings provided by whoever drives the files API.
pub trait Connector: Send + Sync {
    /// Fire-and-forget progress notification for `file_id`.
    fn status_update(&self, file_id: &str, status: &str);

    /// TLS verification policy applied to every request.
    fn tls_verify(&self) -> &TlsVerify;
}

/// Connector that reports status updates as `info` log events.
#[derive(Debug, Clone, Default)]
pub struct LogConnector {
    tls_verify: TlsVerify,
}

impl LogConnector {
    /// Creates a log-only connector with the given TLS policy.
    #[must_use]
    pub fn new(tls_verify: TlsVerify) -> Self {
        Self { tls_verify }
    }
}

impl Connector for LogConnector {
    fn status_update(&self, file_id: &str, status: &str) {
        info!(file_id, status, "status update");
    }

    fn tls_verify(&self) -> &TlsVerify {
        &self.tls_verify
    }
}
