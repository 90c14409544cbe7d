//! User-Agent string sent with every Clowder request.

/// Project URL for User-Agent identification (RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/clowder-framework/clowder";

/// Default User-Agent for files API requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("clowder/{version} (files-client; +{PROJECT_UA_URL})")
}
