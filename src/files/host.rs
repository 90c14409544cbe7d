//! Clowder host parsing and endpoint URL assembly.

use std::fmt;

use url::Url;

use super::error::ClowderError;

/// Query parameter carrying the shared-secret key.
const KEY_PARAM: &str = "key";

/// Placeholder written in place of the key when a URL is displayed.
const REDACTED: &str = "REDACTED";

/// Base URL of a Clowder instance, always ending in `/`.
///
/// ```
/// use clowder_core::ClowderHost;
///
/// let host = ClowderHost::parse("https://clowder.example.org/clowder").unwrap();
/// let url = host.endpoint(&["api", "files", "f1"], "secret").unwrap();
/// assert_eq!(url.as_str(), "https://clowder.example.org/clowder/api/files/f1?key=secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClowderHost {
    base: Url,
}

impl ClowderHost {
    /// Parses a host string such as `https://clowder.example.org/`.
    ///
    /// A missing trailing `/` is added.
    ///
    /// # Errors
    ///
    /// Returns [`ClowderError::InvalidHost`] unless `host` is an absolute
    /// `http` or `https` URL without a query or fragment.
    pub fn parse(host: &str) -> Result<Self, ClowderError> {
        let trimmed = host.trim();
        let mut base = Url::parse(trimmed).map_err(|_| ClowderError::invalid_host(trimmed))?;
        if !matches!(base.scheme(), "http" | "https")
            || base.cannot_be_a_base()
            || base.query().is_some()
            || base.fragment().is_some()
        {
            return Err(ClowderError::invalid_host(trimmed));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    /// The normalised base URL.
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.base
    }

    /// Builds `{host}{segments joined by /}?key={key}`.
    ///
    /// Segments are appended verbatim apart from the percent-encoding `url`
    /// applies to characters that cannot appear in a path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ClowderError::InvalidSegment`] for a `.` or `..` segment,
    /// which would otherwise be normalised away and address another resource,
    /// and [`ClowderError::InvalidHost`] if the base cannot take path segments.
    pub fn endpoint(&self, segments: &[&str], key: &str) -> Result<Url, ClowderError> {
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(ClowderError::invalid_segment(*dot));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClowderError::invalid_host(self.base.as_str()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair(KEY_PARAM, key);
        Ok(url)
    }
}

impl fmt::Display for ClowderHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str())
    }
}

/// Renders `url` with the `key` query value replaced by a placeholder.
#[must_use]
pub fn redact_key(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == KEY_PARAM {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
