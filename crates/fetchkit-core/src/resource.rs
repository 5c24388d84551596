//! Resource identifiers: a URI parsed into the transport that can dereference it.

use crate::error::FetchError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// A caller-supplied resource, tagged by the transport that serves it.
///
/// Only `http`, `https`, `ftp` and `file` URIs parse; anything else is
/// rejected with [`FetchError::UnsupportedScheme`] before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceIdentifier {
    /// `http://` or `https://` URL.
    Http(Url),
    /// `ftp://` URL.
    Ftp(Url),
    /// Local path taken from a `file://` URI.
    File(PathBuf),
}

impl ResourceIdentifier {
    /// Parses a URI string.
    ///
    /// # Examples
    ///
    /// - `"http://example.com/a.txt"` → `Http`
    /// - `"file:///tmp/a.bin"` → `File("/tmp/a.bin")`
    /// - `"mailto:someone@example.com"` → `Err(UnsupportedScheme("mailto"))`
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let url = Url::parse(input.trim()).map_err(|e| {
            FetchError::InvalidArgument(format!("`{}` is not a URI: {}", input, e))
        })?;
        Self::from_url(url)
    }

    /// Classifies an already parsed URL by scheme.
    pub fn from_url(url: Url) -> Result<Self, FetchError> {
        let scheme = url.scheme().to_ascii_lowercase();
        match scheme.as_str() {
            "http" | "https" => Ok(ResourceIdentifier::Http(url)),
            "ftp" => Ok(ResourceIdentifier::Ftp(url)),
            "file" => url.to_file_path().map(ResourceIdentifier::File).map_err(|()| {
                FetchError::InvalidArgument(format!("`{}` has no local path", url))
            }),
            _ => Err(FetchError::UnsupportedScheme(scheme)),
        }
    }

    /// Identifier for a local file.
    pub fn file(path: impl AsRef<Path>) -> Self {
        ResourceIdentifier::File(path.as_ref().to_path_buf())
    }

    pub fn scheme(&self) -> &str {
        match self {
            ResourceIdentifier::Http(url) | ResourceIdentifier::Ftp(url) => url.scheme(),
            ResourceIdentifier::File(_) => "file",
        }
    }

    /// The URL of an `Http` identifier; other kinds are rejected.
    /// The fetchers only dereference HTTP(S) resources.
    pub fn http_url(&self) -> Result<&Url, FetchError> {
        match self {
            ResourceIdentifier::Http(url) => Ok(url),
            other => Err(FetchError::UnsupportedScheme(other.scheme().to_string())),
        }
    }
}

impl FromStr for ResourceIdentifier {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceIdentifier::parse(s)
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceIdentifier::Http(url) | ResourceIdentifier::Ftp(url) => write!(f, "{}", url),
            ResourceIdentifier::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// Parses every string, failing on the first bad one.
pub fn parse_all<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<ResourceIdentifier>, FetchError> {
    inputs
        .iter()
        .map(|s| ResourceIdentifier::parse(s.as_ref()))
        .collect()
}
