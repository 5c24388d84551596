//! Error types shared by the fetchers and the hasher.

use std::path::PathBuf;

/// Failure of a single network transfer (curl failure or HTTP error).
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Curl reported an error (connect, DNS, FTP reply, timeout, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Status(u32),
    /// A fetch worker or blocking hash task panicked before reporting.
    #[error("transfer worker panicked")]
    WorkerPanicked,
}

/// Error returned by every public operation of this crate.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Bad concurrency bound or an identifier that is not a URI.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Scheme is not one the operation can dereference.
    #[error("unsupported scheme `{0}`")]
    UnsupportedScheme(String),
    /// Network or FTP transfer failed, or the server answered with an error status.
    #[error("transfer of {url} failed: {source}")]
    Transfer {
        url: String,
        #[source]
        source: TransferError,
    },
    /// Local file open/read failure.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn transfer(url: impl Into<String>, source: TransferError) -> Self {
        FetchError::Transfer {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }
}
