//! Transport seam used by the fetchers.
//!
//! A [`Transport`] hands out [`Session`]s; a session is one connection-reusing
//! client that fetches bodies as text. Production code uses [`CurlTransport`]
//! (libcurl); tests plug in instrumented fakes.

mod easy;

use crate::error::TransferError;
use std::time::Duration;
use url::Url;

pub use easy::{stream_body, CurlSession, CurlTransport};

/// Source of sessions. Shared by reference across fetch workers.
pub trait Transport: Sync {
    type Session: Session;

    /// Opens a session. Dropping the session releases its connections.
    fn open_session(&self) -> Result<Self::Session, TransferError>;
}

/// One client, used by a single worker at a time.
pub trait Session {
    /// GETs `url` and returns the body decoded as text.
    fn get_text(&mut self, url: &Url) -> Result<String, TransferError>;
}

/// Curl options applied to every handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    /// Ceiling for a whole transfer. `None` = no ceiling.
    pub request_timeout: Option<Duration>,
    pub max_redirections: u32,
    pub user_agent: Option<String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: None,
            max_redirections: 10,
            user_agent: None,
        }
    }
}

impl TransportOptions {
    /// Same options with the overall transfer timeout disabled.
    pub fn without_request_timeout(&self) -> Self {
        Self {
            request_timeout: None,
            ..self.clone()
        }
    }
}
