//! libcurl-backed transport: one `Easy` handle per session.

use super::{Session, Transport, TransportOptions};
use crate::error::TransferError;
use curl::easy::Easy;
use std::time::Duration;
use url::Url;

/// Production transport. Each session owns one reusable curl handle.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: TransportOptions,
}

impl CurlTransport {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }
}

impl Transport for CurlTransport {
    type Session = CurlSession;

    fn open_session(&self) -> Result<CurlSession, TransferError> {
        Ok(CurlSession {
            easy: configured_easy(&self.options)?,
        })
    }
}

/// A curl handle kept alive across requests so connections are reused.
pub struct CurlSession {
    easy: Easy,
}

impl Session for CurlSession {
    fn get_text(&mut self, url: &Url) -> Result<String, TransferError> {
        let mut body = Vec::new();
        self.easy.url(url.as_str())?;
        self.easy.get(true)?;
        {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }
        check_http_status(&mut self.easy)?;
        tracing::debug!("GET {} -> {} bytes", url, body.len());
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Streams the body of an HTTP(S) or FTP URL into `sink`, chunk by chunk.
/// Returns the number of bytes delivered. The handle is dropped on return.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn stream_body<F>(url: &Url, options: &TransportOptions, mut sink: F) -> Result<u64, TransferError>
where
    F: FnMut(&[u8]),
{
    let mut easy = configured_easy(options)?;
    easy.url(url.as_str())?;
    let mut received = 0u64;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            sink(data);
            received += data.len() as u64;
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    // FTP failures surface as curl errors; only HTTP needs a status check.
    if matches!(url.scheme(), "http" | "https") {
        check_http_status(&mut easy)?;
    }
    Ok(received)
}

fn configured_easy(options: &TransportOptions) -> Result<Easy, curl::Error> {
    let mut easy = Easy::new();
    easy.follow_location(true)?;
    easy.max_redirections(options.max_redirections)?;
    easy.connect_timeout(options.connect_timeout)?;
    // 0 disables libcurl's overall transfer timeout.
    easy.timeout(options.request_timeout.unwrap_or(Duration::ZERO))?;
    if let Some(agent) = &options.user_agent {
        easy.useragent(agent)?;
    }
    Ok(easy)
}

fn check_http_status(easy: &mut Easy) -> Result<(), TransferError> {
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransferError::Status(code));
    }
    Ok(())
}
