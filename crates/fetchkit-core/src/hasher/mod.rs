//! Streaming MD5 of a resource addressed by scheme.
//!
//! `file` resources are read with async file I/O. `http(s)` and `ftp`
//! resources are streamed through libcurl on the blocking pool, so many
//! hashes can run concurrently without blocking the runtime. Every branch is
//! a single chunked pass; nothing is buffered whole.

use crate::error::{FetchError, TransferError};
use crate::resource::ResourceIdentifier;
use crate::transport::{self, TransportOptions};
use md5::{Digest, Md5};
use std::path::Path;
use tokio::io::AsyncReadExt;
use url::Url;

const BUF_SIZE: usize = 64 * 1024;

/// MD5 of `resource` as 32 lowercase hex characters.
///
/// The network branches never impose an overall transfer timeout, whatever
/// `options.request_timeout` says; a non-2xx HTTP status is an error.
pub async fn md5_resource(
    resource: &ResourceIdentifier,
    options: &TransportOptions,
) -> Result<String, FetchError> {
    let digest = match resource {
        ResourceIdentifier::File(path) => md5_file(path).await?,
        ResourceIdentifier::Http(url) | ResourceIdentifier::Ftp(url) => {
            md5_remote(url, options.without_request_timeout()).await?
        }
    };
    tracing::debug!("md5 {} = {}", resource, digest);
    Ok(digest)
}

/// Parses `uri` and hashes it. An unsupported scheme fails before any I/O.
pub async fn md5_uri(uri: &str, options: &TransportOptions) -> Result<String, FetchError> {
    let resource = ResourceIdentifier::parse(uri)?;
    md5_resource(&resource, options).await
}

async fn md5_file(path: &Path) -> Result<String, FetchError> {
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| FetchError::io(path, e))?;
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .await
            .map_err(|e| FetchError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

async fn md5_remote(url: &Url, options: TransportOptions) -> Result<String, FetchError> {
    let task_url = url.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let mut hasher = Md5::new();
        let received = transport::stream_body(&task_url, &options, |chunk| hasher.update(chunk))?;
        tracing::debug!("streamed {} bytes from {}", received, task_url);
        Ok::<_, TransferError>(hex::encode(hasher.finalize()))
    })
    .await;

    match joined {
        Ok(res) => res.map_err(|e| FetchError::transfer(url.as_str(), e)),
        Err(_) => Err(FetchError::transfer(
            url.as_str(),
            TransferError::WorkerPanicked,
        )),
    }
}
