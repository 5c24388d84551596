//! Sequential and bounded-concurrency URL fetching, plus streaming MD5 of
//! `http(s)`, `ftp` and `file` resources.

pub mod config;
pub mod logging;

pub mod bench;
pub mod error;
pub mod fetcher;
pub mod hasher;
pub mod resource;
pub mod transport;

#[cfg(test)]
mod testing;

pub use error::{FetchError, TransferError};
pub use fetcher::{fetch_bounded, fetch_sequential};
pub use hasher::{md5_resource, md5_uri};
pub use resource::ResourceIdentifier;
pub use transport::{CurlTransport, Transport, TransportOptions};
