//! URL content fetchers: strictly sequential, or bounded-concurrency.
//!
//! Both return bodies in input order and fail as a whole on the first
//! transfer error. Only HTTP(S) identifiers are accepted; anything else fails
//! with `UnsupportedScheme` before a session is opened.

mod pool;

use crate::error::FetchError;
use crate::resource::ResourceIdentifier;
use crate::transport::{Session, Transport};
use url::Url;

/// Fetches every identifier one after another over a single session.
pub fn fetch_sequential<T: Transport>(
    transport: &T,
    identifiers: &[ResourceIdentifier],
) -> Result<Vec<String>, FetchError> {
    let urls = http_urls(identifiers)?;
    let Some(first) = urls.first() else {
        return Ok(Vec::new());
    };
    tracing::info!("sequential fetch of {} resource(s)", urls.len());

    let mut session = transport
        .open_session()
        .map_err(|e| FetchError::transfer(first.as_str(), e))?;
    let mut contents = Vec::with_capacity(urls.len());
    for url in urls {
        let body = session
            .get_text(url)
            .map_err(|e| FetchError::transfer(url.as_str(), e))?;
        contents.push(body);
    }
    Ok(contents)
}

/// Fetches every identifier with at most `max_concurrent` downloads in flight.
///
/// `result[i]` is the body of `identifiers[i]` regardless of completion order.
/// Blocks until every worker has finished; the first failure observed is
/// returned and no partial results are kept.
pub fn fetch_bounded<T: Transport>(
    transport: &T,
    identifiers: &[ResourceIdentifier],
    max_concurrent: usize,
) -> Result<Vec<String>, FetchError> {
    if max_concurrent == 0 {
        return Err(FetchError::InvalidArgument(
            "max_concurrent must be at least 1".to_string(),
        ));
    }
    let urls = http_urls(identifiers)?;
    if urls.is_empty() {
        return Ok(Vec::new());
    }
    tracing::info!(
        "bounded fetch of {} resource(s), max_concurrent={}",
        urls.len(),
        max_concurrent
    );
    pool::run(transport, &urls, max_concurrent)
}

fn http_urls(identifiers: &[ResourceIdentifier]) -> Result<Vec<&Url>, FetchError> {
    identifiers.iter().map(ResourceIdentifier::http_url).collect()
}
