//! `fetchkit fetch <uri>...` – print bodies in input order.

use anyhow::{Context, Result};
use fetchkit_core::config::FetchkitConfig;
use fetchkit_core::resource::parse_all;
use fetchkit_core::{fetch_bounded, fetch_sequential, CurlTransport};

pub async fn run_fetch(
    cfg: &FetchkitConfig,
    uris: &[String],
    jobs: Option<usize>,
    sequential: bool,
) -> Result<()> {
    let identifiers = parse_all(uris)?;
    let transport = CurlTransport::new(cfg.transport_options());
    let max_concurrent = jobs.unwrap_or(cfg.max_concurrent);

    let bodies = tokio::task::spawn_blocking(move || {
        if sequential {
            fetch_sequential(&transport, &identifiers)
        } else {
            fetch_bounded(&transport, &identifiers, max_concurrent)
        }
    })
    .await
    .context("fetch task join")??;

    let with_headers = uris.len() > 1;
    for (uri, body) in uris.iter().zip(bodies) {
        if with_headers {
            println!("==> {} <==", uri);
        }
        println!("{}", body);
    }
    Ok(())
}
