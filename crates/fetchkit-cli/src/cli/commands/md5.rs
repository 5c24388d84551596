//! `fetchkit md5 <uri>...` – hash every resource concurrently.

use anyhow::{Context, Result};
use fetchkit_core::config::FetchkitConfig;
use fetchkit_core::md5_uri;
use tokio::task::JoinSet;

/// Prints `<digest>  <uri>` per resource, in input order.
pub async fn run_md5(cfg: &FetchkitConfig, uris: &[String]) -> Result<()> {
    let options = cfg.transport_options();
    let mut set = JoinSet::new();
    for (index, uri) in uris.iter().cloned().enumerate() {
        let options = options.clone();
        set.spawn(async move {
            let res = md5_uri(&uri, &options).await;
            (index, uri, res)
        });
    }

    let mut digests: Vec<Option<String>> = vec![None; uris.len()];
    while let Some(joined) = set.join_next().await {
        let (index, uri, res) = joined.context("md5 task join")?;
        digests[index] = Some(res.with_context(|| format!("md5 {}", uri))?);
    }

    for (uri, digest) in uris.iter().zip(digests) {
        if let Some(digest) = digest {
            println!("{}  {}", digest, uri);
        }
    }
    Ok(())
}
