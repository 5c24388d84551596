//! `fetchkit bench <uri>...` – sequential vs bounded fetch timings.

use anyhow::{Context, Result};
use fetchkit_core::bench::{self, Comparison, RunStats};
use fetchkit_core::config::FetchkitConfig;
use fetchkit_core::resource::parse_all;
use fetchkit_core::CurlTransport;

fn print_row(label: &str, stats: &RunStats) {
    println!(
        "  {:>12}  {:>10}  {:>8.3}  {:>10.1}",
        label,
        stats.bytes,
        stats.elapsed.as_secs_f64(),
        stats.throughput_kib_s()
    );
}

fn print_comparison(cmp: &Comparison) {
    println!(
        "  {:>12}  {:>10}  {:>8}  {:>10}",
        "Mode", "Bytes", "Time(s)", "KiB/s"
    );
    println!(
        "  {}  {}  {}  {}",
        "------------", "----------", "--------", "----------"
    );
    print_row("sequential", &cmp.sequential);
    print_row(&format!("bounded({})", cmp.max_concurrent), &cmp.bounded);
    println!(
        "{} resource(s), speedup {:.2}x",
        cmp.resources,
        cmp.speedup()
    );
    if !cmp.bodies_match {
        println!("note: bodies differed between runs");
    }
}

pub async fn run_bench(cfg: &FetchkitConfig, uris: &[String], jobs: Option<usize>) -> Result<()> {
    let identifiers = parse_all(uris)?;
    let transport = CurlTransport::new(cfg.transport_options());
    let max_concurrent = jobs.unwrap_or(cfg.max_concurrent);

    let cmp = tokio::task::spawn_blocking(move || {
        bench::compare(&transport, &identifiers, max_concurrent)
    })
    .await
    .context("bench task join")??;
    print_comparison(&cmp);
    Ok(())
}
