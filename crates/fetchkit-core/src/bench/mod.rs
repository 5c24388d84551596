//! Comparison mode: fetch the same resources sequentially and with bounded
//! concurrency, and report wall time and bytes for each run.

use std::time::{Duration, Instant};

use crate::error::FetchError;
use crate::fetcher;
use crate::resource::ResourceIdentifier;
use crate::transport::Transport;

/// Measurements of one fetch run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub elapsed: Duration,
    /// Total length of all fetched bodies, in bytes.
    pub bytes: usize,
}

impl RunStats {
    fn measure<F>(run: F) -> Result<(Self, Vec<String>), FetchError>
    where
        F: FnOnce() -> Result<Vec<String>, FetchError>,
    {
        let start = Instant::now();
        let bodies = run()?;
        let stats = RunStats {
            elapsed: start.elapsed(),
            bytes: bodies.iter().map(String::len).sum(),
        };
        Ok((stats, bodies))
    }

    pub fn throughput_kib_s(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes as f64 / 1024.0 / secs
        } else {
            0.0
        }
    }
}

/// Result of [`compare`].
#[derive(Debug, Clone)]
pub struct Comparison {
    pub resources: usize,
    pub max_concurrent: usize,
    pub sequential: RunStats,
    pub bounded: RunStats,
    /// True when both runs returned identical bodies (false for resources
    /// whose content changes between requests).
    pub bodies_match: bool,
}

impl Comparison {
    /// Sequential wall time divided by bounded wall time.
    pub fn speedup(&self) -> f64 {
        let bounded = self.bounded.elapsed.as_secs_f64();
        if bounded > 0.0 {
            self.sequential.elapsed.as_secs_f64() / bounded
        } else {
            1.0
        }
    }
}

/// Runs [`fetcher::fetch_sequential`] then [`fetcher::fetch_bounded`] over
/// `identifiers`. Fails if either run fails or returns a result count that
/// differs from the input length.
///
/// Runs on the current thread (call from `spawn_blocking` if used from async).
pub fn compare<T: Transport>(
    transport: &T,
    identifiers: &[ResourceIdentifier],
    max_concurrent: usize,
) -> Result<Comparison, FetchError> {
    if max_concurrent == 0 {
        return Err(FetchError::InvalidArgument(
            "max_concurrent must be at least 1".to_string(),
        ));
    }
    let (sequential, seq_bodies) =
        RunStats::measure(|| fetcher::fetch_sequential(transport, identifiers))?;
    let (bounded, bounded_bodies) =
        RunStats::measure(|| fetcher::fetch_bounded(transport, identifiers, max_concurrent))?;
    check_result_count("sequential", identifiers.len(), seq_bodies.len())?;
    check_result_count("bounded", identifiers.len(), bounded_bodies.len())?;

    let comparison = Comparison {
        resources: identifiers.len(),
        max_concurrent,
        sequential,
        bounded,
        bodies_match: seq_bodies == bounded_bodies,
    };
    tracing::info!(
        "compare: {} resource(s), sequential {:?}, bounded(max {}) {:?}, speedup {:.2}",
        comparison.resources,
        comparison.sequential.elapsed,
        max_concurrent,
        comparison.bounded.elapsed,
        comparison.speedup()
    );
    Ok(comparison)
}

fn check_result_count(run: &str, expected: usize, got: usize) -> Result<(), FetchError> {
    if expected != got {
        return Err(FetchError::InvalidArgument(format!(
            "{} run returned {} result(s) for {} resource(s)",
            run, got, expected
        )));
    }
    Ok(())
}
