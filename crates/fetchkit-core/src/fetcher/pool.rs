//! Fixed-size worker pool behind `fetch_bounded`.
//!
//! Workers pull `(index, url)` items from a shared queue and report
//! `(index, result)` over a channel; the caller places each body in its slot.

use crate::error::{FetchError, TransferError};
use crate::transport::{Session, Transport};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Mutex, PoisonError};
use std::thread;
use url::Url;

type WorkQueue<'a> = Mutex<VecDeque<(usize, &'a Url)>>;
type ItemResult = (usize, Result<String, TransferError>);

pub(super) fn run<T: Transport>(
    transport: &T,
    urls: &[&Url],
    max_concurrent: usize,
) -> Result<Vec<String>, FetchError> {
    let count = urls.len();
    let work: WorkQueue<'_> = Mutex::new(urls.iter().copied().enumerate().collect());
    let failed = AtomicBool::new(false);
    let mut slots: Vec<Option<String>> = vec![None; count];
    let mut first_error: Option<FetchError> = None;
    let num_workers = max_concurrent.min(count);

    thread::scope(|scope| {
        let (tx, rx) = mpsc::channel::<ItemResult>();
        let mut handles = Vec::with_capacity(num_workers);
        for worker in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            let failed = &failed;
            handles.push(scope.spawn(move || worker_loop(worker, transport, work, failed, tx)));
        }
        drop(tx);

        for (index, res) in rx {
            match res {
                Ok(body) => slots[index] = Some(body),
                Err(e) => {
                    failed.store(true, Ordering::Relaxed);
                    tracing::warn!("fetch of {} failed: {}", urls[index], e);
                    if first_error.is_none() {
                        first_error = Some(FetchError::transfer(urls[index].as_str(), e));
                    }
                }
            }
        }

        for handle in handles {
            if handle.join().is_err() {
                failed.store(true, Ordering::Relaxed);
            }
        }
    });

    if let Some(e) = first_error {
        return Err(e);
    }
    // A slot left empty without a reported error belongs to a worker that panicked.
    if let Some(index) = slots.iter().position(Option::is_none) {
        return Err(FetchError::transfer(
            urls[index].as_str(),
            TransferError::WorkerPanicked,
        ));
    }
    Ok(slots.into_iter().flatten().collect())
}

fn worker_loop<T: Transport>(
    worker: usize,
    transport: &T,
    work: &WorkQueue<'_>,
    failed: &AtomicBool,
    tx: mpsc::Sender<ItemResult>,
) {
    // One session per worker: a curl handle is single-threaded. Opened on the
    // first item so idle workers never connect; dropped on exit.
    let mut session: Option<T::Session> = None;
    loop {
        if failed.load(Ordering::Relaxed) {
            break;
        }
        let next = work
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let Some((index, url)) = next else {
            break;
        };

        tracing::debug!("worker {} fetching #{} {}", worker, index, url);
        let res = match session.take().map_or_else(|| transport.open_session(), Ok) {
            Ok(mut s) => {
                let res = s.get_text(url);
                session = Some(s);
                res
            }
            Err(e) => Err(e),
        };

        let is_err = res.is_err();
        if is_err {
            failed.store(true, Ordering::Relaxed);
        }
        if tx.send((index, res)).is_err() || is_err {
            break;
        }
    }
}
