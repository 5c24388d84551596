//! In-memory transport for tests: canned bodies, per-URL delays and status
//! codes, and counters for in-flight requests and session lifetimes.

use crate::error::TransferError;
use crate::transport::{Session, Transport};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

#[derive(Clone)]
pub(crate) struct Canned {
    body: &'static str,
    delay: Duration,
    status: u32,
}

#[derive(Default)]
pub(crate) struct Counters {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    opened: AtomicUsize,
    closed: AtomicUsize,
    requests: AtomicUsize,
}

pub(crate) struct FakeTransport {
    responses: Arc<HashMap<String, Canned>>,
    counters: Arc<Counters>,
    pub(crate) refuse_sessions: bool,
}

impl FakeTransport {
    pub(crate) fn new(entries: &[(&str, &'static str, u64)]) -> Self {
        let responses = entries
            .iter()
            .map(|(url, body, delay_ms)| {
                (
                    url.to_string(),
                    Canned {
                        body: *body,
                        delay: Duration::from_millis(*delay_ms),
                        status: 200,
                    },
                )
            })
            .collect();
        Self {
            responses: Arc::new(responses),
            counters: Arc::new(Counters::default()),
            refuse_sessions: false,
        }
    }

    pub(crate) fn with_status(mut self, url: &str, status: u32) -> Self {
        let mut map = (*self.responses).clone();
        if let Some(c) = map.get_mut(url) {
            c.status = status;
        }
        self.responses = Arc::new(map);
        self
    }

    pub(crate) fn peak(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub(crate) fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> usize {
        self.counters.requests.load(Ordering::SeqCst)
    }
}

pub(crate) struct FakeSession {
    responses: Arc<HashMap<String, Canned>>,
    counters: Arc<Counters>,
}

impl Transport for FakeTransport {
    type Session = FakeSession;

    fn open_session(&self) -> Result<FakeSession, TransferError> {
        if self.refuse_sessions {
            return Err(TransferError::Status(503));
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession {
            responses: Arc::clone(&self.responses),
            counters: Arc::clone(&self.counters),
        })
    }
}

impl Session for FakeSession {
    fn get_text(&mut self, url: &Url) -> Result<String, TransferError> {
        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(now, Ordering::SeqCst);
        self.counters.requests.fetch_add(1, Ordering::SeqCst);

        let canned = self.responses.get(url.as_str()).cloned();
        if let Some(c) = &canned {
            std::thread::sleep(c.delay);
        }
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);

        match canned {
            Some(c) if c.status == 200 => Ok(c.body.to_string()),
            Some(c) => Err(TransferError::Status(c.status)),
            None => Err(TransferError::Status(404)),
        }
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}
