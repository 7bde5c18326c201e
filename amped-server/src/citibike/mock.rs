//! Mock Citibike client for testing without network access.
//!
//! Serves a fixed station list, loaded from a `GetSupply` JSON file or
//! given directly, as if it were a live API response. Failures and latency
//! can be scripted to exercise the poller.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::domain::Station;

use super::convert::decode_supply;
use super::error::FetchError;

#[derive(Default)]
struct MockState {
    stations: Vec<Station>,
    failures: VecDeque<FetchError>,
    latency: Duration,
}

/// Mock supply client.
///
/// Clones share state, so a test can keep one handle to script responses
/// while the poller owns another.
#[derive(Clone, Default)]
pub struct MockCitibikeClient {
    state: Arc<Mutex<MockState>>,
    calls: Arc<AtomicUsize>,
}

impl MockCitibikeClient {
    /// Create a mock that returns the given stations.
    pub fn new(stations: Vec<Station>) -> Self {
        let client = Self::default();
        client.set_stations(stations);
        client
    }

    /// Create a mock from a raw `GetSupply` response body.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        Ok(Self::new(decode_supply(body)?))
    }

    /// Create a mock by loading a `GetSupply` response from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path).map_err(|e| FetchError::Decode {
            message: format!("failed to read {}: {}", path.display(), e),
            body: None,
        })?;
        Self::from_json(&body)
    }

    /// Set artificial latency applied to every fetch.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = latency;
        self
    }

    /// Replace the stations returned by subsequent fetches.
    pub fn set_stations(&self, stations: Vec<Station>) {
        self.lock().stations = stations;
    }

    /// Make the next fetch fail with `err`. Failures queue in order.
    pub fn fail_next(&self, err: FetchError) {
        self.lock().failures.push_back(err);
    }

    /// Number of fetches started so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Mimics [`CitibikeClient::fetch_stations`](super::CitibikeClient::fetch_stations).
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let latency = self.lock().latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.lock();
        match state.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(state.stations.clone()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
