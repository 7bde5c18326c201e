//! Poller configuration.

use std::time::Duration;

/// Configuration for the station poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between silent background refreshes.
    pub interval: Duration,

    /// Upper bound on a single fetch. A fetch that takes longer fails with
    /// a timeout and leaves the current snapshot in place.
    pub fetch_timeout: Duration,

    /// Run one deferred silent refresh after an in-flight cycle if any
    /// trigger was coalesced into it.
    pub follow_up: bool,
}

impl PollerConfig {
    /// Set the polling interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the per-fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Enable or disable the deferred follow-up refresh.
    pub fn with_follow_up(mut self, follow_up: bool) -> Self {
        self.follow_up = follow_up;
        self
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            fetch_timeout: Duration::from_secs(20),
            follow_up: false,
        }
    }
}
