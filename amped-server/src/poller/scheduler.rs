//! Refresh scheduling and in-flight de-duplication.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::citibike::FetchError;
use crate::classify::classify;
use crate::domain::ClassifiedSnapshot;
use crate::store::SnapshotStore;

use super::config::PollerConfig;
use super::source::StationSource;

/// Whether a refresh should be shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// The caller shows a loading indicator and wants errors back.
    Visible,
    /// Background refresh. Never touches the visible loading state.
    Silent,
}

/// What the poller is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    FetchingVisible,
    FetchingSilent,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::FetchingVisible => "fetching_visible",
            LoadState::FetchingSilent => "fetching_silent",
        }
    }

    /// True only for a user-visible fetch.
    pub fn is_loading(&self) -> bool {
        *self == LoadState::FetchingVisible
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a refresh trigger that did not fail visibly.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// The store now holds this snapshot.
    Updated(Arc<ClassifiedSnapshot>),
    /// Another cycle was already in flight; this trigger was dropped.
    Coalesced,
    /// The fetch finished after `stop()`, or lost to a newer snapshot.
    Discarded,
    /// A silent refresh failed. The error was logged and recorded.
    Failed,
}

/// Error starting the periodic timer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error("polling interval must be greater than zero")]
    ZeroInterval,
}

#[derive(Debug, Default)]
struct CycleState {
    load: LoadState,
    /// A trigger arrived while a cycle was in flight.
    coalesced: bool,
}

struct Inner<S> {
    source: S,
    store: SnapshotStore,
    config: PollerConfig,
    cycle: Mutex<CycleState>,
    timer: Mutex<Option<JoinHandle<()>>>,
    /// Bumped by `stop()`. Cycles started under an older epoch are discarded.
    epoch: AtomicU64,
}

/// Drives fetch → classify → store.
///
/// Cheap to clone; clones share the timer, in-flight state and store.
pub struct Poller<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for Poller<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Marks a cycle as in flight. Releases on drop, so an aborted timer
/// task never leaves the poller stuck.
struct InFlight<'a> {
    cycle: &'a Mutex<CycleState>,
    released: bool,
}

impl<'a> InFlight<'a> {
    fn begin(cycle: &'a Mutex<CycleState>, visibility: Visibility) -> Option<Self> {
        let mut state = cycle.lock().unwrap_or_else(PoisonError::into_inner);
        if state.load != LoadState::Idle {
            state.coalesced = true;
            return None;
        }

        state.load = match visibility {
            Visibility::Visible => LoadState::FetchingVisible,
            Visibility::Silent => LoadState::FetchingSilent,
        };
        state.coalesced = false;
        Some(Self {
            cycle,
            released: false,
        })
    }

    /// End the cycle. Returns whether any trigger was coalesced into it.
    fn finish(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;

        let mut state = self.cycle.lock().unwrap_or_else(PoisonError::into_inner);
        state.load = LoadState::Idle;
        std::mem::take(&mut state.coalesced)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<S: StationSource> Poller<S> {
    pub fn new(source: S, store: SnapshotStore, config: PollerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                store,
                config,
                cycle: Mutex::new(CycleState::default()),
                timer: Mutex::new(None),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.inner.store
    }

    pub fn config(&self) -> &PollerConfig {
        &self.inner.config
    }

    /// Current load state, for a display layer's loading indicator.
    pub fn state(&self) -> LoadState {
        self.inner
            .cycle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .load
    }

    /// Whether the periodic timer is running.
    pub fn is_running(&self) -> bool {
        self.timer()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Run one fetch cycle now.
    ///
    /// If a cycle is already in flight the trigger is dropped and
    /// `Coalesced` is returned immediately. A failed visible refresh
    /// returns the error; a failed silent refresh is logged and returns
    /// `Failed`. Either way the stored snapshot is left untouched.
    pub async fn trigger_refresh(
        &self,
        visibility: Visibility,
    ) -> Result<RefreshOutcome, FetchError> {
        let Some(flight) = InFlight::begin(&self.inner.cycle, visibility) else {
            debug!(?visibility, "refresh coalesced into in-flight cycle");
            return Ok(RefreshOutcome::Coalesced);
        };

        let epoch = self.inner.epoch.load(Ordering::SeqCst);
        let result = self.run_cycle(visibility).await;

        let coalesced = flight.finish();
        let stopped = self.inner.epoch.load(Ordering::SeqCst) != epoch;
        if coalesced && !stopped && self.inner.config.follow_up {
            let poller = self.clone();
            tokio::spawn(async move { poller.follow_up(epoch).await });
        }

        result
    }

    /// Start silent refreshes every `interval`.
    ///
    /// The first refresh happens one interval after starting. Returns
    /// `Ok(false)` without creating a second timer if already running.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, interval: Duration) -> Result<bool, StartError> {
        if interval.is_zero() {
            return Err(StartError::ZeroInterval);
        }

        let mut timer = self.timer();
        if timer.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!("poller already running");
            return Ok(false);
        }

        let weak = Arc::downgrade(&self.inner);
        *timer = Some(tokio::spawn(run_timer(weak, interval)));

        info!(interval_secs = interval.as_secs_f64(), "station polling started");
        Ok(true)
    }

    /// Start with the configured interval.
    pub fn start_default(&self) -> Result<bool, StartError> {
        self.start(self.inner.config.interval)
    }

    /// Stop periodic refreshes. Idempotent.
    ///
    /// Any cycle still in flight is discarded when it completes.
    pub fn stop(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);

        if let Some(handle) = self.timer().take() {
            handle.abort();
            info!("station polling stopped");
        }
    }

    /// Deferred refresh after a busy cycle. Never schedules another, and
    /// does nothing if the poller was stopped since `epoch` was read.
    async fn follow_up(self, epoch: u64) {
        if self.inner.epoch.load(Ordering::SeqCst) != epoch {
            return;
        }
        let Some(flight) = InFlight::begin(&self.inner.cycle, Visibility::Silent) else {
            return;
        };
        debug!("running follow-up refresh");
        let _ = self.run_cycle(Visibility::Silent).await;
        drop(flight);
    }

    async fn run_cycle(&self, visibility: Visibility) -> Result<RefreshOutcome, FetchError> {
        let inner = &self.inner;
        let epoch = inner.epoch.load(Ordering::SeqCst);
        let sequence = inner.store.next_sequence();
        let timeout = inner.config.fetch_timeout;

        let fetched = match tokio::time::timeout(timeout, inner.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout)),
        };

        if inner.epoch.load(Ordering::SeqCst) != epoch {
            debug!(sequence, "discarding fetch that completed after stop");
            return Ok(RefreshOutcome::Discarded);
        }

        let stations = match fetched {
            Ok(stations) => stations,
            Err(err) => {
                inner.store.record_error(sequence, err.to_string());
                return match visibility {
                    Visibility::Visible => {
                        warn!(sequence, error = %err, "refresh failed");
                        Err(err)
                    }
                    Visibility::Silent => {
                        warn!(sequence, error = %err, "silent refresh failed");
                        Ok(RefreshOutcome::Failed)
                    }
                };
            }
        };

        let total = stations.len();
        let snapshot = classify(&stations).into_snapshot(Utc::now(), sequence, total);

        match inner.store.update(snapshot) {
            Ok(snapshot) => {
                debug!(
                    sequence,
                    total,
                    empty = snapshot.empty_count(),
                    ebike_only = snapshot.ebike_only_count(),
                    "snapshot updated"
                );
                Ok(RefreshOutcome::Updated(snapshot))
            }
            Err(stale) => {
                warn!(%stale, "dropping stale snapshot");
                Ok(RefreshOutcome::Discarded)
            }
        }
    }

    fn timer(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Timer loop. Holds only a weak reference so dropping every `Poller`
/// handle ends it.
async fn run_timer<S: StationSource>(inner: Weak<Inner<S>>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker.tick().await; // First tick is immediate, skip it

    loop {
        ticker.tick().await;
        let Some(inner) = inner.upgrade() else {
            break;
        };
        let poller = Poller { inner };
        let _ = poller.trigger_refresh(Visibility::Silent).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citibike::{FetchErrorKind, MockCitibikeClient};
    use crate::domain::{BikeCounts, Location, Station, StationId};
    use std::sync::atomic::AtomicUsize;

    fn station(id: &str, total: u32, ebikes: u32, offline: bool) -> Station {
        Station::new(
            StationId::parse(id).unwrap(),
            id,
            Location::new(40.69, -73.98).unwrap(),
            BikeCounts::new(total, ebikes).unwrap(),
            offline,
        )
    }

    fn sample_stations() -> Vec<Station> {
        vec![
            station("A", 0, 0, false),
            station("B", 3, 3, false),
            station("C", 5, 2, false),
            station("D", 0, 0, true),
        ]
    }

    fn setup(mock: &MockCitibikeClient, config: PollerConfig) -> Poller<MockCitibikeClient> {
        Poller::new(mock.clone(), SnapshotStore::new(), config)
    }

    fn count_updates(store: &SnapshotStore) -> (Arc<AtomicUsize>, crate::store::Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let sub = store.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        (count, sub)
    }

    fn server_error() -> FetchError {
        FetchError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }

    #[tokio::test]
    async fn visible_refresh_updates_store() {
        let mock = MockCitibikeClient::new(sample_stations());
        let poller = setup(&mock, PollerConfig::default());

        let outcome = poller.trigger_refresh(Visibility::Visible).await.unwrap();

        let snapshot = match outcome {
            RefreshOutcome::Updated(snapshot) => snapshot,
            other => panic!("expected update, got {other:?}"),
        };
        let empty: Vec<_> = snapshot.empty_stations.iter().map(|s| s.id().as_str()).collect();
        let ebike: Vec<_> = snapshot
            .ebike_only_stations
            .iter()
            .map(|s| s.id().as_str())
            .collect();
        assert_eq!(empty, vec!["A"]);
        assert_eq!(ebike, vec!["B"]);
        assert_eq!(snapshot.total_stations, 4);
        assert_eq!(snapshot.sequence, 1);
        assert_eq!(poller.store().current().unwrap().sequence, 1);
        assert_eq!(poller.state(), LoadState::Idle);
    }

    #[tokio::test]
    async fn later_fetch_replaces_wholesale() {
        let mock = MockCitibikeClient::new(sample_stations());
        let poller = setup(&mock, PollerConfig::default());
        poller.trigger_refresh(Visibility::Visible).await.unwrap();

        mock.set_stations(vec![station("Z", 2, 2, false)]);
        poller.trigger_refresh(Visibility::Silent).await.unwrap();

        let current = poller.store().current().unwrap();
        assert_eq!(current.sequence, 2);
        assert!(current.empty_stations.is_empty());
        assert_eq!(current.ebike_only_stations[0].id().as_str(), "Z");
    }

    #[tokio::test]
    async fn empty_station_list_is_accepted() {
        let mock = MockCitibikeClient::new(vec![]);
        let poller = setup(&mock, PollerConfig::default());

        let outcome = poller.trigger_refresh(Visibility::Visible).await.unwrap();

        assert!(matches!(outcome, RefreshOutcome::Updated(_)));
        let current = poller.store().current().unwrap();
        assert_eq!(current.empty_count(), 0);
        assert_eq!(current.ebike_only_count(), 0);
    }

    #[tokio::test]
    async fn silent_failure_keeps_previous_snapshot() {
        let mock = MockCitibikeClient::new(sample_stations());
        let poller = setup(&mock, PollerConfig::default());
        poller.trigger_refresh(Visibility::Silent).await.unwrap();
        let before = poller.store().current().unwrap();

        mock.fail_next(server_error());
        let outcome = poller.trigger_refresh(Visibility::Silent).await.unwrap();

        assert!(matches!(outcome, RefreshOutcome::Failed));
        let after = poller.store().current().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        let last_error = poller.store().last_error().unwrap();
        assert_eq!(last_error.sequence, 2);
        assert!(last_error.message.contains("500"));
    }

    #[tokio::test]
    async fn visible_failure_is_returned() {
        let mock = MockCitibikeClient::new(sample_stations());
        let poller = setup(&mock, PollerConfig::default());
        mock.fail_next(server_error());

        let err = poller.trigger_refresh(Visibility::Visible).await.unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::Network);
        assert!(poller.store().current().is_none());
        assert!(poller.store().last_error().is_some());
        assert_eq!(poller.state(), LoadState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_times_out() {
        let mock = MockCitibikeClient::new(sample_stations()).with_latency(Duration::from_secs(30));
        let poller = setup(&mock, PollerConfig::default());

        let err = poller.trigger_refresh(Visibility::Visible).await.unwrap_err();

        assert!(matches!(err, FetchError::Timeout(d) if d == Duration::from_secs(20)));
        assert_eq!(poller.state(), LoadState::Idle);
        assert!(poller.store().current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn load_state_tracks_visibility() {
        let mock = MockCitibikeClient::new(sample_stations()).with_latency(Duration::from_secs(2));
        let poller = setup(&mock, PollerConfig::default());

        let silent = tokio::spawn({
            let poller = poller.clone();
            async move { poller.trigger_refresh(Visibility::Silent).await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(poller.state(), LoadState::FetchingSilent);
        assert!(!poller.state().is_loading());
        silent.await.unwrap().unwrap();

        let visible = tokio::spawn({
            let poller = poller.clone();
            async move { poller.trigger_refresh(Visibility::Visible).await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(poller.state(), LoadState::FetchingVisible);
        assert!(poller.state().is_loading());
        visible.await.unwrap().unwrap();

        assert_eq!(poller.state(), LoadState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_triggers_produce_one_update() {
        let mock = MockCitibikeClient::new(sample_stations()).with_latency(Duration::from_secs(3));
        let poller = setup(&mock, PollerConfig::default());
        let (updates, _sub) = count_updates(poller.store());
        poller.start(Duration::from_secs(10)).unwrap();

        let first = tokio::spawn({
            let poller = poller.clone();
            async move { poller.trigger_refresh(Visibility::Visible).await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        let second = poller.trigger_refresh(Visibility::Visible).await.unwrap();
        let first = first.await.unwrap().unwrap();

        assert!(matches!(second, RefreshOutcome::Coalesced));
        assert!(matches!(first, RefreshOutcome::Updated(_)));
        assert_eq!(updates.load(Ordering::SeqCst), 1);
        assert_eq!(mock.call_count(), 1);

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn follow_up_runs_once_after_coalesced_trigger() {
        let mock = MockCitibikeClient::new(sample_stations()).with_latency(Duration::from_secs(3));
        let poller = setup(&mock, PollerConfig::default().with_follow_up(true));
        let (updates, _sub) = count_updates(poller.store());

        let first = tokio::spawn({
            let poller = poller.clone();
            async move { poller.trigger_refresh(Visibility::Visible).await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        let second = poller.trigger_refresh(Visibility::Silent).await.unwrap();
        let third = poller.trigger_refresh(Visibility::Silent).await.unwrap();
        first.await.unwrap().unwrap();

        assert!(matches!(second, RefreshOutcome::Coalesced));
        assert!(matches!(third, RefreshOutcome::Coalesced));

        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(mock.call_count(), 2);
        assert_eq!(updates.load(Ordering::SeqCst), 2);
        assert_eq!(poller.store().current().unwrap().sequence, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_refresh_runs_on_interval() {
        let mock = MockCitibikeClient::new(sample_stations());
        let poller = setup(&mock, PollerConfig::default());

        assert_eq!(poller.start(Duration::from_secs(10)), Ok(true));
        assert!(poller.is_running());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(mock.call_count(), 0);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(mock.call_count(), 3);
        assert_eq!(poller.store().current().unwrap().sequence, 3);

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_reentrant() {
        let mock = MockCitibikeClient::new(sample_stations());
        let poller = setup(&mock, PollerConfig::default());

        assert_eq!(poller.start(Duration::from_secs(10)), Ok(true));
        assert_eq!(poller.start(Duration::from_secs(10)), Ok(false));
        assert_eq!(poller.start_default(), Ok(false));

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(mock.call_count(), 3);

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_timer_and_is_idempotent() {
        let mock = MockCitibikeClient::new(sample_stations());
        let poller = setup(&mock, PollerConfig::default());

        poller.stop();
        poller.start(Duration::from_secs(10)).unwrap();
        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(mock.call_count(), 1);

        poller.stop();
        poller.stop();
        assert!(!poller.is_running());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_after_stop() {
        let mock = MockCitibikeClient::new(sample_stations());
        let poller = setup(&mock, PollerConfig::default());

        poller.start(Duration::from_secs(10)).unwrap();
        poller.stop();
        assert_eq!(poller.start(Duration::from_secs(10)), Ok(true));

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(mock.call_count(), 2);

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_completing_after_stop_is_discarded() {
        let mock = MockCitibikeClient::new(sample_stations()).with_latency(Duration::from_secs(3));
        let poller = setup(&mock, PollerConfig::default());
        let (updates, _sub) = count_updates(poller.store());

        let pending = tokio::spawn({
            let poller = poller.clone();
            async move { poller.trigger_refresh(Visibility::Visible).await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        poller.stop();

        let outcome = pending.await.unwrap().unwrap();

        assert!(matches!(outcome, RefreshOutcome::Discarded));
        assert!(poller.store().current().is_none());
        assert_eq!(updates.load(Ordering::SeqCst), 0);
        assert_eq!(poller.state(), LoadState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_pending_follow_up() {
        let mock = MockCitibikeClient::new(sample_stations()).with_latency(Duration::from_secs(3));
        let poller = setup(&mock, PollerConfig::default().with_follow_up(true));
        let (updates, _sub) = count_updates(poller.store());

        let first = tokio::spawn({
            let poller = poller.clone();
            async move { poller.trigger_refresh(Visibility::Visible).await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        let second = poller.trigger_refresh(Visibility::Silent).await.unwrap();
        assert!(matches!(second, RefreshOutcome::Coalesced));

        poller.stop();
        let outcome = first.await.unwrap().unwrap();
        assert!(matches!(outcome, RefreshOutcome::Discarded));

        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(mock.call_count(), 1);
        assert_eq!(updates.load(Ordering::SeqCst), 0);
        assert!(poller.store().current().is_none());
        assert_eq!(poller.state(), LoadState::Idle);
    }

    #[tokio::test]
    async fn pollers_sharing_store_keep_updating() {
        let store = SnapshotStore::new();

        let first = Poller::new(
            MockCitibikeClient::new(sample_stations()),
            store.clone(),
            PollerConfig::default(),
        );
        for _ in 0..3 {
            first.trigger_refresh(Visibility::Silent).await.unwrap();
        }
        assert_eq!(store.current().unwrap().sequence, 3);
        drop(first);

        let second = Poller::new(
            MockCitibikeClient::new(vec![station("NEW", 0, 0, false)]),
            store.clone(),
            PollerConfig::default(),
        );
        let outcome = second.trigger_refresh(Visibility::Visible).await.unwrap();

        assert!(matches!(outcome, RefreshOutcome::Updated(_)));
        let current = store.current().unwrap();
        assert_eq!(current.sequence, 4);
        assert_eq!(current.empty_stations.len(), 1);
        assert_eq!(current.empty_stations[0].id().as_str(), "NEW");
        assert!(current.ebike_only_stations.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_during_timer_cycle_resets_state() {
        let mock = MockCitibikeClient::new(sample_stations()).with_latency(Duration::from_secs(5));
        let poller = setup(&mock, PollerConfig::default());

        poller.start(Duration::from_secs(10)).unwrap();
        tokio::time::sleep(Duration::from_secs(12)).await;
        assert_eq!(poller.state(), LoadState::FetchingSilent);

        poller.stop();
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(poller.state(), LoadState::Idle);
        assert!(poller.store().current().is_none());

        // A manual refresh works again once the aborted cycle is gone.
        let outcome = poller.trigger_refresh(Visibility::Visible).await.unwrap();
        assert!(matches!(outcome, RefreshOutcome::Updated(_)));
    }

    #[test]
    fn zero_interval_rejected() {
        let mock = MockCitibikeClient::new(vec![]);
        let poller = setup(&mock, PollerConfig::default());
        assert_eq!(
            poller.start(Duration::ZERO),
            Err(StartError::ZeroInterval)
        );
    }

    #[test]
    fn load_state_display() {
        assert_eq!(LoadState::Idle.to_string(), "idle");
        assert_eq!(LoadState::FetchingVisible.to_string(), "fetching_visible");
        assert_eq!(LoadState::FetchingSilent.to_string(), "fetching_silent");
    }
}
