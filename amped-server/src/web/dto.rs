//! Data transfer objects for web responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ClassifiedSnapshot, Station};
use crate::poller::LoadState;
use crate::store::LastError;

/// A flagged station.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub total_bikes_available: u32,
    pub ebikes_available: u32,
    pub classic_bikes_available: u32,

    /// Free docks, when reported
    pub bike_docks_available: Option<u32>,

    /// When the station last reported upstream
    pub last_reported: Option<DateTime<Utc>>,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        let location = station.location();
        Self {
            id: station.id().to_string(),
            name: station.name().to_string(),
            lat: location.lat(),
            lng: location.lng(),
            total_bikes_available: station.total_bikes_available(),
            ebikes_available: station.ebikes_available(),
            classic_bikes_available: station.counts().classic(),
            bike_docks_available: station.bike_docks_available(),
            last_reported: station.last_reported(),
        }
    }
}

/// The most recent refresh failure.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub at: DateTime<Utc>,
}

impl From<LastError> for ErrorInfo {
    fn from(err: LastError) -> Self {
        Self {
            message: err.message,
            at: err.at,
        }
    }
}

/// Current classified snapshot.
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub empty_stations: Vec<StationResult>,
    pub ebike_only_stations: Vec<StationResult>,
    pub empty_count: usize,
    pub ebike_only_count: usize,

    /// Stations in the upstream response, flagged or not
    pub total_stations: usize,

    pub fetched_at: DateTime<Utc>,
    pub sequence: u64,
}

impl From<&ClassifiedSnapshot> for SnapshotResponse {
    fn from(snapshot: &ClassifiedSnapshot) -> Self {
        Self {
            empty_stations: snapshot.empty_stations.iter().map(Into::into).collect(),
            ebike_only_stations: snapshot
                .ebike_only_stations
                .iter()
                .map(Into::into)
                .collect(),
            empty_count: snapshot.empty_count(),
            ebike_only_count: snapshot.ebike_only_count(),
            total_stations: snapshot.total_stations,
            fetched_at: snapshot.fetched_at,
            sequence: snapshot.sequence,
        }
    }
}

/// Result of a manual refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// "updated", "coalesced" or "discarded"
    pub status: &'static str,
    pub snapshot: Option<SnapshotResponse>,
}

/// Poller and snapshot status.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub state: LoadState,
    pub loading: bool,
    pub polling: bool,
    pub empty_count: Option<usize>,
    pub ebike_only_count: Option<usize>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub last_error: Option<ErrorInfo>,

    /// Listeners registered on the snapshot store
    pub subscribers: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
