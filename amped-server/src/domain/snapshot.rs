//! Classified snapshot of station availability.

use chrono::{DateTime, Utc};

use super::station::Station;

/// The result of one fetch after classification.
///
/// Holds only empty and e-bike-only stations, each in upstream order.
/// Normal and offline stations are dropped during classification and
/// only counted in `total_stations`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSnapshot {
    /// Online stations with no bikes.
    pub empty_stations: Vec<Station>,

    /// Online stations where every available bike is an e-bike.
    pub ebike_only_stations: Vec<Station>,

    /// When the fetch that produced this snapshot completed.
    pub fetched_at: DateTime<Utc>,

    /// Sequence number of the originating fetch. Increases per fetch.
    pub sequence: u64,

    /// Number of stations in the upstream response, before classification.
    pub total_stations: usize,
}

impl ClassifiedSnapshot {
    pub fn empty_count(&self) -> usize {
        self.empty_stations.len()
    }

    pub fn ebike_only_count(&self) -> usize {
        self.ebike_only_stations.len()
    }
}
