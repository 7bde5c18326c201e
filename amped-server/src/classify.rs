//! Station classification.
//!
//! Partitions a fetched station list into the two categories that affect
//! rider pricing: empty stations and stations offering only e-bikes.

use chrono::{DateTime, Utc};

use crate::domain::{ClassifiedSnapshot, Station, StationCategory};

/// Output of [`classify`]: the flagged stations, each list in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub empty: Vec<Station>,
    pub ebike_only: Vec<Station>,
}

impl Classification {
    /// Wrap the classification with fetch metadata.
    pub fn into_snapshot(
        self,
        fetched_at: DateTime<Utc>,
        sequence: u64,
        total_stations: usize,
    ) -> ClassifiedSnapshot {
        ClassifiedSnapshot {
            empty_stations: self.empty,
            ebike_only_stations: self.ebike_only,
            fetched_at,
            sequence,
            total_stations,
        }
    }
}

/// Determine the category of a single station.
///
/// Offline stations are always `Normal`. The empty check runs first, so a
/// station with zero bikes is never e-bike-only.
pub fn categorize(station: &Station) -> StationCategory {
    if station.is_offline() {
        return StationCategory::Normal;
    }

    let total = station.total_bikes_available();
    if total == 0 {
        StationCategory::Empty
    } else if total == station.ebikes_available() {
        StationCategory::EBikeOnly
    } else {
        StationCategory::Normal
    }
}

/// Partition stations into empty and e-bike-only lists.
///
/// Stable: relative order within each list matches the input. Normal
/// stations are not returned.
pub fn classify(stations: &[Station]) -> Classification {
    let mut out = Classification::default();

    for station in stations {
        match categorize(station) {
            StationCategory::Empty => out.empty.push(station.clone()),
            StationCategory::EBikeOnly => out.ebike_only.push(station.clone()),
            StationCategory::Normal => {}
        }
    }

    out
}
