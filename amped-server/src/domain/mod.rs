//! Core domain types for bike-share station availability.
//!
//! These types are independent of the upstream API format. Values are
//! validated on construction, so a `Station` always satisfies its count
//! invariants.

mod error;
mod snapshot;
mod station;

pub use error::InvalidStation;
pub use snapshot::ClassifiedSnapshot;
pub use station::{BikeCounts, Location, Station, StationCategory, StationId};
