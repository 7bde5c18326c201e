//! Station types.

use std::fmt;

use chrono::{DateTime, Utc};

use super::error::InvalidStation;

/// Upstream identifier for a dock location.
///
/// Unique within a single fetch. Never empty.
///
/// # Examples
///
/// ```
/// use amped_server::domain::StationId;
///
/// let id = StationId::parse("66db6387-0aca-11e7-82f6-3863bb44ef7c").unwrap();
/// assert_eq!(id.as_str(), "66db6387-0aca-11e7-82f6-3863bb44ef7c");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Parse a station ID, rejecting empty or whitespace-only input.
    pub fn parse(s: impl Into<String>) -> Result<Self, InvalidStation> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(InvalidStation::EmptyId);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    lat: f64,
    lng: f64,
}

impl Location {
    /// Create a location, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidStation> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if !valid {
            return Err(InvalidStation::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Bike counts at a station.
///
/// Guarantees `ebikes <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BikeCounts {
    total: u32,
    ebikes: u32,
}

impl BikeCounts {
    /// Create bike counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use amped_server::domain::BikeCounts;
    ///
    /// let counts = BikeCounts::new(5, 2).unwrap();
    /// assert_eq!(counts.classic(), 3);
    ///
    /// // More e-bikes than bikes is inconsistent
    /// assert!(BikeCounts::new(1, 2).is_err());
    /// ```
    pub fn new(total: u32, ebikes: u32) -> Result<Self, InvalidStation> {
        if ebikes > total {
            return Err(InvalidStation::EbikesExceedTotal { total, ebikes });
        }
        Ok(Self { total, ebikes })
    }

    /// All bikes available, of any type.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// E-bikes available.
    pub fn ebikes(&self) -> u32 {
        self.ebikes
    }

    /// Non-electric bikes available.
    pub fn classic(&self) -> u32 {
        self.total - self.ebikes
    }
}

/// Pricing-relevant category of a station.
///
/// Derived from a [`Station`], never stored on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationCategory {
    /// Online with no bikes at all.
    Empty,
    /// Online, and every available bike is an e-bike.
    EBikeOnly,
    /// Anything else, including offline stations.
    Normal,
}

impl fmt::Display for StationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StationCategory::Empty => "empty",
            StationCategory::EBikeOnly => "ebike_only",
            StationCategory::Normal => "normal",
        };
        f.write_str(s)
    }
}

/// Snapshot of one dock location as reported by a single fetch.
///
/// Immutable once built. The next fetch replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    id: StationId,
    name: String,
    location: Location,
    counts: BikeCounts,
    is_offline: bool,
    bike_docks_available: Option<u32>,
    last_reported: Option<DateTime<Utc>>,
}

impl Station {
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        location: Location,
        counts: BikeCounts,
        is_offline: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            counts,
            is_offline,
            bike_docks_available: None,
            last_reported: None,
        }
    }

    /// Set the number of free docks.
    pub fn with_docks_available(mut self, docks: u32) -> Self {
        self.bike_docks_available = Some(docks);
        self
    }

    /// Set when the station last reported to the upstream system.
    pub fn with_last_reported(mut self, at: DateTime<Utc>) -> Self {
        self.last_reported = Some(at);
        self
    }

    pub fn id(&self) -> &StationId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn counts(&self) -> BikeCounts {
        self.counts
    }

    pub fn total_bikes_available(&self) -> u32 {
        self.counts.total()
    }

    pub fn ebikes_available(&self) -> u32 {
        self.counts.ebikes()
    }

    pub fn is_offline(&self) -> bool {
        self.is_offline
    }

    pub fn bike_docks_available(&self) -> Option<u32> {
        self.bike_docks_available
    }

    pub fn last_reported(&self) -> Option<DateTime<Utc>> {
        self.last_reported
    }
}
