//! Domain validation errors.

/// Error returned when station data violates a domain invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidStation {
    /// Station ID was empty or whitespace.
    #[error("station ID must not be empty")]
    EmptyId,

    /// A bike count was negative or too large.
    #[error("{field} is not a valid count: {value}")]
    InvalidCount { field: &'static str, value: i64 },

    /// More e-bikes than bikes were reported.
    #[error("ebikesAvailable ({ebikes}) exceeds totalBikesAvailable ({total})")]
    EbikesExceedTotal { total: u32, ebikes: u32 },

    /// Latitude or longitude outside the WGS84 range, or not finite.
    #[error("invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },
}
