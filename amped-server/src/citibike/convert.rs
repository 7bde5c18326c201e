//! Conversion from supply DTOs to domain types.
//!
//! Every station must pass domain validation. One bad station fails the
//! whole fetch, because a wrong bike count means a wrong pricing signal.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::{BikeCounts, InvalidStation, Location, Station, StationId};

use super::error::FetchError;
use super::types::{StationDto, SupplyResponse};

/// How much of a response body to keep in decode errors.
const ERROR_BODY_LIMIT: usize = 500;

/// Error converting a station DTO into a domain station.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// The station violated a domain invariant.
    #[error("station {station_id}: {source}")]
    InvalidStation {
        station_id: String,
        source: InvalidStation,
    },

    /// The same station ID appeared twice in one response.
    #[error("duplicate station ID: {0}")]
    DuplicateId(String),
}

/// Decode a raw `GetSupply` response body into stations, in upstream order.
pub fn decode_supply(body: &str) -> Result<Vec<Station>, FetchError> {
    let response: SupplyResponse = serde_json::from_str(body).map_err(|e| FetchError::Decode {
        message: e.to_string(),
        body: Some(body.chars().take(ERROR_BODY_LIMIT).collect()),
    })?;

    let Some(data) = response.data else {
        let messages: Vec<String> = response
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .collect();

        if messages.is_empty() {
            return Err(FetchError::Decode {
                message: "response contained neither data nor errors".to_string(),
                body: Some(body.chars().take(ERROR_BODY_LIMIT).collect()),
            });
        }
        return Err(FetchError::Upstream { messages });
    };

    let supply = data.supply;

    let request_errors = list_len(supply.request_errors.as_ref());
    if request_errors > 0 {
        warn!(
            count = request_errors,
            "supply response carried request errors"
        );
    }
    debug!(
        stations = supply.stations.len(),
        notices = list_len(supply.notices.as_ref()),
        "decoded supply response"
    );

    convert_stations(supply.stations).map_err(|e| FetchError::Decode {
        message: e.to_string(),
        body: None,
    })
}

/// Convert all stations, rejecting duplicates.
fn convert_stations(dtos: Vec<StationDto>) -> Result<Vec<Station>, ConversionError> {
    let mut seen = HashSet::with_capacity(dtos.len());
    let mut stations = Vec::with_capacity(dtos.len());

    for dto in dtos {
        if !seen.insert(dto.station_id.clone()) {
            return Err(ConversionError::DuplicateId(dto.station_id));
        }
        stations.push(convert_station(dto)?);
    }

    Ok(stations)
}

/// Convert a single station DTO.
fn convert_station(dto: StationDto) -> Result<Station, ConversionError> {
    let station_id = dto.station_id.clone();
    build_station(dto).map_err(|source| ConversionError::InvalidStation { station_id, source })
}

fn build_station(dto: StationDto) -> Result<Station, InvalidStation> {
    let id = StationId::parse(dto.station_id)?;
    let location = Location::new(dto.location.lat, dto.location.lng)?;
    let counts = BikeCounts::new(
        count("totalBikesAvailable", dto.total_bikes_available)?,
        count("ebikesAvailable", dto.ebikes_available)?,
    )?;

    let mut station = Station::new(id, dto.station_name, location, counts, dto.is_offline);

    // Dock count and report time are informational; bad values are dropped.
    if let Some(docks) = dto
        .bike_docks_available
        .as_ref()
        .and_then(parse_integer)
        .and_then(|d| u32::try_from(d).ok())
    {
        station = station.with_docks_available(docks);
    }
    if let Some(at) = dto.last_updated_ms.as_ref().and_then(parse_epoch_ms) {
        station = station.with_last_reported(at);
    }

    Ok(station)
}

fn count(field: &'static str, value: i64) -> Result<u32, InvalidStation> {
    u32::try_from(value).map_err(|_| InvalidStation::InvalidCount { field, value })
}

/// Integer from a JSON number or numeric string.
fn parse_integer(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_epoch_ms(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(parse_integer(value)?)
}

/// Length of an optional JSON array; anything else counts as empty.
fn list_len(value: Option<&serde_json::Value>) -> usize {
    value.and_then(serde_json::Value::as_array).map_or(0, Vec::len)
}
