//! GraphQL supply request and response DTOs.
//!
//! Response types map directly onto the `GetSupply` JSON. Unknown fields
//! (including `__typename`) are ignored. Fields the classifier depends on
//! are mandatory, so a missing bike count fails the whole decode instead of
//! silently defaulting to zero. Informational fields are kept as raw JSON
//! values so an upstream type change there never fails a fetch.

use serde::{Deserialize, Serialize};

/// Request body for the `GetSupply` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyRequest<'a> {
    pub operation_name: &'a str,
    pub variables: SupplyVariables<'a>,
    pub query: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplyVariables<'a> {
    pub input: SupplyInput<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyInput<'a> {
    /// Region code, e.g. "BKN" for Brooklyn.
    pub region_code: &'a str,

    /// Maximum number of rideables the upstream returns per station list.
    pub rideable_page_limit: u32,
}

/// Top-level GraphQL response.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplyResponse {
    /// Absent when the query failed outright.
    pub data: Option<SupplyData>,

    /// GraphQL-level errors.
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupplyData {
    pub supply: Supply,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supply {
    pub stations: Vec<StationDto>,

    /// System-wide notices (service alerts). Only counted.
    pub notices: Option<serde_json::Value>,

    /// Request-level problems the upstream chose to report alongside data.
    pub request_errors: Option<serde_json::Value>,
}

/// A single station as reported by `GetSupply`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub station_id: String,
    pub station_name: String,
    pub location: LocationDto,

    /// All bikes available, classic and electric.
    pub total_bikes_available: i64,

    /// E-bikes available.
    pub ebikes_available: i64,

    pub is_offline: bool,

    /// Free docks. A number or a numeric string.
    pub bike_docks_available: Option<serde_json::Value>,

    /// Milliseconds since the epoch. A number or a numeric string.
    pub last_updated_ms: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}
