//! Citibike GraphQL supply client.
//!
//! Fetches live station availability from the public bike-share GraphQL
//! endpoint with a single `GetSupply` query and converts the response into
//! domain [`Station`](crate::domain::Station) values.
//!
//! The endpoint needs no authentication. Every call is a single round trip
//! with no caching and no retry; retrying is left to the poller.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{CitibikeClient, CitibikeConfig};
pub use convert::{ConversionError, decode_supply};
pub use error::{FetchError, FetchErrorKind};
pub use mock::MockCitibikeClient;
pub use types::{LocationDto, StationDto, SupplyRequest, SupplyResponse};
