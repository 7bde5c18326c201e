//! Citibike GraphQL HTTP client.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER};
use tracing::debug;

use crate::domain::Station;

use super::convert::decode_supply;
use super::error::FetchError;
use super::types::{SupplyInput, SupplyRequest, SupplyVariables};

/// Default GraphQL endpoint.
const DEFAULT_ENDPOINT: &str = "https://citibikenyc.com/bikesharefe-gql";

/// Default region (Brooklyn).
const DEFAULT_REGION: &str = "BKN";

/// Default rideable page limit.
const DEFAULT_PAGE_LIMIT: u32 = 1000;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 20;

const OPERATION_NAME: &str = "GetSupply";

const SUPPLY_QUERY: &str = r#"fragment NoticeFields on Notice {
  localizedTitle
  localizedDescription
  url
  __typename
}

query GetSupply($input: SupplyInput) {
  supply(input: $input) {
    stations {
      stationId
      stationName
      location {
        lat
        lng
        __typename
      }
      bikesAvailable
      bikeDocksAvailable
      ebikesAvailable
      scootersAvailable
      totalBikesAvailable
      totalRideablesAvailable
      isValet
      isOffline
      notices {
        ...NoticeFields
        __typename
      }
      siteId
      lastUpdatedMs
      __typename
    }
    notices {
      ...NoticeFields
      __typename
    }
    requestErrors {
      ...NoticeFields
      __typename
    }
    __typename
  }
}"#;

/// Configuration for the Citibike client.
#[derive(Debug, Clone)]
pub struct CitibikeConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Region code sent with every query
    pub region_code: String,
    /// Rideable page limit sent with every query
    pub page_limit: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CitibikeConfig {
    /// Create a config for the given region with default endpoint and limits.
    pub fn new(region_code: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            region_code: region_code.into(),
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the rideable page limit.
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build the JSON request body for this configuration.
    pub fn request_body(&self) -> SupplyRequest<'_> {
        SupplyRequest {
            operation_name: OPERATION_NAME,
            variables: SupplyVariables {
                input: SupplyInput {
                    region_code: &self.region_code,
                    rideable_page_limit: self.page_limit,
                },
            },
            query: SUPPLY_QUERY,
        }
    }
}

impl Default for CitibikeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

/// Client for the Citibike supply API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CitibikeClient {
    http: reqwest::Client,
    config: CitibikeConfig,
}

impl CitibikeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CitibikeConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();

        // The endpoint serves the public explore page and checks where
        // requests come from.
        headers.insert(ORIGIN, HeaderValue::from_static("https://citibikenyc.com"));
        headers.insert(
            REFERER,
            HeaderValue::from_static("https://citibikenyc.com/explore"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CitibikeConfig {
        &self.config
    }

    /// Fetch all stations for the configured region.
    ///
    /// One POST, no retry. Stations come back in upstream order.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, FetchError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&self.config.request_body())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(Duration::from_secs(self.config.timeout_secs))
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            region = %self.config.region_code,
            "received supply response"
        );

        decode_supply(&body)
    }
}
