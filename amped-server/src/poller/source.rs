//! Abstraction over where stations come from.

use std::future::Future;

use crate::citibike::{CitibikeClient, FetchError, MockCitibikeClient};
use crate::domain::Station;

/// Trait for fetching the current station list.
///
/// Abstracts over the live client and the mock so the poller can be tested
/// without network access.
pub trait StationSource: Send + Sync + 'static {
    /// Fetch all stations in upstream order.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Station>, FetchError>> + Send;
}

impl StationSource for CitibikeClient {
    async fn fetch(&self) -> Result<Vec<Station>, FetchError> {
        self.fetch_stations().await
    }
}

impl StationSource for MockCitibikeClient {
    async fn fetch(&self) -> Result<Vec<Station>, FetchError> {
        self.fetch_stations().await
    }
}

/// Station source chosen at startup.
#[derive(Clone)]
pub enum StationFeed {
    Live(CitibikeClient),
    Mock(MockCitibikeClient),
}

impl StationSource for StationFeed {
    async fn fetch(&self) -> Result<Vec<Station>, FetchError> {
        match self {
            StationFeed::Live(client) => client.fetch_stations().await,
            StationFeed::Mock(client) => client.fetch_stations().await,
        }
    }
}

impl StationFeed {
    pub fn describe(&self) -> String {
        match self {
            StationFeed::Live(client) => format!(
                "live ({} region {})",
                client.config().endpoint,
                client.config().region_code
            ),
            StationFeed::Mock(_) => "mock data".to_string(),
        }
    }
}
