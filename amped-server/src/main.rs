use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use amped_server::citibike::{CitibikeClient, CitibikeConfig, MockCitibikeClient};
use amped_server::poller::{Poller, PollerConfig, StationFeed, Visibility};
use amped_server::store::SnapshotStore;
use amped_server::web::{AppState, create_router};

/// Default listen address.
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("amped_server=info")),
        )
        .init();

    let bind = std::env::var("AMPED_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let addr: SocketAddr = bind.parse().expect("AMPED_BIND must be a socket address");

    let mut poller_config = PollerConfig::default();
    if let Ok(secs) = std::env::var("AMPED_POLL_SECS") {
        match secs.parse::<u64>() {
            Ok(secs) if secs > 0 => {
                poller_config = poller_config.with_interval(Duration::from_secs(secs));
            }
            _ => warn!(value = %secs, "ignoring invalid AMPED_POLL_SECS"),
        }
    }

    // Use mock data if AMPED_MOCK_DATA is set, otherwise the live API
    let feed = match std::env::var("AMPED_MOCK_DATA") {
        Ok(path) => StationFeed::Mock(
            MockCitibikeClient::from_file(&path).expect("Failed to load mock supply data"),
        ),
        Err(_) => {
            let config = match std::env::var("AMPED_REGION") {
                Ok(region) => CitibikeConfig::new(region),
                Err(_) => CitibikeConfig::default(),
            };
            StationFeed::Live(CitibikeClient::new(config).expect("Failed to create Citibike client"))
        }
    };
    info!(feed = %feed.describe(), "station feed configured");

    let store = SnapshotStore::new();
    let poller = Poller::new(feed, store, poller_config);

    // Initial load is visible; later ones are silent
    match poller.trigger_refresh(Visibility::Visible).await {
        Ok(_) => {
            if let Some(snapshot) = poller.store().current() {
                info!(
                    empty = snapshot.empty_count(),
                    ebike_only = snapshot.ebike_only_count(),
                    total = snapshot.total_stations,
                    "initial station snapshot loaded"
                );
            }
        }
        Err(e) => error!(error = %e, "initial station fetch failed; will retry on next poll"),
    }

    poller
        .start_default()
        .expect("polling interval must be non-zero");

    let app = create_router(AppState::new(poller.clone()));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    info!("Amped station server listening on http://{addr}");
    info!("  GET  /health        - Health check");
    info!("  GET  /api/stations  - Empty and e-bike-only stations");
    info!("  GET  /api/status    - Poller status");
    info!("  POST /api/refresh   - Refresh now");

    let shutdown_poller = poller.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
            shutdown_poller.stop();
        })
        .await
        .expect("server error");
}
