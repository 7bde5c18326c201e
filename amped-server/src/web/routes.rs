//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::warn;

use crate::citibike::FetchError;
use crate::poller::{RefreshOutcome, Visibility};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(stations))
        .route("/api/status", get(status))
        .route("/api/refresh", post(refresh))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current snapshot of flagged stations.
async fn stations(State(state): State<AppState>) -> Result<Json<SnapshotResponse>, AppError> {
    let snapshot = state
        .poller
        .store()
        .current()
        .ok_or_else(|| AppError::ServiceUnavailable {
            message: "no station data fetched yet".to_string(),
        })?;

    Ok(Json(SnapshotResponse::from(snapshot.as_ref())))
}

/// Poller status for loading indicators and "last updated" labels.
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let store = state.poller.store();
    let load = state.poller.state();
    let current = store.current();

    Json(StatusResponse {
        state: load,
        loading: load.is_loading(),
        polling: state.poller.is_running(),
        empty_count: current.as_ref().map(|s| s.empty_count()),
        ebike_only_count: current.as_ref().map(|s| s.ebike_only_count()),
        fetched_at: current.as_ref().map(|s| s.fetched_at),
        last_error: store.last_error().map(ErrorInfo::from),
        subscribers: store.subscriber_count(),
    })
}

/// User-initiated refresh.
async fn refresh(State(state): State<AppState>) -> Result<Response, AppError> {
    let outcome = state.poller.trigger_refresh(Visibility::Visible).await?;

    let response = match outcome {
        RefreshOutcome::Updated(snapshot) => (
            StatusCode::OK,
            Json(RefreshResponse {
                status: "updated",
                snapshot: Some(SnapshotResponse::from(snapshot.as_ref())),
            }),
        ),
        RefreshOutcome::Coalesced => (
            StatusCode::ACCEPTED,
            Json(RefreshResponse {
                status: "coalesced",
                snapshot: None,
            }),
        ),
        RefreshOutcome::Discarded | RefreshOutcome::Failed => (
            StatusCode::ACCEPTED,
            Json(RefreshResponse {
                status: "discarded",
                snapshot: None,
            }),
        ),
    };

    Ok(response.into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Upstream fetch failed
    BadGateway { message: String },
    /// No data available yet
    ServiceUnavailable { message: String },
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::ServiceUnavailable { message } => {
                (StatusCode::SERVICE_UNAVAILABLE, message)
            }
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
