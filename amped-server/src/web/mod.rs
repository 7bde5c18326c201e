//! HTTP surface for a display layer.
//!
//! Exposes the current snapshot, the poller's status and a manual
//! refresh endpoint as JSON.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
