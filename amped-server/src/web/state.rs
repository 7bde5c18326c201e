//! Application state for the web layer.

use crate::poller::{Poller, StationFeed};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Station poller; also gives access to the snapshot store
    pub poller: Poller<StationFeed>,
}

impl AppState {
    pub fn new(poller: Poller<StationFeed>) -> Self {
        Self { poller }
    }
}
