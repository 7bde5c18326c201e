//! Periodic and on-demand station refresh.
//!
//! The [`Poller`] drives fetch → classify → store. It runs silent refreshes
//! on a fixed interval while started and accepts manual refreshes at any
//! time. At most one cycle is in flight; triggers that arrive meanwhile are
//! coalesced into it.

mod config;
mod scheduler;
mod source;

pub use config::PollerConfig;
pub use scheduler::{LoadState, Poller, RefreshOutcome, StartError, Visibility};
pub use source::{StationFeed, StationSource};
