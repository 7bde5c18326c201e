//! Bike-share station availability server.
//!
//! Polls the Citibike supply API and keeps a snapshot of the stations
//! that matter for rider pricing: empty stations, and stations where the
//! only bikes left are e-bikes.

pub mod citibike;
pub mod classify;
pub mod domain;
pub mod poller;
pub mod store;
pub mod web;
