//! Plex webhook receiver driving filter-matched occupancy sensors.

pub mod api;
pub mod cli;
pub mod router;
pub mod startup;
pub mod state;
