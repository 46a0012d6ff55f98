//! HTTP endpoint modules.
//!
//! - `webhook`: POST / from Plex
//! - `landing`: GET / with the URL to register in Plex
//! - `health`: readiness and sensor listing
//! - `events`: live sensor state stream

mod events;
mod health;
mod landing;
mod webhook;

pub use events::sensor_events;
pub use health::{health, sensors};
pub use landing::{landing, landing_page};
pub use webhook::webhook;
