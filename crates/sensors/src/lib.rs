//! Sensors driven by Plex webhook events.
//!
//! This crate provides:
//! - Sensor list loading from JSON/YAML with name-derived stable identities
//! - Registry holding each sensor's occupancy state (play/resume vs pause/stop)
//! - Dispatcher running every sensor's filters against an incoming payload

pub mod config;
pub mod dispatcher;
pub mod event;
pub mod identity;
pub mod registry;

pub use config::{SensorConfig, SensorsConfig};
pub use dispatcher::Dispatcher;
pub use event::{PlaybackEvent, StateChange};
pub use identity::{expand, Sensor};
pub use registry::{
    log_sensors_found, SensorRegistry, SensorSnapshot, SensorState, SensorUpdate, SyncReport,
};
