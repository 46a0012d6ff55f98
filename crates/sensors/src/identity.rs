//! Stable sensor identities derived from configured names.

use plexhook_core::js_string;
use plexhook_rules::{normalize, FilterSet};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::{SensorConfig, SensorsConfig};

pub const UNNAMED_SENSOR: &str = "Unnamed Sensor";

/// A configured sensor ready for dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sensor {
    pub name: String,
    pub uuid: Uuid,
    /// Serial number shown to users; short form of `uuid`.
    pub sn: String,
    /// Normalized filters.
    pub filters: FilterSet,
}

impl Sensor {
    pub fn new(name: impl Into<String>, filters: &FilterSet) -> Self {
        let name = name.into();
        let uuid = sensor_uuid(&name);
        Self {
            sn: short_form(&uuid),
            uuid,
            filters: normalize(Some(filters)),
            name,
        }
    }

    fn from_config(config: &SensorConfig) -> Self {
        Self::new(display_name(config.name.as_ref()), &config.filters)
    }
}

/// Only the name determines identity, so renaming a sensor makes a new one.
pub fn sensor_uuid(name: &str) -> Uuid {
    Uuid::new_v5(
        &Uuid::NAMESPACE_URL,
        format!("plex-webhook-sensor:{}", name).as_bytes(),
    )
}

/// Suffix shared by every UUID in the HomeKit base range.
const HAP_BASE_SUFFIX: &str = "-0000-1000-8000-0026bb765291";

/// HomeKit short form: UUIDs in the HomeKit base range shrink to their
/// leading group without leading zeros; any other UUID is kept whole.
pub fn short_form(uuid: &Uuid) -> String {
    let full = uuid.hyphenated().to_string();
    match full.strip_suffix(HAP_BASE_SUFFIX) {
        Some(head) => {
            let trimmed = head.trim_start_matches('0');
            let short = if trimmed.is_empty() { "0" } else { trimmed };
            short.to_uppercase()
        }
        None => full,
    }
}

pub(crate) fn display_name(name: Option<&Value>) -> String {
    match name {
        None | Some(Value::Null) => UNNAMED_SENSOR.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => js_string(other),
    }
}

/// Assign names and identities, and normalize every sensor's filters.
pub fn expand(config: &SensorsConfig) -> Vec<Sensor> {
    config.sensors.iter().map(Sensor::from_config).collect()
}
