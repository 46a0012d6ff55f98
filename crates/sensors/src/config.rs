//! Sensor list file: `{ "verbose": bool, "sensors": [{ "name", "filters" }] }`.

use std::fs;
use std::path::Path;

use std::collections::HashSet;

use plexhook_core::{PlexhookError, Result};
use plexhook_rules::FilterSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::identity::display_name;

/// Top-level sensors file. Unknown keys (e.g. `platform`) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorsConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
}

/// One configured sensor, before identity expansion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Usually a string; other scalars are stringified on expansion.
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub filters: FilterSet,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SensorsConfig {
    /// Load from a `.json` file, or YAML for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = if is_json(path) {
            Self::from_json(&raw)?
        } else {
            Self::from_yaml(&raw)?
        };
        config.validate()?;
        info!(
            path = %path.display(),
            sensors = config.sensors.len(),
            "loaded sensors config"
        );
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Sensor identities derive from names, so names must be unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for sensor in &self.sensors {
            let name = display_name(sensor.name.as_ref());
            if !seen.insert(name.clone()) {
                return Err(PlexhookError::Config(format!(
                    "duplicate sensor name: {}",
                    name
                )));
            }
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexhook_rules::FilterGroup;
    use std::io::Write;

    const SENSORS_YAML: &str = r#"
verbose: true
sensors:
  - name: Living Room
    filters:
      - - path: Player.title
          value: Apple TV
  - name: Bedroom
    manufacturer: ignored
"#;

    const SENSORS_JSON: &str = r#"{
        "platform": "PlexWebhooks",
        "sensors": [
            { "name": "Kitchen", "filters": [null, [{ "path": "Player.title", "value": "Roku" }]] },
            { "name": 42, "filters": { "not": "a list" } }
        ]
    }"#;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_yaml_file() {
        let file = write_temp(".yml", SENSORS_YAML);
        let config = SensorsConfig::from_path(file.path()).unwrap();

        assert!(config.verbose);
        assert_eq!(config.sensors.len(), 2);
        assert_eq!(config.sensors[0].name, Some(Value::from("Living Room")));
        assert_eq!(config.sensors[0].filters.len(), 1);
        assert!(config.sensors[1].filters.is_empty());
        assert_eq!(
            config.sensors[1].extra.get("manufacturer"),
            Some(&Value::from("ignored"))
        );
    }

    #[test]
    fn load_json_file() {
        let file = write_temp(".json", SENSORS_JSON);
        let config = SensorsConfig::from_path(file.path()).unwrap();

        assert!(!config.verbose);
        assert_eq!(config.sensors[0].filters.groups()[0], FilterGroup::Malformed);
        assert_eq!(config.sensors[1].name, Some(Value::from(42)));
        assert!(config.sensors[1].filters.is_empty());
    }

    #[test]
    fn missing_sensors_key_is_empty() {
        let config = SensorsConfig::from_json("{}").unwrap();
        assert!(config.sensors.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SensorsConfig::from_path(Path::new("/nonexistent/sensors.json")).unwrap_err();
        assert!(matches!(err, PlexhookError::Io(_)));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let file = write_temp(".json", "{ sensors: ");
        let err = SensorsConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, PlexhookError::Json(_)));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let file = write_temp(
            ".json",
            r#"{ "sensors": [{ "name": "Den" }, { "name": "Kitchen" }, { "name": "Den" }] }"#,
        );
        let err = SensorsConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, PlexhookError::Config(ref msg) if msg.contains("Den")));
    }

    #[test]
    fn unnamed_sensors_share_a_name() {
        let config = SensorsConfig::from_json(r#"{ "sensors": [{}, { "name": null }] }"#).unwrap();
        assert!(config.validate().is_err());
    }
}
