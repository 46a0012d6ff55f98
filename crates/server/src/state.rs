use plexhook_core::config::ServerConfig;
use plexhook_rules::TracingLog;
use plexhook_sensors::{Dispatcher, Sensor, SensorRegistry};
use serde_json::Value;
use tokio::sync::RwLock;

/// Shared state behind every handler. The sensor list is fixed at startup;
/// only occupancy state changes.
pub struct AppState {
    pub server: ServerConfig,
    pub dispatcher: Dispatcher,
    pub registry: RwLock<SensorRegistry>,
    pub trace: TracingLog,
}

impl AppState {
    pub fn new(server: ServerConfig, sensors: Vec<Sensor>, verbose: bool) -> Self {
        let mut registry = SensorRegistry::new();
        registry.sync(&sensors);
        Self {
            server,
            dispatcher: Dispatcher::new(sensors),
            registry: RwLock::new(registry),
            trace: TracingLog::new(verbose),
        }
    }

    /// Run every sensor's filters and apply the resulting state changes.
    /// Returns how many sensors changed state.
    pub async fn handle_payload(&self, payload: &Value) -> usize {
        let changes = self.dispatcher.process(&self.trace, payload);
        if changes.is_empty() {
            return 0;
        }
        self.registry.write().await.apply_all(&changes)
    }
}
