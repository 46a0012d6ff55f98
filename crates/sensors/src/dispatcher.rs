//! Routes a webhook payload to the sensors whose filters match it.
//!
//! Every sensor is checked in configuration order; each match yields one
//! `StateChange` carrying the payload's `event` and the sensor's UUID.
//! Filter traces go to the supplied `VerboseLog`, one block per sensor.

use plexhook_rules::{FilterEvaluator, VerboseLog};
use serde_json::Value;

use crate::event::{payload_event, StateChange};
use crate::identity::Sensor;

pub struct Dispatcher {
    sensors: Vec<Sensor>,
}

impl Dispatcher {
    pub fn new(sensors: Vec<Sensor>) -> Self {
        Self { sensors }
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Sensors whose filters accept `payload`, in configuration order.
    pub fn matching<L: VerboseLog + ?Sized>(&self, log: &L, payload: &Value) -> Vec<&Sensor> {
        self.sensors
            .iter()
            .filter(|sensor| {
                log.verbose(&format!("Checking rules for [{}]", sensor.name));
                FilterEvaluator::new(log, payload, Some(&sensor.filters)).matches()
            })
            .collect()
    }

    /// State changes to apply for `payload`.
    pub fn process<L: VerboseLog + ?Sized>(&self, log: &L, payload: &Value) -> Vec<StateChange> {
        let event = payload_event(payload);
        let changes: Vec<StateChange> = self
            .matching(log, payload)
            .into_iter()
            .map(|sensor| StateChange {
                event: event.clone(),
                uuid: sensor.uuid,
            })
            .collect();

        tracing::debug!(
            event = %event,
            sensors = self.sensors.len(),
            matched = changes.len(),
            "payload dispatched"
        );

        changes
    }
}
