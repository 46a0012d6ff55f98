//! In-memory sensor registry and occupancy state.
//!
//! The registry mirrors the configured sensor list: `sync` restores sensors
//! it already knows (keeping their state), adds new ones in the stopped
//! state and drops the ones no longer configured. State changes coming from
//! the dispatcher are applied with `apply` and fanned out to subscribers.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use crate::event::{PlaybackEvent, StateChange};
use crate::identity::Sensor;

const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Current occupancy state of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensorState {
    pub event: PlaybackEvent,
    /// `None` until the first applied event.
    pub changed_at: Option<DateTime<Utc>>,
}

impl SensorState {
    pub fn is_active(&self) -> bool {
        self.event.is_active()
    }
}

impl Default for SensorState {
    fn default() -> Self {
        Self {
            event: PlaybackEvent::Stop,
            changed_at: None,
        }
    }
}

/// Broadcast to subscribers for every applied state change.
#[derive(Debug, Clone, Serialize)]
pub struct SensorUpdate {
    pub uuid: Uuid,
    pub name: String,
    pub state: SensorState,
}

/// Listing entry for the HTTP API.
#[derive(Debug, Clone, Serialize)]
pub struct SensorSnapshot {
    pub name: String,
    pub uuid: Uuid,
    pub sn: String,
    pub event: PlaybackEvent,
    pub active: bool,
    pub changed_at: Option<DateTime<Utc>>,
}

/// What `sync` did, by sensor name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: Vec<String>,
    pub restored: Vec<String>,
    pub removed: Vec<String>,
}

struct Entry {
    sensor: Sensor,
    state: SensorState,
}

pub struct SensorRegistry {
    entries: HashMap<Uuid, Entry>,
    updates: broadcast::Sender<SensorUpdate>,
}

impl Default for SensorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorRegistry {
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            entries: HashMap::new(),
            updates,
        }
    }

    /// Reconcile the registry with the configured sensors.
    pub fn sync(&mut self, sensors: &[Sensor]) -> SyncReport {
        let mut report = SyncReport::default();
        let mut configured = HashSet::with_capacity(sensors.len());

        for sensor in sensors {
            configured.insert(sensor.uuid);
            match self.entries.get_mut(&sensor.uuid) {
                Some(entry) => {
                    info!("Restoring existing accessory from cache: {}", sensor.name);
                    entry.sensor = sensor.clone();
                    report.restored.push(sensor.name.clone());
                }
                None => {
                    info!("Adding new accessory: {}", sensor.name);
                    self.entries.insert(
                        sensor.uuid,
                        Entry {
                            sensor: sensor.clone(),
                            state: SensorState::default(),
                        },
                    );
                    report.added.push(sensor.name.clone());
                }
            }
        }

        let stale: Vec<Uuid> = self
            .entries
            .keys()
            .filter(|uuid| !configured.contains(*uuid))
            .copied()
            .collect();

        for uuid in stale {
            if let Some(entry) = self.entries.remove(&uuid) {
                info!("Removing stale accessory: {}", entry.sensor.name);
                report.removed.push(entry.sensor.name);
            }
        }

        report
    }

    /// Apply a state change. Unknown sensors and events other than
    /// play/resume/pause/stop are ignored.
    pub fn apply(&mut self, change: &StateChange) -> Option<SensorState> {
        let Some(entry) = self.entries.get_mut(&change.uuid) else {
            debug!(uuid = %change.uuid, "state change for unknown sensor");
            return None;
        };
        let Some(event) = PlaybackEvent::parse(&change.event) else {
            debug!(
                sensor = %entry.sensor.name,
                event = %change.event,
                "ignoring non-playback event"
            );
            return None;
        };

        entry.state = SensorState {
            event,
            changed_at: Some(Utc::now()),
        };

        if entry.state.is_active() {
            info!("[{}] is active", entry.sensor.name);
        } else {
            info!("[{}] is inactive", entry.sensor.name);
        }

        // No subscribers is fine.
        let _ = self.updates.send(SensorUpdate {
            uuid: change.uuid,
            name: entry.sensor.name.clone(),
            state: entry.state,
        });

        Some(entry.state)
    }

    /// Apply several changes in order; returns how many took effect.
    pub fn apply_all(&mut self, changes: &[StateChange]) -> usize {
        changes
            .iter()
            .filter(|change| self.apply(change).is_some())
            .count()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SensorUpdate> {
        self.updates.subscribe()
    }

    pub fn get(&self, uuid: &Uuid) -> Option<SensorState> {
        self.entries.get(uuid).map(|entry| entry.state)
    }

    pub fn is_active(&self, uuid: &Uuid) -> bool {
        self.get(uuid).map(|state| state.is_active()).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All sensors ordered by name.
    pub fn snapshot(&self) -> Vec<SensorSnapshot> {
        let mut sensors: Vec<SensorSnapshot> = self
            .entries
            .values()
            .map(|entry| SensorSnapshot {
                name: entry.sensor.name.clone(),
                uuid: entry.sensor.uuid,
                sn: entry.sensor.sn.clone(),
                event: entry.state.event,
                active: entry.state.is_active(),
                changed_at: entry.state.changed_at,
            })
            .collect();
        sensors.sort_by(|a, b| a.name.cmp(&b.name));
        sensors
    }
}

/// Startup summary of the configured sensors.
pub fn log_sensors_found(sensors: &[Sensor]) {
    match sensors {
        [] => info!("No accessories found in config."),
        [only] => info!("Found 1 accessory: {}", only.name),
        _ => {
            info!("Found {} accessories:", sensors.len());
            for sensor in sensors {
                info!("• {}", sensor.name);
            }
        }
    }
}
