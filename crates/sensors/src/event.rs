//! Playback events and the state-change signals derived from them.

use std::fmt;

use plexhook_core::js_string;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Events a sensor reacts to. Anything else (`media.scrobble`,
/// `library.new`, ...) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlaybackEvent {
    #[serde(rename = "media.play")]
    Play,
    #[serde(rename = "media.resume")]
    Resume,
    #[serde(rename = "media.pause")]
    Pause,
    #[serde(rename = "media.stop")]
    Stop,
}

impl PlaybackEvent {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "media.play" => Some(PlaybackEvent::Play),
            "media.resume" => Some(PlaybackEvent::Resume),
            "media.pause" => Some(PlaybackEvent::Pause),
            "media.stop" => Some(PlaybackEvent::Stop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackEvent::Play => "media.play",
            PlaybackEvent::Resume => "media.resume",
            PlaybackEvent::Pause => "media.pause",
            PlaybackEvent::Stop => "media.stop",
        }
    }

    /// Play and resume mark a sensor active; pause and stop inactive.
    pub fn is_active(&self) -> bool {
        matches!(self, PlaybackEvent::Play | PlaybackEvent::Resume)
    }
}

impl fmt::Display for PlaybackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signal emitted for each sensor whose filters matched a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateChange {
    /// The payload's `event`, verbatim (empty when absent).
    pub event: String,
    pub uuid: Uuid,
}

/// The `event` field of a webhook payload.
pub fn payload_event(payload: &Value) -> String {
    payload.get("event").map(js_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_known_events() {
        for raw in ["media.play", "media.resume", "media.pause", "media.stop"] {
            assert_eq!(PlaybackEvent::parse(raw).map(|e| e.as_str()), Some(raw));
        }
        assert_eq!(PlaybackEvent::parse("media.scrobble"), None);
        assert_eq!(PlaybackEvent::parse(""), None);
    }

    #[test]
    fn activity() {
        assert!(PlaybackEvent::Play.is_active());
        assert!(PlaybackEvent::Resume.is_active());
        assert!(!PlaybackEvent::Pause.is_active());
        assert!(!PlaybackEvent::Stop.is_active());
    }

    #[test]
    fn event_from_payload() {
        assert_eq!(payload_event(&json!({ "event": "media.play" })), "media.play");
        assert_eq!(payload_event(&json!({})), "");
        assert_eq!(payload_event(&json!("not an object")), "");
    }

    #[test]
    fn serializes_as_wire_name() {
        assert_eq!(
            serde_json::to_value(PlaybackEvent::Resume).unwrap(),
            json!("media.resume")
        );
    }
}
