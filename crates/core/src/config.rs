use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Port Plex users conventionally point their webhook at.
pub const DEFAULT_PORT: u16 = 32401;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str) -> bool {
    profiled_env_opt(profile, key)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

/// Accepts `1`, `true`, `yes`, `on` (case-insensitive).
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub sensors: SensorsSource,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PLEXHOOK_PROFILE`. When set (e.g. `LIVINGROOM`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PLEXHOOK_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            sensors: SensorsSource::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:      bind={}:{}", self.server.host, self.server.port);
        tracing::info!("  webhook:     {}", self.server.webhook_url());
        tracing::info!(
            "  sensors:     path={}, verbose={}",
            self.sensors.path.display(),
            self.sensors.verbose
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Address advertised on the landing page; defaults to the bind host,
    /// or the LAN address when binding every interface.
    pub public_address: String,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        let host = profiled_env_or(p, "PLEXHOOK_HOST", "0.0.0.0");
        let public_address = profiled_env_opt(p, "PLEXHOOK_PUBLIC_ADDRESS")
            .unwrap_or_else(|| advertised_address(&host));
        Self {
            host,
            port: profiled_env_u16(p, "PLEXHOOK_PORT", DEFAULT_PORT),
            public_address,
        }
    }

    /// URL to paste into the Plex webhooks settings page.
    pub fn webhook_url(&self) -> String {
        format!("http://{}:{}", self.public_address, self.port)
    }
}

/// An unspecified bind address (`0.0.0.0`, `::`) is not reachable as-is;
/// advertise the machine's primary LAN address instead.
pub fn advertised_address(host: &str) -> String {
    advertised_address_with(host, || match local_ip_address::local_ip() {
        Ok(ip) => Some(ip),
        Err(e) => {
            tracing::warn!(error = %e, "could not detect LAN address");
            None
        }
    })
}

/// Like `advertised_address`, with the LAN lookup supplied by the caller.
/// Falls back to loopback when the lookup finds nothing.
pub fn advertised_address_with<F>(host: &str, detect: F) -> String
where
    F: FnOnce() -> Option<IpAddr>,
{
    match host.parse::<IpAddr>() {
        Ok(ip) if ip.is_unspecified() => detect()
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .to_string(),
        _ => host.to_string(),
    }
}

// ── Sensors ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorsSource {
    /// JSON or YAML file listing the sensors and their filters.
    pub path: PathBuf,
    /// Route filter traces to `info` instead of `debug`.
    pub verbose: bool,
}

impl SensorsSource {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            path: PathBuf::from(profiled_env_or(p, "PLEXHOOK_SENSORS", "config/sensors.json")),
            verbose: profiled_env_bool(p, "PLEXHOOK_VERBOSE"),
        }
    }
}
