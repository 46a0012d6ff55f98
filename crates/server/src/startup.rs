//! Startup: config, sensors, listener, and the `check` dry run.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use plexhook_core::Config;
use plexhook_sensors::{expand, log_sensors_found, Sensor, SensorsConfig};
use serde_json::Value;
use tracing::{error, info};

use crate::router::build_router;
use crate::state::AppState;

pub fn load_config(profile: Option<&str>) -> Config {
    plexhook_core::config::load_dotenv();
    match profile {
        Some(p) => Config::for_profile(p),
        None => Config::from_env(),
    }
}

/// Expanded sensors plus the file's own `verbose` flag.
pub fn load_sensors(path: &Path) -> anyhow::Result<(Vec<Sensor>, bool)> {
    let config = SensorsConfig::from_path(path)
        .with_context(|| format!("failed to load sensors from {}", path.display()))?;
    Ok((expand(&config), config.verbose))
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    config.log_summary();

    let (sensors, file_verbose) = load_sensors(&config.sensors.path)?;
    log_sensors_found(&sensors);

    let verbose = config.sensors.verbose || file_verbose;
    let state = Arc::new(AppState::new(config.server.clone(), sensors, verbose));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            if e.kind() == ErrorKind::AddrNotAvailable {
                error!("Address not available: {}", addr);
            } else {
                error!("{}", e);
            }
            return Err(e).with_context(|| format!("failed to bind {}", addr));
        }
    };

    info!(
        "Plex Webhooks server listening at {}",
        config.server.webhook_url()
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");

    Ok(())
}

/// Print the filter trace for a saved payload and the sensors it matches.
pub fn check(payload_path: &Path, sensors_path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(payload_path)
        .with_context(|| format!("failed to read {}", payload_path.display()))?;
    let payload: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", payload_path.display()))?;

    let (sensors, _) = load_sensors(sensors_path)?;
    let dispatcher = plexhook_sensors::Dispatcher::new(sensors);

    let print = |line: &str| println!("{}", line);
    let matched: Vec<String> = dispatcher
        .matching(&print, &payload)
        .into_iter()
        .map(|sensor| sensor.name.clone())
        .collect();

    println!();
    if matched.is_empty() {
        println!("No sensor matched.");
    } else {
        for name in &matched {
            println!("Matched: {}", name);
        }
    }

    Ok(matched)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
